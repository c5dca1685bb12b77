//! Create, update and delete pipelines for milestones.
//!
//! Each function runs against a [`MilestoneRepository`] and assumes the
//! caller wraps it in one transaction. Validation happens before the first
//! write, so a rejected request leaves the store untouched even without a
//! rollback. Event emission is left to the caller, after commit.

use jiff::Timestamp;
use log::debug;

use super::{
    reassign, reorder::is_occupied, validator, MilestoneDates, MilestoneRepository, OrderSlot,
    Reassignment,
};
use crate::{
    error::{Result, ScheduleError},
    models::{Milestone, Timeline},
    params::{CreateMilestone, UpdateMilestone},
};

/// Result of a committed-to-be update.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneChange {
    /// The milestone as it was before the update
    pub previous: Milestone,
    /// The milestone as written
    pub current: Milestone,
    /// Position writes made for the move, if any
    pub reassignment: Reassignment,
}

impl MilestoneChange {
    /// Number of siblings whose position changed.
    pub fn displaced_count(&self) -> usize {
        self.reassignment.siblings.len()
    }
}

fn live_timeline<R: MilestoneRepository + ?Sized>(repo: &R, timeline_id: u64) -> Result<Timeline> {
    repo.find_timeline_by_id(timeline_id)?
        .filter(|timeline| !timeline.is_deleted())
        .ok_or(ScheduleError::TimelineNotFound { id: timeline_id })
}

fn live_milestone<R: MilestoneRepository + ?Sized>(
    repo: &R,
    timeline_id: u64,
    milestone_id: u64,
) -> Result<Milestone> {
    repo.find_milestone_by_id(milestone_id)?
        .filter(|milestone| !milestone.is_deleted() && milestone.timeline_id == timeline_id)
        .ok_or(ScheduleError::MilestoneNotFound { id: milestone_id })
}

/// Creates a milestone at the requested position.
///
/// The position must be free; creation never displaces siblings.
pub fn create_milestone<R: MilestoneRepository + ?Sized>(
    repo: &R,
    params: &CreateMilestone,
) -> Result<Milestone> {
    params.validate()?;
    let timeline = live_timeline(repo, params.timeline_id)?;
    validator::ensure_valid(validator::check_dates(
        &timeline,
        MilestoneDates::from(params),
    ))?;

    let siblings: Vec<OrderSlot> = repo
        .find_non_deleted_milestones_by_timeline(timeline.id)?
        .iter()
        .map(OrderSlot::from)
        .collect();
    if is_occupied(&siblings, params.order) {
        return Err(ScheduleError::OrderOccupied {
            timeline_id: timeline.id,
            order: params.order,
        });
    }

    let milestone = repo.insert_milestone(params, Timestamp::now())?;
    debug!(
        "Created milestone {} at order {} in timeline {}",
        milestone.id, milestone.order, timeline.id
    );
    Ok(milestone)
}

/// Applies a partial update, moving the milestone if `order` changed.
pub fn update_milestone<R: MilestoneRepository + ?Sized>(
    repo: &R,
    request: &UpdateMilestone,
) -> Result<MilestoneChange> {
    debug!(
        "Received update for milestone {} in timeline {}",
        request.id, request.timeline_id
    );
    request.validate()?;

    let timeline = live_timeline(repo, request.timeline_id)?;
    let previous = live_milestone(repo, timeline.id, request.id)?;

    validator::ensure_valid(validator::validate(&timeline, &previous, request))?;
    debug!("Validated update for milestone {}", previous.id);

    let reassignment = match request.order {
        Some(new_order) if new_order != previous.order => {
            let siblings: Vec<OrderSlot> = repo
                .find_non_deleted_milestones_by_timeline(timeline.id)?
                .iter()
                .filter(|sibling| sibling.id != previous.id)
                .map(OrderSlot::from)
                .collect();
            let plan = reassign(&siblings, previous.id, previous.order, new_order);
            debug!(
                "Reordered milestone {} from {} to {}, displacing {} sibling(s)",
                previous.id,
                previous.order,
                new_order,
                plan.siblings.len()
            );
            plan
        }
        _ => reassign(&[], previous.id, previous.order, previous.order),
    };

    let now = Timestamp::now();
    let mut current = previous.merged(request);
    current.order = reassignment.moved.order;
    current.updated_at = now;

    debug!("Persisting milestone {}", current.id);
    repo.save_milestone_fields(&current)?;
    repo.apply_milestone_patches(&reassignment.patches(), now)?;

    Ok(MilestoneChange {
        previous,
        current,
        reassignment,
    })
}

/// Soft-deletes a milestone. Its position is left as a gap.
pub fn delete_milestone<R: MilestoneRepository + ?Sized>(
    repo: &R,
    timeline_id: u64,
    milestone_id: u64,
) -> Result<Milestone> {
    let timeline = live_timeline(repo, timeline_id)?;
    let mut milestone = live_milestone(repo, timeline.id, milestone_id)?;

    let now = Timestamp::now();
    repo.mark_milestone_deleted(milestone.id, now)?;
    milestone.deleted_at = Some(now);
    milestone.updated_at = now;
    Ok(milestone)
}
