//! Milestone operations. Writes delegate to the schedule pipelines inside
//! one immediate transaction each.
//!
//! Nothing here publishes milestone events. [`Scheduler`](crate::Scheduler)
//! does that after commit; callers driving `Database` directly publish
//! their own.

use crate::{
    error::{Result, ScheduleError},
    models::Milestone,
    params::{CreateMilestone, ListMilestones, UpdateMilestone},
    schedule::{self, MilestoneChange, MilestoneRepository, TimelineProgress},
};

impl super::Database {
    /// Creates a milestone at a free position.
    ///
    /// Does not emit `milestone.created`.
    pub fn create_milestone(&mut self, params: &CreateMilestone) -> Result<Milestone> {
        self.run_atomic("milestone create", |store| {
            schedule::create_milestone(store, params)
        })
    }

    /// Applies a partial update, reordering siblings as needed.
    ///
    /// Either every write (fields and positions) commits, or none does.
    /// Does not emit `milestone.updated`; build it from the returned
    /// [`MilestoneChange`] once this returns `Ok`.
    pub fn update_milestone(&mut self, request: &UpdateMilestone) -> Result<MilestoneChange> {
        self.run_atomic("milestone update", |store| {
            schedule::update_milestone(store, request)
        })
    }

    /// Soft-deletes a milestone, leaving a gap at its position.
    ///
    /// Does not emit `milestone.deleted`.
    pub fn delete_milestone(&mut self, timeline_id: u64, id: u64) -> Result<Milestone> {
        self.run_atomic("milestone delete", |store| {
            schedule::delete_milestone(store, timeline_id, id)
        })
    }

    /// Retrieves a live milestone by ID.
    pub fn get_milestone(&self, id: u64) -> Result<Option<Milestone>> {
        Ok(self
            .store()
            .find_milestone_by_id(id)?
            .filter(|milestone| !milestone.is_deleted()))
    }

    /// Lists a live timeline's milestones in position order.
    pub fn list_milestones(&self, params: &ListMilestones) -> Result<Vec<Milestone>> {
        self.require_timeline(params.timeline_id)?;
        self.store().milestones_for_timeline(
            params.timeline_id,
            params.include_hidden,
            params.include_deleted,
        )
    }

    /// Duration and progress over the live, visible milestones.
    pub fn timeline_progress(&self, timeline_id: u64) -> Result<TimelineProgress> {
        self.require_timeline(timeline_id)?;
        let milestones = self
            .store()
            .milestones_for_timeline(timeline_id, false, false)?;
        Ok(schedule::compute_duration_and_progress(&milestones))
    }

    fn require_timeline(&self, id: u64) -> Result<()> {
        match self.get_timeline(id)? {
            Some(_) => Ok(()),
            None => Err(ScheduleError::TimelineNotFound { id }),
        }
    }
}
