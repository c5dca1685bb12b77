//! Milestone operations for the Scheduler.
//!
//! Writes publish their event only after `Database` has committed, so a
//! rolled-back operation is never announced.

use log::debug;

use super::Scheduler;
use crate::{
    error::Result,
    events::MilestoneEvent,
    models::Milestone,
    params::{CreateMilestone, Id, ListMilestones, UpdateMilestone},
    schedule::MilestoneChange,
};

impl Scheduler {
    /// Creates a milestone at the requested position.
    ///
    /// Fails with `OrderOccupied` if a live sibling already holds it.
    pub async fn create_milestone(&self, params: &CreateMilestone) -> Result<Milestone> {
        let params = params.clone();
        let milestone = self
            .with_database(move |db| db.create_milestone(&params))
            .await?;

        self.publish(&MilestoneEvent::created(milestone.clone()));
        Ok(milestone)
    }

    /// Updates a milestone, moving it and shifting siblings when `order`
    /// changes.
    pub async fn update_milestone(&self, params: &UpdateMilestone) -> Result<MilestoneChange> {
        let request = params.clone();
        let change = self
            .with_database(move |db| db.update_milestone(&request))
            .await?;

        debug!(
            "Publishing update for milestone {} ({} sibling(s) displaced)",
            change.current.id,
            change.displaced_count()
        );
        self.publish(&MilestoneEvent::updated(
            change.previous.clone(),
            change.current.clone(),
        ));
        Ok(change)
    }

    /// Soft-deletes a milestone.
    pub async fn delete_milestone(&self, timeline_id: u64, params: &Id) -> Result<Milestone> {
        let id = params.id;
        let milestone = self
            .with_database(move |db| db.delete_milestone(timeline_id, id))
            .await?;

        self.publish(&MilestoneEvent::deleted(milestone.clone()));
        Ok(milestone)
    }

    /// Retrieves a live milestone by its ID.
    pub async fn get_milestone(&self, params: &Id) -> Result<Option<Milestone>> {
        let id = params.id;
        self.with_database(move |db| db.get_milestone(id)).await
    }

    /// Lists a timeline's milestones in position order.
    pub async fn list_milestones(&self, params: &ListMilestones) -> Result<Vec<Milestone>> {
        let params = params.clone();
        self.with_database(move |db| db.list_milestones(&params))
            .await
    }
}
