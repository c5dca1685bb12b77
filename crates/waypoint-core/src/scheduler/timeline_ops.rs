//! Timeline operations for the Scheduler.

use super::Scheduler;
use crate::{
    error::Result,
    models::Timeline,
    params::{CreateTimeline, Id, TimelineRef},
    schedule::TimelineProgress,
};

impl Scheduler {
    /// Creates a new timeline.
    pub async fn create_timeline(&self, params: &CreateTimeline) -> Result<Timeline> {
        let params = params.clone();
        self.with_database(move |db| db.create_timeline(&params))
            .await
    }

    /// Retrieves a live timeline by its ID.
    pub async fn get_timeline(&self, params: &Id) -> Result<Option<Timeline>> {
        let id = params.id;
        self.with_database(move |db| db.get_timeline(id)).await
    }

    /// Lists the live timelines owned by one entity.
    pub async fn list_timelines(&self, params: &TimelineRef) -> Result<Vec<Timeline>> {
        let owner = params.clone();
        self.with_database(move |db| db.list_timelines(&owner))
            .await
    }

    /// Soft-deletes a timeline and returns it as deleted.
    pub async fn delete_timeline(&self, params: &Id) -> Result<Timeline> {
        let id = params.id;
        self.with_database(move |db| db.delete_timeline(id)).await
    }

    /// Hard-deletes a timeline and all of its milestones. Administrative use
    /// only; no events are published for the removed milestones.
    pub async fn purge_timeline(&self, params: &Id) -> Result<usize> {
        let id = params.id;
        self.with_database(move |db| db.purge_timeline(id)).await
    }

    /// Computes duration and completion progress for a timeline.
    pub async fn timeline_progress(&self, params: &Id) -> Result<TimelineProgress> {
        let id = params.id;
        self.with_database(move |db| db.timeline_progress(id))
            .await
    }
}
