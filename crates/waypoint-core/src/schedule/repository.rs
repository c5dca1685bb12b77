//! Storage seam between the scheduling logic and the backing store.

use jiff::Timestamp;

use super::OrderPatch;
use crate::{
    error::Result,
    models::{Milestone, Timeline},
    params::CreateMilestone,
};

/// Reads and writes the orchestrator needs.
///
/// Implementations are expected to run every call of one operation inside
/// a single transaction; see [`crate::db::Database::run_atomic`].
pub trait MilestoneRepository {
    /// Looks up a timeline, soft-deleted or not.
    fn find_timeline_by_id(&self, id: u64) -> Result<Option<Timeline>>;

    /// Looks up a milestone, soft-deleted or not.
    fn find_milestone_by_id(&self, id: u64) -> Result<Option<Milestone>>;

    /// Live milestones of a timeline, ordered by position.
    fn find_non_deleted_milestones_by_timeline(&self, timeline_id: u64) -> Result<Vec<Milestone>>;

    /// Inserts a milestone and returns it with its new ID.
    fn insert_milestone(&self, params: &CreateMilestone, now: Timestamp) -> Result<Milestone>;

    /// Writes every field of `milestone` except its position.
    fn save_milestone_fields(&self, milestone: &Milestone) -> Result<()>;

    /// Writes a batch of positions. The batch as a whole must keep positions
    /// unique even if individual writes would collide midway.
    fn apply_milestone_patches(&self, patches: &[OrderPatch], now: Timestamp) -> Result<()>;

    /// Sets the soft-delete marker.
    fn mark_milestone_deleted(&self, id: u64, now: Timestamp) -> Result<()>;
}
