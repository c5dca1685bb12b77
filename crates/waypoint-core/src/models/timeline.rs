//! Timeline model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// A bounded date range that owns an ordered collection of milestones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timeline {
    /// Unique identifier for the timeline
    pub id: u64,

    /// Display name of the timeline
    pub name: String,

    /// Optional longer description
    pub description: Option<String>,

    /// First day milestones may start on
    pub start_date: Date,

    /// Last day milestones may end on, if bounded
    pub end_date: Option<Date>,

    /// Kind of the owning entity (e.g. "project" or "phase")
    pub reference: String,

    /// Identifier of the owning entity
    pub reference_id: u64,

    /// Timestamp when the timeline was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the timeline was last modified (UTC)
    pub updated_at: Timestamp,

    /// Soft-delete marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

impl Timeline {
    /// Whether the timeline has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
