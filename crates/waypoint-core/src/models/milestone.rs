//! Milestone model definition and field merging.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::MilestoneStatus;
use crate::params::UpdateMilestone;

/// A single scheduled unit of work within a timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    /// Unique identifier for the milestone
    pub id: u64,

    /// ID of the owning timeline
    pub timeline_id: u64,

    /// Display name of the milestone
    pub name: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Planned length in days (always positive)
    pub duration: u32,

    /// Planned first day
    pub start_date: Date,

    /// Planned last day
    pub end_date: Option<Date>,

    /// Day work actually started, when it differs from the plan
    pub actual_start_date: Option<Date>,

    /// Day work finished
    pub completion_date: Option<Date>,

    /// Current status
    pub status: MilestoneStatus,

    /// Caller-defined milestone category
    #[serde(rename = "type")]
    pub milestone_type: String,

    /// Free-form JSON details, merged on update
    #[serde(default)]
    pub details: Value,

    /// Position within the timeline; unique among live siblings
    pub order: u32,

    /// Text shown while the milestone is planned
    pub planned_text: Option<String>,

    /// Text shown while the milestone is active
    pub active_text: Option<String>,

    /// Text shown once the milestone is completed
    pub completed_text: Option<String>,

    /// Text shown while the milestone is blocked
    pub blocked_text: Option<String>,

    /// Hidden milestones are left out of progress and default listings
    #[serde(default)]
    pub hidden: bool,

    /// Timestamp when the milestone was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the milestone was last modified (UTC)
    pub updated_at: Timestamp,

    /// Soft-delete marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

impl Milestone {
    /// Actual start if recorded, otherwise the planned start.
    pub fn effective_start(&self) -> Date {
        self.actual_start_date.unwrap_or(self.start_date)
    }

    /// Completion date if recorded, otherwise the planned end.
    pub fn effective_end(&self) -> Option<Date> {
        self.completion_date.or(self.end_date)
    }

    /// Whether the milestone has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Display text configured for the current status, if any.
    pub fn status_text(&self) -> Option<&str> {
        match self.status {
            MilestoneStatus::Planned => self.planned_text.as_deref(),
            MilestoneStatus::Active => self.active_text.as_deref(),
            MilestoneStatus::Completed => self.completed_text.as_deref(),
            MilestoneStatus::Blocked => self.blocked_text.as_deref(),
            MilestoneStatus::Custom(_) => None,
        }
    }

    /// Returns a copy with `changes` applied.
    ///
    /// Fields absent from `changes` keep their current value; `details` is
    /// merged key by key rather than replaced. `order` is left alone here and
    /// handled by the reassignment engine.
    pub fn merged(&self, changes: &UpdateMilestone) -> Milestone {
        let mut merged = self.clone();

        if let Some(name) = &changes.name {
            merged.name.clone_from(name);
        }
        if let Some(description) = &changes.description {
            merged.description.clone_from(description);
        }
        if let Some(duration) = changes.duration {
            merged.duration = duration;
        }
        if let Some(start_date) = changes.start_date {
            merged.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            merged.end_date = end_date;
        }
        if let Some(actual_start_date) = changes.actual_start_date {
            merged.actual_start_date = actual_start_date;
        }
        if let Some(completion_date) = changes.completion_date {
            merged.completion_date = completion_date;
        }
        if let Some(status) = &changes.status {
            merged.status = status.clone();
        }
        if let Some(milestone_type) = &changes.milestone_type {
            merged.milestone_type.clone_from(milestone_type);
        }
        if let Some(details) = &changes.details {
            merge_details(&mut merged.details, details);
        }
        if let Some(text) = &changes.planned_text {
            merged.planned_text.clone_from(text);
        }
        if let Some(text) = &changes.active_text {
            merged.active_text.clone_from(text);
        }
        if let Some(text) = &changes.completed_text {
            merged.completed_text.clone_from(text);
        }
        if let Some(text) = &changes.blocked_text {
            merged.blocked_text.clone_from(text);
        }
        if let Some(hidden) = changes.hidden {
            merged.hidden = hidden;
        }

        merged
    }
}

/// Deep-merges `patch` into `target`.
///
/// Objects merge recursively; any other value in `patch` overwrites the one
/// in `target`. A non-object target is replaced by an empty object first.
pub fn merge_details(target: &mut Value, patch: &Value) {
    let Value::Object(patch_map) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }

    if let Value::Object(target_map) = target {
        for (key, value) in patch_map {
            match target_map.get_mut(key) {
                Some(existing) if existing.is_object() && value.is_object() => {
                    merge_details(existing, value);
                }
                _ => {
                    target_map.insert(key.clone(), value.clone());
                }
            }
        }
    }
}
