//! Parameter structures for waypoint operations.
//!
//! These structures are shared by every interface (the CLI today, an HTTP
//! handler tomorrow) and carry no framework-specific derives beyond serde.
//! Interface layers build them from their own argument types via `From`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   Scheduler     │
//! │  (clap derives) │───▶│ (serde derives) │───▶│  (validation)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! On update structures a field set to `None` means "leave unchanged". For
//! nullable columns the field is an `Option<Option<T>>`: `Some(None)` clears
//! the value, which over JSON is spelled as an explicit `null`.

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{error::Result, models::MilestoneStatus, ScheduleError};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeline {
    /// Name of the timeline (required)
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// First day of the timeline
    pub start_date: Date,
    /// Optional last day of the timeline
    pub end_date: Option<Date>,
    /// Kind of the owning entity, e.g. "project"
    pub reference: String,
    /// Identifier of the owning entity
    pub reference_id: u64,
}

impl CreateTimeline {
    /// Checks required fields and the timeline's own date range.
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        if self.reference.trim().is_empty() {
            return Err(ScheduleError::invalid_input("reference").with_reason("must not be empty"));
        }
        if let Some(end_date) = self.end_date {
            if self.start_date > end_date {
                return Err(ScheduleError::invalid_input("end_date").with_reason(format!(
                    "end date {end_date} is before start date {}",
                    self.start_date
                )));
            }
        }
        Ok(())
    }
}

/// Parameters for listing the timelines owned by one entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineRef {
    /// Kind of the owning entity
    pub reference: String,
    /// Identifier of the owning entity
    pub reference_id: u64,
}

/// Parameters for creating a milestone at a caller-chosen position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMilestone {
    /// ID of the timeline to attach the milestone to
    pub timeline_id: u64,
    /// Name of the milestone (required)
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Planned length in days, must be positive
    pub duration: u32,
    /// Planned first day
    pub start_date: Date,
    /// Planned last day
    pub end_date: Option<Date>,
    /// Day work actually started
    #[serde(default)]
    pub actual_start_date: Option<Date>,
    /// Day work finished
    #[serde(default)]
    pub completion_date: Option<Date>,
    /// Initial status
    #[serde(default)]
    pub status: MilestoneStatus,
    /// Milestone category
    #[serde(rename = "type")]
    pub milestone_type: String,
    /// Initial JSON details
    #[serde(default)]
    pub details: Option<Value>,
    /// Position within the timeline; must not be held by a live sibling
    pub order: u32,
    /// Text shown while planned
    #[serde(default)]
    pub planned_text: Option<String>,
    /// Text shown while active
    #[serde(default)]
    pub active_text: Option<String>,
    /// Text shown once completed
    #[serde(default)]
    pub completed_text: Option<String>,
    /// Text shown while blocked
    #[serde(default)]
    pub blocked_text: Option<String>,
    /// Whether the milestone starts hidden
    #[serde(default)]
    pub hidden: bool,
}

impl CreateMilestone {
    /// Checks field-level input rules. Temporal rules against the timeline
    /// are checked separately once the timeline is loaded.
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        require_positive_duration(self.duration)?;
        require_object_details(self.details.as_ref())
    }
}

/// Parameters for a partial milestone update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMilestone {
    /// Timeline the milestone is expected to belong to
    pub timeline_id: u64,
    /// Milestone to update
    pub id: u64,
    /// New name
    pub name: Option<String>,
    /// New description; `Some(None)` clears it
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    /// New planned length in days
    pub duration: Option<u32>,
    /// New planned start
    pub start_date: Option<Date>,
    /// New planned end; `Some(None)` clears it
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<Date>>,
    /// New actual start; `Some(None)` clears it
    #[serde(default, deserialize_with = "double_option")]
    pub actual_start_date: Option<Option<Date>>,
    /// New completion date; `Some(None)` clears it
    #[serde(default, deserialize_with = "double_option")]
    pub completion_date: Option<Option<Date>>,
    /// New status
    pub status: Option<MilestoneStatus>,
    /// New category
    #[serde(rename = "type")]
    pub milestone_type: Option<String>,
    /// Details to merge into the existing ones
    pub details: Option<Value>,
    /// Requested new position
    pub order: Option<u32>,
    /// New planned text; `Some(None)` clears it
    #[serde(default, deserialize_with = "double_option")]
    pub planned_text: Option<Option<String>>,
    /// New active text; `Some(None)` clears it
    #[serde(default, deserialize_with = "double_option")]
    pub active_text: Option<Option<String>>,
    /// New completed text; `Some(None)` clears it
    #[serde(default, deserialize_with = "double_option")]
    pub completed_text: Option<Option<String>>,
    /// New blocked text; `Some(None)` clears it
    #[serde(default, deserialize_with = "double_option")]
    pub blocked_text: Option<Option<String>>,
    /// New hidden flag
    pub hidden: Option<bool>,
}

impl UpdateMilestone {
    /// Checks field-level input rules on the fields that are present.
    ///
    /// ```rust
    /// use waypoint_core::params::UpdateMilestone;
    ///
    /// let mut params = UpdateMilestone::default();
    /// params.duration = Some(0);
    /// assert!(params.validate().is_err());
    ///
    /// params.duration = Some(3);
    /// assert!(params.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_name(name)?;
        }
        if let Some(duration) = self.duration {
            require_positive_duration(duration)?;
        }
        require_object_details(self.details.as_ref())
    }
}

/// Parameters for listing a timeline's milestones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMilestones {
    /// Timeline to list
    pub timeline_id: u64,
    /// Include hidden milestones
    #[serde(default)]
    pub include_hidden: bool,
    /// Include soft-deleted milestones (administrative reconciliation)
    #[serde(default)]
    pub include_deleted: bool,
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ScheduleError::invalid_input("name").with_reason("must not be empty"));
    }
    Ok(())
}

fn require_positive_duration(duration: u32) -> Result<()> {
    if duration == 0 {
        return Err(
            ScheduleError::invalid_input("duration").with_reason("must be a positive number of days")
        );
    }
    Ok(())
}

fn require_object_details(details: Option<&Value>) -> Result<()> {
    match details {
        Some(value) if !value.is_object() => {
            Err(ScheduleError::invalid_input("details").with_reason("must be a JSON object"))
        }
        _ => Ok(()),
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing field
/// (`None`, via `#[serde(default)]`).
fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
