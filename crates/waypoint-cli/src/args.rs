//! Command-line argument definitions using clap.
//!
//! Argument structs carry clap derives only; each converts into the matching
//! core parameter type via `From`, so core types stay free of CLI concerns.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Scheduler
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::Date;
use serde_json::Value;
use waypoint_core::{
    params::{
        CreateMilestone, CreateTimeline, Id, ListMilestones, TimelineRef, UpdateMilestone,
    },
    MilestoneStatus,
};

/// Timeline and milestone scheduler
///
/// Waypoint keeps dated timelines of ordered milestones. Milestones can be
/// moved freely; siblings shift only when a milestone lands on an occupied
/// position.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waypoint/waypoint.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Milliseconds a write waits for the database lock before failing
    #[arg(long, global = true, default_value_t = 5000)]
    pub busy_timeout_ms: u64,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage timelines
    #[command(alias = "t")]
    Timeline {
        #[command(subcommand)]
        command: TimelineCommands,
    },
    /// Manage milestones within timelines
    #[command(alias = "m")]
    Milestone {
        #[command(subcommand)]
        command: MilestoneCommands,
    },
}

fn parse_details(raw: &str) -> Result<Value, String> {
    let value: Value = serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err("details must be a JSON object".to_string())
    }
}

/// Create a new timeline
#[derive(clap::Args)]
pub struct CreateTimelineArgs {
    /// Name of the timeline
    pub name: String,
    /// First day of the timeline (YYYY-MM-DD)
    #[arg(long)]
    pub start: Date,
    /// Last day of the timeline (YYYY-MM-DD); open-ended if omitted
    #[arg(long)]
    pub end: Option<Date>,
    /// Kind of the owning entity, e.g. "project"
    #[arg(long)]
    pub reference: String,
    /// Identifier of the owning entity
    #[arg(long)]
    pub reference_id: u64,
    /// Optional description
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<CreateTimelineArgs> for CreateTimeline {
    fn from(val: CreateTimelineArgs) -> Self {
        CreateTimeline {
            name: val.name,
            description: val.description,
            start_date: val.start,
            end_date: val.end,
            reference: val.reference,
            reference_id: val.reference_id,
        }
    }
}

/// Show a timeline with its milestones and progress
#[derive(clap::Args)]
pub struct ShowTimelineArgs {
    /// ID of the timeline
    pub id: u64,
    /// Include hidden milestones
    #[arg(long)]
    pub all: bool,
}

/// List the timelines of one owner
#[derive(clap::Args)]
pub struct ListTimelinesArgs {
    /// Kind of the owning entity
    #[arg(long)]
    pub reference: String,
    /// Identifier of the owning entity
    #[arg(long)]
    pub reference_id: u64,
}

impl From<ListTimelinesArgs> for TimelineRef {
    fn from(val: ListTimelinesArgs) -> Self {
        TimelineRef {
            reference: val.reference,
            reference_id: val.reference_id,
        }
    }
}

/// Identify a timeline by ID
#[derive(clap::Args)]
pub struct TimelineIdArgs {
    /// ID of the timeline
    pub id: u64,
}

impl From<TimelineIdArgs> for Id {
    fn from(val: TimelineIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum TimelineCommands {
    /// Create a new timeline
    #[command(alias = "c")]
    Create(CreateTimelineArgs),
    /// Show a timeline with its milestones
    #[command(alias = "s")]
    Show(ShowTimelineArgs),
    /// List timelines for an owner
    #[command(alias = "l")]
    List(ListTimelinesArgs),
    /// Soft-delete a timeline
    #[command(aliases = ["d", "rm"])]
    Delete(TimelineIdArgs),
    /// Show duration and completion progress
    #[command(alias = "p")]
    Progress(TimelineIdArgs),
}

/// Add a milestone at a free position
#[derive(clap::Args)]
pub struct AddMilestoneArgs {
    /// ID of the timeline
    pub timeline_id: u64,
    /// Name of the milestone
    pub name: String,
    /// Position within the timeline; must be free
    #[arg(long)]
    pub order: u32,
    /// Planned first day (YYYY-MM-DD)
    #[arg(long)]
    pub start: Date,
    /// Planned length in days
    #[arg(long)]
    pub duration: u32,
    /// Planned last day (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<Date>,
    /// Milestone category
    #[arg(long = "type", default_value = "milestone")]
    pub milestone_type: String,
    /// Initial status (planned, active, completed, blocked or any custom value)
    #[arg(long, default_value = "planned")]
    pub status: MilestoneStatus,
    /// Optional description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Free-form details as a JSON object
    #[arg(long, value_parser = parse_details)]
    pub details: Option<Value>,
    /// Text shown while planned
    #[arg(long)]
    pub planned_text: Option<String>,
    /// Text shown while active
    #[arg(long)]
    pub active_text: Option<String>,
    /// Text shown once completed
    #[arg(long)]
    pub completed_text: Option<String>,
    /// Text shown while blocked
    #[arg(long)]
    pub blocked_text: Option<String>,
    /// Leave the milestone out of progress and default listings
    #[arg(long)]
    pub hidden: bool,
}

impl From<AddMilestoneArgs> for CreateMilestone {
    fn from(val: AddMilestoneArgs) -> Self {
        CreateMilestone {
            timeline_id: val.timeline_id,
            name: val.name,
            description: val.description,
            duration: val.duration,
            start_date: val.start,
            end_date: val.end,
            actual_start_date: None,
            completion_date: None,
            status: val.status,
            milestone_type: val.milestone_type,
            details: val.details,
            order: val.order,
            planned_text: val.planned_text,
            active_text: val.active_text,
            completed_text: val.completed_text,
            blocked_text: val.blocked_text,
            hidden: val.hidden,
        }
    }
}

/// Update a milestone; only the given fields change
#[derive(clap::Args)]
pub struct UpdateMilestoneArgs {
    /// ID of the timeline the milestone belongs to
    pub timeline_id: u64,
    /// ID of the milestone
    pub id: u64,
    /// New position; siblings shift only if it is occupied
    #[arg(long)]
    pub order: Option<u32>,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New description
    #[arg(short, long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,
    /// New planned length in days
    #[arg(long)]
    pub duration: Option<u32>,
    /// New planned first day
    #[arg(long)]
    pub start: Option<Date>,
    /// New planned last day
    #[arg(long, conflicts_with = "clear_end")]
    pub end: Option<Date>,
    /// Remove the planned last day
    #[arg(long)]
    pub clear_end: bool,
    /// Day work actually started
    #[arg(long)]
    pub actual_start: Option<Date>,
    /// Day work finished
    #[arg(long, conflicts_with = "clear_completion")]
    pub completed_on: Option<Date>,
    /// Remove the completion date
    #[arg(long)]
    pub clear_completion: bool,
    /// New status
    #[arg(long)]
    pub status: Option<MilestoneStatus>,
    /// New category
    #[arg(long = "type")]
    pub milestone_type: Option<String>,
    /// Details to merge into the existing ones, as a JSON object
    #[arg(long, value_parser = parse_details)]
    pub details: Option<Value>,
    /// Text shown while planned
    #[arg(long)]
    pub planned_text: Option<String>,
    /// Text shown while active
    #[arg(long)]
    pub active_text: Option<String>,
    /// Text shown once completed
    #[arg(long)]
    pub completed_text: Option<String>,
    /// Text shown while blocked
    #[arg(long)]
    pub blocked_text: Option<String>,
    /// Hide or unhide the milestone
    #[arg(long)]
    pub hidden: Option<bool>,
}

/// `Some(None)` when clearing, `Some(Some(v))` when setting, `None` otherwise.
fn nullable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

impl From<UpdateMilestoneArgs> for UpdateMilestone {
    fn from(val: UpdateMilestoneArgs) -> Self {
        UpdateMilestone {
            timeline_id: val.timeline_id,
            id: val.id,
            name: val.name,
            description: nullable(val.description, val.clear_description),
            duration: val.duration,
            start_date: val.start,
            end_date: nullable(val.end, val.clear_end),
            actual_start_date: val.actual_start.map(Some),
            completion_date: nullable(val.completed_on, val.clear_completion),
            status: val.status,
            milestone_type: val.milestone_type,
            details: val.details,
            order: val.order,
            planned_text: val.planned_text.map(Some),
            active_text: val.active_text.map(Some),
            completed_text: val.completed_text.map(Some),
            blocked_text: val.blocked_text.map(Some),
            hidden: val.hidden,
        }
    }
}

/// Identify a milestone by ID
#[derive(clap::Args)]
pub struct ShowMilestoneArgs {
    /// ID of the milestone
    pub id: u64,
}

impl From<ShowMilestoneArgs> for Id {
    fn from(val: ShowMilestoneArgs) -> Self {
        Id { id: val.id }
    }
}

/// List a timeline's milestones in order
#[derive(clap::Args)]
pub struct ListMilestonesArgs {
    /// ID of the timeline
    pub timeline_id: u64,
    /// Include hidden milestones
    #[arg(long)]
    pub all: bool,
    /// Include soft-deleted milestones
    #[arg(long)]
    pub deleted: bool,
}

impl From<ListMilestonesArgs> for ListMilestones {
    fn from(val: ListMilestonesArgs) -> Self {
        ListMilestones {
            timeline_id: val.timeline_id,
            include_hidden: val.all,
            include_deleted: val.deleted,
        }
    }
}

/// Soft-delete a milestone
#[derive(clap::Args)]
pub struct DeleteMilestoneArgs {
    /// ID of the timeline the milestone belongs to
    pub timeline_id: u64,
    /// ID of the milestone
    pub id: u64,
}

#[derive(Subcommand)]
pub enum MilestoneCommands {
    /// Add a milestone at a free position
    #[command(alias = "a")]
    Add(AddMilestoneArgs),
    /// Update a milestone, optionally moving it
    #[command(alias = "u")]
    Update(UpdateMilestoneArgs),
    /// Show a milestone
    #[command(alias = "s")]
    Show(ShowMilestoneArgs),
    /// List a timeline's milestones
    #[command(alias = "l")]
    List(ListMilestonesArgs),
    /// Soft-delete a milestone
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteMilestoneArgs),
}
