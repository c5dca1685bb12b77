//! Scheduling logic independent of storage.
//!
//! - [`validator`]: temporal rules between a milestone and its timeline
//! - [`reorder`]: position reassignment when a milestone moves
//! - [`progress`]: duration and completion figures for a timeline
//! - [`orchestrator`]: the create, update and delete pipelines tying these
//!   together over a [`MilestoneRepository`]

pub mod orchestrator;
pub mod progress;
pub mod reorder;
pub mod repository;
pub mod validator;

pub use orchestrator::{create_milestone, delete_milestone, update_milestone, MilestoneChange};
pub use progress::{compute_duration_and_progress, inclusive_days, TimelineProgress};
pub use reorder::{is_occupied, reassign, OrderPatch, OrderSlot, Reassignment};
pub use repository::MilestoneRepository;
pub use validator::{check_dates, ensure_valid, validate, MilestoneDates, Violation};
