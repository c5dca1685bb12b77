//! Core library for Waypoint, a timeline and milestone scheduler.
//!
//! A timeline is a dated container owned by some external entity; its
//! milestones are ordered units of work. The crate keeps milestone positions
//! unique within a timeline while they move around, enforces date
//! consistency between milestones and their timeline, and reports progress.
//!
//! # Layers
//!
//! - [`schedule`]: storage-free rules (validation, reordering, progress) and
//!   the pipelines combining them
//! - [`db`]: SQLite persistence; every write is one immediate transaction
//! - [`scheduler`]: async facade that also publishes [`events`] after commit
//! - [`display`]: markdown formatting for terminal output
//!
//! # Quick Start
//!
//! ```rust
//! use jiff::civil::date;
//! use waypoint_core::{
//!     models::MilestoneStatus,
//!     params::{CreateMilestone, CreateTimeline, UpdateMilestone},
//!     SchedulerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path("roadmap.db")
//!     .build()
//!     .await?;
//!
//! let timeline = scheduler
//!     .create_timeline(&CreateTimeline {
//!         name: "Q3 roadmap".to_string(),
//!         description: None,
//!         start_date: date(2024, 7, 1),
//!         end_date: Some(date(2024, 9, 30)),
//!         reference: "team".to_string(),
//!         reference_id: 3,
//!     })
//!     .await?;
//!
//! let milestone = scheduler
//!     .create_milestone(&CreateMilestone {
//!         timeline_id: timeline.id,
//!         name: "Beta".to_string(),
//!         description: None,
//!         duration: 10,
//!         start_date: date(2024, 7, 15),
//!         end_date: Some(date(2024, 7, 24)),
//!         actual_start_date: None,
//!         completion_date: None,
//!         status: MilestoneStatus::Planned,
//!         milestone_type: "release".to_string(),
//!         details: None,
//!         order: 1,
//!         planned_text: None,
//!         active_text: None,
//!         completed_text: None,
//!         blocked_text: None,
//!         hidden: false,
//!     })
//!     .await?;
//!
//! // Move it to the front; siblings in between shift as needed.
//! let change = scheduler
//!     .update_milestone(&UpdateMilestone {
//!         timeline_id: timeline.id,
//!         id: milestone.id,
//!         order: Some(0),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{}", change.current);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod events;
pub mod models;
pub mod params;
pub mod schedule;
pub mod scheduler;

// Re-export commonly used types
pub use db::Database;
pub use display::{CreateResult, DeleteResult, LocalDateTime, Milestones, Timelines, UpdateResult};
pub use error::{ErrorKind, Result, ScheduleError};
pub use events::{EventKind, EventSink, LogEventSink, MilestoneEvent};
pub use models::{Milestone, MilestoneStatus, Timeline};
pub use params::{CreateMilestone, CreateTimeline, Id, ListMilestones, TimelineRef, UpdateMilestone};
pub use schedule::{MilestoneChange, TimelineProgress, Violation};
pub use scheduler::{Scheduler, SchedulerBuilder};
