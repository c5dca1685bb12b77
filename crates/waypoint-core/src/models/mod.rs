//! Data models for timelines and milestones.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so that data and presentation stay apart.
//!
//! # Examples
//!
//! ```rust
//! use jiff::{civil::date, Timestamp};
//! use waypoint_core::models::{Milestone, MilestoneStatus};
//!
//! let milestone = Milestone {
//!     id: 1,
//!     timeline_id: 1,
//!     name: "Design review".to_string(),
//!     duration: 5,
//!     start_date: date(2024, 3, 1),
//!     end_date: Some(date(2024, 3, 5)),
//!     status: MilestoneStatus::Active,
//!     active_text: Some("Reviewing".to_string()),
//!     order: 0,
//! #   description: None,
//! #   actual_start_date: None,
//! #   completion_date: None,
//! #   milestone_type: "review".to_string(),
//! #   details: serde_json::json!({}),
//! #   planned_text: None,
//! #   completed_text: None,
//! #   blocked_text: None,
//! #   hidden: false,
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! #   deleted_at: None,
//! };
//! assert_eq!(milestone.status_text(), Some("Reviewing"));
//! assert_eq!(milestone.effective_end(), Some(date(2024, 3, 5)));
//! ```

pub mod milestone;
pub mod status;
pub mod timeline;


pub use milestone::{merge_details, Milestone};
pub use status::MilestoneStatus;
pub use timeline::Timeline;
