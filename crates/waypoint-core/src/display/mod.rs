//! Display formatting and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections and operation results so
//! the same data can read differently as a list entry, a creation
//! confirmation or an update summary. Everything renders as markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Result & List   │    │   Formatted     │
//! │ (Timeline, ...) │───▶│    Wrappers     │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: `Timelines`, `Milestones`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`datetime`]: timestamp and date range formatting
//! - [`models`]: Display for `Timeline`, `Milestone`, `TimelineProgress`

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Milestones, Timelines};
pub use datetime::{DateRange, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
