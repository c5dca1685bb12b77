//! Async scheduling API over the SQLite store.
//!
//! [`Scheduler`] is the entry point interfaces use. Each call opens its own
//! connection on a blocking thread, runs one store operation and, for
//! writes, publishes a [`MilestoneEvent`] once the transaction has
//! committed.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Scheduler    │    │    Database     │    │    schedule     │
//! │ (async, events) │───▶│ (transactions)  │───▶│ (rules, reorder)│
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use waypoint_core::{params::CreateTimeline, SchedulerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path("/tmp/waypoint.db")
//!     .build()
//!     .await?;
//!
//! let timeline = scheduler
//!     .create_timeline(&CreateTimeline {
//!         name: "Launch".to_string(),
//!         description: None,
//!         start_date: date(2024, 1, 1),
//!         end_date: Some(date(2024, 6, 30)),
//!         reference: "project".to_string(),
//!         reference_id: 7,
//!     })
//!     .await?;
//! println!("{timeline}");
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, ScheduleError},
    events::{EventSink, MilestoneEvent},
};

pub mod builder;
pub mod milestone_ops;
pub mod timeline_ops;


pub use builder::SchedulerBuilder;

/// Main interface for managing timelines and milestones.
pub struct Scheduler {
    db_path: PathBuf,
    busy_timeout: Duration,
    events: Arc<dyn EventSink>,
}

impl Scheduler {
    pub(crate) fn new(db_path: PathBuf, busy_timeout: Duration, events: Arc<dyn EventSink>) -> Self {
        Self {
            db_path,
            busy_timeout,
            events,
        }
    }

    /// Path of the SQLite file this scheduler works on.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `operation` against a fresh connection on the blocking pool.
    async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        let busy_timeout = self.busy_timeout;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_busy_timeout(busy_timeout)?;
            operation(&mut db)
        })
        .await
        .map_err(|e| ScheduleError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    fn publish(&self, event: &MilestoneEvent) {
        self.events.publish(event);
    }
}
