//! SQLite storage for timelines and milestones.
//!
//! [`Database`] owns one connection. Every write runs inside a
//! `BEGIN IMMEDIATE` transaction so concurrent writers against the same file
//! serialize on the write lock instead of interleaving; a writer that cannot
//! get the lock within the busy timeout fails with
//! [`ScheduleError::Conflict`](crate::ScheduleError::Conflict).

use std::{path::Path, time::Duration};

use log::{info, warn};
use rusqlite::{Connection, TransactionBehavior};

use crate::error::{DatabaseResultExt, ErrorKind, Result};

pub mod migrations;
pub mod milestone_queries;
pub mod rows;
pub mod store;
pub mod timeline_queries;

pub use store::Store;

/// Default time a writer waits for the SQLite write lock.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.set_busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
        db.initialize_schema()?;
        Ok(db)
    }

    /// Sets how long a writer waits on a locked database before giving up.
    pub fn set_busy_timeout(&self, timeout: Duration) -> Result<()> {
        self.connection
            .busy_timeout(timeout)
            .db_context("Failed to set busy timeout")
    }

    /// Read-only view over the connection for queries outside a transaction.
    pub fn store(&self) -> Store<'_> {
        Store::new(&self.connection)
    }

    /// Runs `operation` inside one immediate transaction.
    ///
    /// The transaction commits only if `operation` returns `Ok`; any error
    /// rolls back every write it made.
    pub fn run_atomic<T, F>(&mut self, label: &str, operation: F) -> Result<T>
    where
        F: FnOnce(&Store<'_>) -> Result<T>,
    {
        let outcome = self.try_atomic(operation);
        match &outcome {
            Ok(_) => info!("Committed {label}"),
            Err(e) if e.kind() == ErrorKind::Conflict => {
                warn!("Rolled back {label} on conflict: {e}");
            }
            Err(_) => {}
        }
        outcome
    }

    fn try_atomic<T, F>(&mut self, operation: F) -> Result<T>
    where
        F: FnOnce(&Store<'_>) -> Result<T>,
    {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let value = operation(&Store::new(&tx))?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(value)
    }
}
