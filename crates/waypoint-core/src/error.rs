//! Error types for the scheduling library.

use std::fmt;
use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

use crate::schedule::Violation;

/// Comprehensive error type for all scheduling operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// The write transaction lost a race with another writer and was rolled
    /// back. Safe to retry.
    #[error("Conflicting concurrent modification: {message}")]
    Conflict {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Timeline not found (or soft-deleted) for the given ID
    #[error("Timeline with ID {id} not found")]
    TimelineNotFound { id: u64 },
    /// Milestone not found (or soft-deleted) for the given ID
    #[error("Milestone with ID {id} not found")]
    MilestoneNotFound { id: u64 },
    /// One or more temporal rules failed; nothing was written
    #[error("Validation failed: {}", format_violations(.violations))]
    Validation { violations: Vec<Violation> },
    /// A new milestone asked for a position a live sibling already holds
    #[error("Order {order} is already taken in timeline {timeline_id}")]
    OrderOccupied { timeline_id: u64, order: u32 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{}: {violation}", violation.field()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Coarse classification callers use to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    /// HTTP-style status code conventionally paired with the kind.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 422,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Internal => 500,
        }
    }

    /// Machine-readable code, e.g. `VALIDATION_ERROR`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    ///
    /// Lock contention and unique-index collisions become
    /// [`ScheduleError::Conflict`]; everything else is a plain database error.
    pub fn with_source(self, source: rusqlite::Error) -> ScheduleError {
        if is_conflict(&source) {
            ScheduleError::Conflict {
                message: self.message,
                source,
            }
        } else {
            ScheduleError::Database {
                message: self.message,
                source,
            }
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ScheduleError {
        ScheduleError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ScheduleError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Classifies the error into the caller-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScheduleError::Validation { .. }
            | ScheduleError::OrderOccupied { .. }
            | ScheduleError::InvalidInput { .. } => ErrorKind::Validation,
            ScheduleError::TimelineNotFound { .. } | ScheduleError::MilestoneNotFound { .. } => {
                ErrorKind::NotFound
            }
            ScheduleError::Conflict { .. } => ErrorKind::Conflict,
            ScheduleError::Database { .. }
            | ScheduleError::FileSystem { .. }
            | ScheduleError::XdgDirectory(_)
            | ScheduleError::Serialization { .. }
            | ScheduleError::Configuration { .. } => ErrorKind::Internal,
        }
    }

    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    /// The violated temporal rules, if this is a validation failure.
    pub fn violations(&self) -> &[Violation] {
        match self {
            ScheduleError::Validation { violations } => violations,
            _ => &[],
        }
    }
}

fn is_conflict(error: &rusqlite::Error) -> bool {
    match error {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => true,
            ErrorCode::ConstraintViolation => {
                failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            }
            _ => false,
        },
        _ => false,
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| ScheduleError::database(message).with_source(e))
    }
}

/// Result type alias for scheduling operations
pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn sqlite_failure(extended: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(extended), None)
    }

    #[test]
    fn test_busy_maps_to_conflict() {
        let error = ScheduleError::database("Failed to begin transaction").with_source(
            sqlite_failure(rusqlite::ffi::SQLITE_BUSY),
        );
        assert!(matches!(error, ScheduleError::Conflict { .. }));
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert!(error.is_retryable());
    }

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let error = ScheduleError::database("Failed to apply order patch").with_source(
            sqlite_failure(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE),
        );
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_other_failures_are_internal() {
        let error = ScheduleError::database("Failed to query")
            .with_source(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(error, ScheduleError::Database { .. }));
        assert_eq!(error.kind().status_code(), 500);
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_kind_codes() {
        let error = ScheduleError::MilestoneNotFound { id: 7 };
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.kind().as_str(), "NOT_FOUND");

        let error = ScheduleError::Validation { violations: vec![] };
        assert_eq!(error.kind().status_code(), 422);
        assert!(error.violations().is_empty());
    }

    #[test]
    fn test_validation_message_names_fields() {
        let error = ScheduleError::Validation {
            violations: vec![
                Violation::StartsBeforeTimeline {
                    start_date: date(2023, 12, 1),
                    timeline_start: date(2024, 1, 1),
                },
                Violation::EndsAfterTimeline {
                    end_date: date(2025, 1, 3),
                    timeline_end: date(2024, 12, 31),
                },
            ],
        };
        assert_eq!(
            error.to_string(),
            "Validation failed: start_date: start date 2023-12-01 is before the timeline \
             start 2024-01-01; end_date: end date 2025-01-03 is after the timeline end 2024-12-31"
        );
    }
}
