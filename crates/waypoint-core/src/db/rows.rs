//! Row to model conversion.
//!
//! Dates are stored as ISO `YYYY-MM-DD` text, timestamps as RFC 3339 text and
//! `details` as JSON text.

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};
use serde_json::Value;

use crate::models::{Milestone, MilestoneStatus, Timeline};

/// Column list shared by every timeline SELECT, matching [`timeline_from_row`].
pub(crate) const TIMELINE_COLUMNS: &str = "id, name, description, start_date, end_date, \
     reference, reference_id, created_at, updated_at, deleted_at";

/// Column list shared by every milestone SELECT, matching [`milestone_from_row`].
pub(crate) const MILESTONE_COLUMNS: &str = "id, timeline_id, name, description, duration, \
     start_date, end_date, actual_start_date, completion_date, status, milestone_type, details, \
     milestone_order, planned_text, active_text, completed_text, blocked_text, hidden, \
     created_at, updated_at, deleted_at";

fn conversion_error<E>(idx: usize, error: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(error))
}

fn timestamp(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| conversion_error(idx, e))
}

fn optional_timestamp(row: &Row, idx: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|text| text.parse::<Timestamp>().map_err(|e| conversion_error(idx, e)))
        .transpose()
}

fn date(row: &Row, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| conversion_error(idx, e))
}

fn optional_date(row: &Row, idx: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(idx)?
        .map(|text| text.parse::<Date>().map_err(|e| conversion_error(idx, e)))
        .transpose()
}

fn id(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

/// Builds a [`Timeline`] from a row selected with [`TIMELINE_COLUMNS`].
pub(crate) fn timeline_from_row(row: &Row) -> rusqlite::Result<Timeline> {
    Ok(Timeline {
        id: id(row, 0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        start_date: date(row, 3)?,
        end_date: optional_date(row, 4)?,
        reference: row.get(5)?,
        reference_id: id(row, 6)?,
        created_at: timestamp(row, 7)?,
        updated_at: timestamp(row, 8)?,
        deleted_at: optional_timestamp(row, 9)?,
    })
}

/// Builds a [`Milestone`] from a row selected with [`MILESTONE_COLUMNS`].
pub(crate) fn milestone_from_row(row: &Row) -> rusqlite::Result<Milestone> {
    let status: String = row.get(9)?;
    let details: String = row.get(11)?;
    let details: Value = serde_json::from_str(&details).map_err(|e| conversion_error(11, e))?;

    Ok(Milestone {
        id: id(row, 0)?,
        timeline_id: id(row, 1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        duration: row.get(4)?,
        start_date: date(row, 5)?,
        end_date: optional_date(row, 6)?,
        actual_start_date: optional_date(row, 7)?,
        completion_date: optional_date(row, 8)?,
        status: MilestoneStatus::from(status),
        milestone_type: row.get(10)?,
        details,
        order: row.get(12)?,
        planned_text: row.get(13)?,
        active_text: row.get(14)?,
        completed_text: row.get(15)?,
        blocked_text: row.get(16)?,
        hidden: row.get(17)?,
        created_at: timestamp(row, 18)?,
        updated_at: timestamp(row, 19)?,
        deleted_at: optional_timestamp(row, 20)?,
    })
}

/// Text form of an optional date column.
pub(crate) fn date_text(date: Option<Date>) -> Option<String> {
    date.map(|date| date.to_string())
}
