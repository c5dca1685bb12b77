//! [`MilestoneRepository`] over a SQLite connection or transaction.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use super::rows::{
    date_text, milestone_from_row, timeline_from_row, MILESTONE_COLUMNS, TIMELINE_COLUMNS,
};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{Milestone, Timeline},
    params::CreateMilestone,
    schedule::{MilestoneRepository, OrderPatch},
};

const INSERT_MILESTONE_SQL: &str = "INSERT INTO milestones (timeline_id, name, description, duration, start_date, end_date, actual_start_date, completion_date, status, milestone_type, details, milestone_order, planned_text, active_text, completed_text, blocked_text, hidden, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?18)";
const UPDATE_MILESTONE_FIELDS_SQL: &str = "UPDATE milestones SET name = ?1, description = ?2, duration = ?3, start_date = ?4, end_date = ?5, actual_start_date = ?6, completion_date = ?7, status = ?8, milestone_type = ?9, details = ?10, planned_text = ?11, active_text = ?12, completed_text = ?13, blocked_text = ?14, hidden = ?15, updated_at = ?16 WHERE id = ?17";
const UPDATE_MILESTONE_ORDER_SQL: &str =
    "UPDATE milestones SET milestone_order = ?1, updated_at = ?2 WHERE id = ?3";
const SOFT_DELETE_MILESTONE_SQL: &str =
    "UPDATE milestones SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2 AND deleted_at IS NULL";

/// Repository handle borrowing a connection.
///
/// Inside [`Database::run_atomic`](super::Database::run_atomic) the
/// connection is the open transaction.
#[derive(Clone, Copy)]
pub struct Store<'c> {
    conn: &'c Connection,
}

impl<'c> Store<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub(crate) fn connection(&self) -> &'c Connection {
        self.conn
    }

    /// Milestones of a timeline ordered by position, with optional filters.
    pub fn milestones_for_timeline(
        &self,
        timeline_id: u64,
        include_hidden: bool,
        include_deleted: bool,
    ) -> Result<Vec<Milestone>> {
        let mut sql = format!("SELECT {MILESTONE_COLUMNS} FROM milestones WHERE timeline_id = ?1");
        if !include_deleted {
            sql.push_str(" AND deleted_at IS NULL");
        }
        if !include_hidden {
            sql.push_str(" AND hidden = 0");
        }
        sql.push_str(" ORDER BY milestone_order, id");

        let mut stmt = self
            .conn
            .prepare(&sql)
            .db_context("Failed to prepare milestone query")?;
        let milestones = stmt
            .query_map(params![timeline_id as i64], milestone_from_row)
            .db_context("Failed to query milestones")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch milestones")?;
        Ok(milestones)
    }
}

impl MilestoneRepository for Store<'_> {
    fn find_timeline_by_id(&self, id: u64) -> Result<Option<Timeline>> {
        self.conn
            .query_row(
                &format!("SELECT {TIMELINE_COLUMNS} FROM timelines WHERE id = ?1"),
                params![id as i64],
                timeline_from_row,
            )
            .optional()
            .db_context("Failed to query timeline")
    }

    fn find_milestone_by_id(&self, id: u64) -> Result<Option<Milestone>> {
        self.conn
            .query_row(
                &format!("SELECT {MILESTONE_COLUMNS} FROM milestones WHERE id = ?1"),
                params![id as i64],
                milestone_from_row,
            )
            .optional()
            .db_context("Failed to query milestone")
    }

    fn find_non_deleted_milestones_by_timeline(&self, timeline_id: u64) -> Result<Vec<Milestone>> {
        self.milestones_for_timeline(timeline_id, true, false)
    }

    fn insert_milestone(&self, params: &CreateMilestone, now: Timestamp) -> Result<Milestone> {
        let details = params
            .details
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()));
        let details_text = serde_json::to_string(&details)?;

        self.conn
            .execute(
                INSERT_MILESTONE_SQL,
                params![
                    params.timeline_id as i64,
                    &params.name,
                    params.description.as_deref(),
                    i64::from(params.duration),
                    params.start_date.to_string(),
                    date_text(params.end_date),
                    date_text(params.actual_start_date),
                    date_text(params.completion_date),
                    params.status.as_str(),
                    &params.milestone_type,
                    &details_text,
                    i64::from(params.order),
                    params.planned_text.as_deref(),
                    params.active_text.as_deref(),
                    params.completed_text.as_deref(),
                    params.blocked_text.as_deref(),
                    params.hidden,
                    now.to_string(),
                ],
            )
            .db_context("Failed to insert milestone")?;

        Ok(Milestone {
            id: self.conn.last_insert_rowid() as u64,
            timeline_id: params.timeline_id,
            name: params.name.clone(),
            description: params.description.clone(),
            duration: params.duration,
            start_date: params.start_date,
            end_date: params.end_date,
            actual_start_date: params.actual_start_date,
            completion_date: params.completion_date,
            status: params.status.clone(),
            milestone_type: params.milestone_type.clone(),
            details,
            order: params.order,
            planned_text: params.planned_text.clone(),
            active_text: params.active_text.clone(),
            completed_text: params.completed_text.clone(),
            blocked_text: params.blocked_text.clone(),
            hidden: params.hidden,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    fn save_milestone_fields(&self, milestone: &Milestone) -> Result<()> {
        let details_text = serde_json::to_string(&milestone.details)?;
        self.conn
            .execute(
                UPDATE_MILESTONE_FIELDS_SQL,
                params![
                    &milestone.name,
                    milestone.description.as_deref(),
                    i64::from(milestone.duration),
                    milestone.start_date.to_string(),
                    date_text(milestone.end_date),
                    date_text(milestone.actual_start_date),
                    date_text(milestone.completion_date),
                    milestone.status.as_str(),
                    &milestone.milestone_type,
                    &details_text,
                    milestone.planned_text.as_deref(),
                    milestone.active_text.as_deref(),
                    milestone.completed_text.as_deref(),
                    milestone.blocked_text.as_deref(),
                    milestone.hidden,
                    milestone.updated_at.to_string(),
                    milestone.id as i64,
                ],
            )
            .db_context("Failed to update milestone")?;
        Ok(())
    }

    /// Writes positions in two passes. Each row is first parked on a
    /// negative value unique to its target, then moved to the target, so the
    /// unique index never sees two live rows on one position.
    fn apply_milestone_patches(&self, patches: &[OrderPatch], now: Timestamp) -> Result<()> {
        if patches.is_empty() {
            return Ok(());
        }
        let now = now.to_string();
        let mut stmt = self
            .conn
            .prepare_cached(UPDATE_MILESTONE_ORDER_SQL)
            .db_context("Failed to prepare order update")?;

        for patch in patches {
            let parked = -1 - i64::from(patch.order);
            stmt.execute(params![parked, &now, patch.id as i64])
                .db_context("Failed to park milestone order")?;
        }
        for patch in patches {
            stmt.execute(params![i64::from(patch.order), &now, patch.id as i64])
                .db_context("Failed to write milestone order")?;
        }
        Ok(())
    }

    fn mark_milestone_deleted(&self, id: u64, now: Timestamp) -> Result<()> {
        self.conn
            .execute(SOFT_DELETE_MILESTONE_SQL, params![now.to_string(), id as i64])
            .db_context("Failed to delete milestone")?;
        Ok(())
    }
}
