//! Timeline CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::params;

use super::rows::{date_text, timeline_from_row, TIMELINE_COLUMNS};
use crate::{
    error::{DatabaseResultExt, Result, ScheduleError},
    models::Timeline,
    params::{CreateTimeline, TimelineRef},
    schedule::MilestoneRepository,
};

const INSERT_TIMELINE_SQL: &str = "INSERT INTO timelines (name, description, start_date, end_date, reference, reference_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)";
const SOFT_DELETE_TIMELINE_SQL: &str =
    "UPDATE timelines SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2 AND deleted_at IS NULL";
const DELETE_TIMELINE_MILESTONES_SQL: &str = "DELETE FROM milestones WHERE timeline_id = ?1";
const DELETE_TIMELINE_SQL: &str = "DELETE FROM timelines WHERE id = ?1";

impl super::Database {
    /// Creates a new timeline.
    pub fn create_timeline(&mut self, params: &CreateTimeline) -> Result<Timeline> {
        params.validate()?;

        self.run_atomic("timeline create", |store| {
            let now = Timestamp::now();
            store
                .connection()
                .execute(
                    INSERT_TIMELINE_SQL,
                    params![
                        &params.name,
                        params.description.as_deref(),
                        params.start_date.to_string(),
                        date_text(params.end_date),
                        &params.reference,
                        params.reference_id as i64,
                        now.to_string(),
                    ],
                )
                .db_context("Failed to insert timeline")?;

            Ok(Timeline {
                id: store.connection().last_insert_rowid() as u64,
                name: params.name.clone(),
                description: params.description.clone(),
                start_date: params.start_date,
                end_date: params.end_date,
                reference: params.reference.clone(),
                reference_id: params.reference_id,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            })
        })
    }

    /// Retrieves a live timeline by ID.
    pub fn get_timeline(&self, id: u64) -> Result<Option<Timeline>> {
        Ok(self
            .store()
            .find_timeline_by_id(id)?
            .filter(|timeline| !timeline.is_deleted()))
    }

    /// Lists the live timelines owned by one entity, oldest first.
    pub fn list_timelines(&self, owner: &TimelineRef) -> Result<Vec<Timeline>> {
        let sql = format!(
            "SELECT {TIMELINE_COLUMNS} FROM timelines \
             WHERE reference = ?1 AND reference_id = ?2 AND deleted_at IS NULL \
             ORDER BY id"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare timeline query")?;
        let timelines = stmt
            .query_map(
                params![&owner.reference, owner.reference_id as i64],
                timeline_from_row,
            )
            .db_context("Failed to query timelines")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch timelines")?;
        Ok(timelines)
    }

    /// Soft-deletes a timeline. Its milestones are left as they are.
    pub fn delete_timeline(&mut self, id: u64) -> Result<Timeline> {
        self.run_atomic("timeline delete", |store| {
            let mut timeline = store
                .find_timeline_by_id(id)?
                .filter(|timeline| !timeline.is_deleted())
                .ok_or(ScheduleError::TimelineNotFound { id })?;

            let now = Timestamp::now();
            store
                .connection()
                .execute(SOFT_DELETE_TIMELINE_SQL, params![now.to_string(), id as i64])
                .db_context("Failed to delete timeline")?;

            timeline.deleted_at = Some(now);
            timeline.updated_at = now;
            Ok(timeline)
        })
    }

    /// Permanently removes a timeline and every milestone it ever had,
    /// soft-deleted or not. Returns the number of milestones removed.
    pub fn purge_timeline(&mut self, id: u64) -> Result<usize> {
        self.run_atomic("timeline purge", |store| {
            if store.find_timeline_by_id(id)?.is_none() {
                return Err(ScheduleError::TimelineNotFound { id });
            }

            let removed = store
                .connection()
                .execute(DELETE_TIMELINE_MILESTONES_SQL, params![id as i64])
                .db_context("Failed to delete timeline milestones")?;
            store
                .connection()
                .execute(DELETE_TIMELINE_SQL, params![id as i64])
                .db_context("Failed to delete timeline")?;
            Ok(removed)
        })
    }
}
