//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Brings databases created before the `hidden` flag existed up to date.
    fn apply_migrations(&self) -> Result<()> {
        let has_hidden_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('milestones') WHERE name = 'hidden'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect milestones table")?;

        if !has_hidden_column {
            self.connection
                .execute(
                    "ALTER TABLE milestones ADD COLUMN hidden INTEGER NOT NULL DEFAULT 0",
                    [],
                )
                .db_context("Failed to add hidden column to milestones table")?;
        }

        Ok(())
    }
}
