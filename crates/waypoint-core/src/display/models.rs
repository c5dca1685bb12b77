//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can hand it straight to the terminal
//! renderer.

use std::fmt;

use super::datetime::{DateRange, LocalDateTime};
use crate::{
    models::{Milestone, Timeline},
    schedule::TimelineProgress,
};

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(
            f,
            "- Dates: {}",
            DateRange {
                start: &self.start_date,
                end: self.end_date.as_ref(),
            }
        )?;
        writeln!(f, "- Owner: {} #{}", self.reference, self.reference_id)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        if let Some(deleted_at) = &self.deleted_at {
            writeln!(f, "- Deleted: {}", LocalDateTime(deleted_at))?;
        }

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.order,
            self.name,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Type: {}", self.milestone_type)?;
        writeln!(
            f,
            "- Planned: {} ({} days)",
            DateRange {
                start: &self.start_date,
                end: self.end_date.as_ref(),
            },
            self.duration
        )?;
        if let Some(actual_start) = &self.actual_start_date {
            writeln!(f, "- Started: {actual_start}")?;
        }
        if let Some(completion) = &self.completion_date {
            writeln!(f, "- Completed: {completion}")?;
        }
        if self.hidden {
            writeln!(f, "- Hidden")?;
        }
        if self.is_deleted() {
            writeln!(f, "- Deleted")?;
        }
        writeln!(f)?;

        if let Some(text) = self.status_text() {
            writeln!(f, "> {text}")?;
            writeln!(f)?;
        }

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        if self.details.as_object().is_some_and(|map| !map.is_empty()) {
            writeln!(f, "#### Details")?;
            writeln!(f)?;
            writeln!(f, "```json")?;
            writeln!(
                f,
                "{}",
                serde_json::to_string_pretty(&self.details).map_err(|_| fmt::Error)?
            )?;
            writeln!(f, "```")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for TimelineProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Progress: {}%", self.progress)?;
        writeln!(f)?;
        writeln!(f, "- Span: {} days", self.duration)?;
        writeln!(
            f,
            "- Completed: {} of {} scheduled days",
            self.completed_duration, self.scheduled_duration
        )
    }
}
