//! Temporal consistency checks between a milestone and its timeline.
//!
//! Every rule is evaluated independently and all failures are reported, so a
//! caller sees the complete list in one round trip.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ScheduleError},
    models::{Milestone, Timeline},
    params::{CreateMilestone, UpdateMilestone},
};

/// A single failed temporal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    /// `start_date` is after `end_date`
    EndBeforeStart { start_date: Date, end_date: Date },
    /// `start_date` is after `completion_date`
    CompletionBeforeStart {
        start_date: Date,
        completion_date: Date,
    },
    /// `start_date` precedes the timeline's start
    StartsBeforeTimeline {
        start_date: Date,
        timeline_start: Date,
    },
    /// `end_date` exceeds the timeline's end
    EndsAfterTimeline { end_date: Date, timeline_end: Date },
}

impl Violation {
    /// Name of the violated field, for error payloads.
    pub fn field(&self) -> &'static str {
        match self {
            Violation::EndBeforeStart { .. } | Violation::EndsAfterTimeline { .. } => "end_date",
            Violation::CompletionBeforeStart { .. } => "completion_date",
            Violation::StartsBeforeTimeline { .. } => "start_date",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EndBeforeStart {
                start_date,
                end_date,
            } => write!(f, "end date {end_date} is before start date {start_date}"),
            Violation::CompletionBeforeStart {
                start_date,
                completion_date,
            } => write!(
                f,
                "completion date {completion_date} is before start date {start_date}"
            ),
            Violation::StartsBeforeTimeline {
                start_date,
                timeline_start,
            } => write!(
                f,
                "start date {start_date} is before the timeline start {timeline_start}"
            ),
            Violation::EndsAfterTimeline {
                end_date,
                timeline_end,
            } => write!(
                f,
                "end date {end_date} is after the timeline end {timeline_end}"
            ),
        }
    }
}

/// The date fields the rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneDates {
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub completion_date: Option<Date>,
}

impl From<&Milestone> for MilestoneDates {
    fn from(milestone: &Milestone) -> Self {
        Self {
            start_date: milestone.start_date,
            end_date: milestone.end_date,
            completion_date: milestone.completion_date,
        }
    }
}

impl From<&CreateMilestone> for MilestoneDates {
    fn from(params: &CreateMilestone) -> Self {
        Self {
            start_date: params.start_date,
            end_date: params.end_date,
            completion_date: params.completion_date,
        }
    }
}

/// Runs every rule against `dates` and returns the failures.
pub fn check_dates(timeline: &Timeline, dates: MilestoneDates) -> Vec<Violation> {
    let mut violations = Vec::new();
    let MilestoneDates {
        start_date,
        end_date,
        completion_date,
    } = dates;

    if let Some(end_date) = end_date {
        if start_date > end_date {
            violations.push(Violation::EndBeforeStart {
                start_date,
                end_date,
            });
        }
    }

    if let Some(completion_date) = completion_date {
        if start_date > completion_date {
            violations.push(Violation::CompletionBeforeStart {
                start_date,
                completion_date,
            });
        }
    }

    if start_date < timeline.start_date {
        violations.push(Violation::StartsBeforeTimeline {
            start_date,
            timeline_start: timeline.start_date,
        });
    }

    if let (Some(end_date), Some(timeline_end)) = (end_date, timeline.end_date) {
        if end_date > timeline_end {
            violations.push(Violation::EndsAfterTimeline {
                end_date,
                timeline_end,
            });
        }
    }

    violations
}

/// Validates `proposed` merged over `milestone` against `timeline`.
pub fn validate(
    timeline: &Timeline,
    milestone: &Milestone,
    proposed: &UpdateMilestone,
) -> Vec<Violation> {
    let merged = milestone.merged(proposed);
    check_dates(timeline, MilestoneDates::from(&merged))
}

/// Turns a violation list into `Ok(())` or a [`ScheduleError::Validation`].
pub fn ensure_valid(violations: Vec<Violation>) -> Result<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ScheduleError::Validation { violations })
    }
}
