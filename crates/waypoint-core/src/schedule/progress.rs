//! Duration and completion progress of a timeline.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::Milestone;

const SECONDS_PER_DAY: i64 = 86_400;

/// Aggregated schedule figures for a timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineProgress {
    /// Inclusive day span from the first milestone's start to the last one's end
    pub duration: i64,
    /// Completion percentage, 0..=100
    pub progress: u32,
    /// Sum of actual (completed) and planned (pending) milestone durations
    pub scheduled_duration: i64,
    /// Sum of actual durations of completed milestones
    pub completed_duration: i64,
}

/// Whole days from `start` to `end`, plus one so a single-day span counts as 1.
pub fn inclusive_days(start: Date, end: Date) -> i64 {
    start.duration_until(end).as_secs() / SECONDS_PER_DAY + 1
}

/// Computes overall duration and progress for a set of milestones.
///
/// Callers pass the milestones that should count, i.e. live and not hidden.
/// Input order does not matter; milestones are sorted by position first.
pub fn compute_duration_and_progress<'a, I>(milestones: I) -> TimelineProgress
where
    I: IntoIterator<Item = &'a Milestone>,
{
    let mut sorted: Vec<&Milestone> = milestones.into_iter().collect();
    sorted.sort_by_key(|milestone| milestone.order);

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return TimelineProgress::default();
    };

    let first_start = first.effective_start();
    let duration = match last.effective_end() {
        Some(end) => inclusive_days(first_start, end),
        // Open-ended last milestone: fall back to its planned length.
        None => inclusive_days(first_start, last.effective_start()) - 1 + i64::from(last.duration),
    }
    .max(0);

    let mut scheduled_duration = 0_i64;
    let mut completed_duration = 0_i64;
    for milestone in &sorted {
        match milestone.completion_date {
            Some(completion) => {
                let actual = inclusive_days(milestone.effective_start(), completion).max(0);
                scheduled_duration += actual;
                completed_duration += actual;
            }
            None => scheduled_duration += i64::from(milestone.duration),
        }
    }

    TimelineProgress {
        duration,
        progress: percentage(completed_duration, scheduled_duration),
        scheduled_duration,
        completed_duration,
    }
}

/// `round(100 * part / whole)` with halves rounded up, 0 when `whole` is 0.
fn percentage(part: i64, whole: i64) -> u32 {
    if whole <= 0 {
        return 0;
    }
    let rounded = (200 * part + whole) / (2 * whole);
    u32::try_from(rounded.clamp(0, 100)).unwrap_or(0)
}
