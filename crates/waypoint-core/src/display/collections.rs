//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{Milestone, Timeline};

/// Newtype wrapper for displaying the timelines of one owner.
///
/// # Examples
///
/// ```rust
/// use jiff::{civil::date, Timestamp};
/// use waypoint_core::{display::Timelines, models::Timeline};
///
/// let timeline = Timeline {
///     id: 1,
///     name: "Launch".to_string(),
///     description: None,
///     start_date: date(2024, 1, 1),
///     end_date: None,
///     reference: "project".to_string(),
///     reference_id: 7,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     deleted_at: None,
/// };
/// let output = Timelines(vec![timeline]).to_string();
/// assert!(output.contains("Launch"));
/// ```
pub struct Timelines(pub Vec<Timeline>);

impl Timelines {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Timeline> {
        self.0.iter()
    }
}

impl fmt::Display for Timelines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No timelines found.");
        }
        for timeline in &self.0 {
            writeln!(f, "{timeline}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a timeline's milestones in order.
pub struct Milestones(pub Vec<Milestone>);

impl Milestones {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of milestones in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the milestone at the given index.
    pub fn get(&self, index: usize) -> Option<&Milestone> {
        self.0.get(index)
    }

    /// Get an iterator over the milestones.
    pub fn iter(&self) -> std::slice::Iter<'_, Milestone> {
        self.0.iter()
    }
}

impl Index<usize> for Milestones {
    type Output = Milestone;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Milestones {
    type Item = Milestone;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Milestones {
    type Item = &'a Milestone;
    type IntoIter = std::slice::Iter<'a, Milestone>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Milestones {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No milestones found.")
        } else {
            for milestone in &self.0 {
                write!(f, "{milestone}")?;
            }
            Ok(())
        }
    }
}
