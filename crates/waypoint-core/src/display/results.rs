//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::{
    models::{Milestone, Timeline},
    schedule::MilestoneChange,
};

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Timeline> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created timeline with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Milestone> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created milestone with ID: {} at position {}",
            self.resource.id, self.resource.order
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// Lists position changes made to siblings when the update moved the
/// milestone onto an occupied position.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{display::UpdateResult, schedule::MilestoneChange};
///
/// fn show(change: MilestoneChange) -> String {
///     UpdateResult::from(change).to_string()
/// }
/// ```
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl From<MilestoneChange> for UpdateResult<Milestone> {
    fn from(change: MilestoneChange) -> Self {
        let mut changes = Vec::new();
        if change.previous.order != change.current.order {
            changes.push(format!(
                "Moved from position {} to {}",
                change.previous.order, change.current.order
            ));
        }
        for sibling in &change.reassignment.siblings {
            changes.push(format!(
                "Shifted milestone {} to position {}",
                sibling.id, sibling.order
            ));
        }
        Self::with_changes(change.current, changes)
    }
}

impl fmt::Display for UpdateResult<Milestone> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated milestone with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Timeline> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted timeline '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<Milestone> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted milestone '{}' (ID: {}), position {} is now free",
            self.resource.name, self.resource.id, self.resource.order
        )
    }
}
