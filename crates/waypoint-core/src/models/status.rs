//! Milestone status values.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Status of a milestone.
///
/// The column is free-form text. The four conventional values get their own
/// variants; anything else is carried through unchanged as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MilestoneStatus {
    /// Scheduled but not started
    #[default]
    Planned,

    /// Work is under way
    Active,

    /// Work has finished
    Completed,

    /// Work cannot proceed
    Blocked,

    /// Any other caller-defined status
    Custom(String),
}

impl MilestoneStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &str {
        match self {
            MilestoneStatus::Planned => "planned",
            MilestoneStatus::Active => "active",
            MilestoneStatus::Completed => "completed",
            MilestoneStatus::Blocked => "blocked",
            MilestoneStatus::Custom(value) => value,
        }
    }

    /// Get status with a leading icon for display.
    ///
    /// ```rust
    /// use waypoint_core::models::MilestoneStatus;
    ///
    /// assert_eq!(MilestoneStatus::Completed.with_icon(), "✓ completed");
    /// assert_eq!(MilestoneStatus::Active.with_icon(), "➤ active");
    /// ```
    pub fn with_icon(&self) -> String {
        let icon = match self {
            MilestoneStatus::Planned => "○",
            MilestoneStatus::Active => "➤",
            MilestoneStatus::Completed => "✓",
            MilestoneStatus::Blocked => "✗",
            MilestoneStatus::Custom(_) => "•",
        };
        format!("{icon} {}", self.as_str())
    }
}

impl FromStr for MilestoneStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "planned" => MilestoneStatus::Planned,
            "active" => MilestoneStatus::Active,
            "completed" => MilestoneStatus::Completed,
            "blocked" => MilestoneStatus::Blocked,
            _ => MilestoneStatus::Custom(s.to_string()),
        })
    }
}

impl From<String> for MilestoneStatus {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<MilestoneStatus> for String {
    fn from(status: MilestoneStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
