//! Outbound milestone events.
//!
//! Events are published only after the owning transaction has committed.
//! Delivery and retry are the sink's business; publishing never fails the
//! operation that produced the event.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::models::Milestone;

/// What happened to the milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "milestone.created")]
    Created,
    #[serde(rename = "milestone.updated")]
    Updated,
    #[serde(rename = "milestone.deleted")]
    Deleted,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Created => "milestone.created",
            EventKind::Updated => "milestone.updated",
            EventKind::Deleted => "milestone.deleted",
        }
    }
}

/// Event payload handed to an [`EventSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub timeline_id: u64,
    pub milestone_id: u64,
    pub previous_state: Option<Milestone>,
    pub new_state: Option<Milestone>,
}

impl MilestoneEvent {
    pub fn created(milestone: Milestone) -> Self {
        Self {
            kind: EventKind::Created,
            timeline_id: milestone.timeline_id,
            milestone_id: milestone.id,
            previous_state: None,
            new_state: Some(milestone),
        }
    }

    pub fn updated(previous: Milestone, current: Milestone) -> Self {
        Self {
            kind: EventKind::Updated,
            timeline_id: current.timeline_id,
            milestone_id: current.id,
            previous_state: Some(previous),
            new_state: Some(current),
        }
    }

    pub fn deleted(previous: Milestone) -> Self {
        Self {
            kind: EventKind::Deleted,
            timeline_id: previous.timeline_id,
            milestone_id: previous.id,
            previous_state: Some(previous),
            new_state: None,
        }
    }
}

/// Receiver of committed milestone events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &MilestoneEvent);
}

/// Writes every event to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn publish(&self, event: &MilestoneEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(target: "waypoint::events", "{payload}"),
            Err(e) => warn!(
                "Failed to serialize {} event for milestone {}: {e}",
                event.kind.as_str(),
                event.milestone_id
            ),
        }
    }
}

/// Fans events out to in-process subscribers.
impl EventSink for broadcast::Sender<MilestoneEvent> {
    fn publish(&self, event: &MilestoneEvent) {
        if self.send(event.clone()).is_err() {
            debug!(
                "No subscribers for {} event on milestone {}",
                event.kind.as_str(),
                event.milestone_id
            );
        }
    }
}
