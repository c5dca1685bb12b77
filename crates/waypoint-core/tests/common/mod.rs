#![allow(dead_code)]

use std::collections::BTreeMap;

use jiff::civil::{date, Date};
use tempfile::NamedTempFile;
use waypoint_core::{
    params::{CreateMilestone, CreateTimeline, ListMilestones},
    Database, MilestoneStatus, Timeline,
};

/// Helper function to create a temporary database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

pub fn timeline_params(end_date: Option<Date>) -> CreateTimeline {
    CreateTimeline {
        name: "Product launch".to_string(),
        description: Some("Everything up to GA".to_string()),
        start_date: date(2024, 1, 1),
        end_date,
        reference: "project".to_string(),
        reference_id: 7,
    }
}

pub fn milestone_params(timeline_id: u64, order: u32) -> CreateMilestone {
    CreateMilestone {
        timeline_id,
        name: format!("Milestone at {order}"),
        description: None,
        duration: 5,
        start_date: date(2024, 2, 1),
        end_date: Some(date(2024, 2, 5)),
        actual_start_date: None,
        completion_date: None,
        status: MilestoneStatus::Planned,
        milestone_type: "phase".to_string(),
        details: None,
        order,
        planned_text: None,
        active_text: None,
        completed_text: None,
        blocked_text: None,
        hidden: false,
    }
}

/// Creates an open-ended timeline with one milestone per entry in `orders`.
/// Returns the timeline and the milestone IDs in the same sequence.
pub fn seed_timeline(db: &mut Database, orders: &[u32]) -> (Timeline, Vec<u64>) {
    let timeline = db
        .create_timeline(&timeline_params(None))
        .expect("Failed to create timeline");
    let ids = orders
        .iter()
        .map(|&order| {
            db.create_milestone(&milestone_params(timeline.id, order))
                .expect("Failed to create milestone")
                .id
        })
        .collect();
    (timeline, ids)
}

/// Live positions of a timeline keyed by milestone ID.
pub fn orders(db: &Database, timeline_id: u64) -> BTreeMap<u64, u32> {
    db.list_milestones(&ListMilestones {
        timeline_id,
        include_hidden: true,
        include_deleted: false,
    })
    .expect("Failed to list milestones")
    .into_iter()
    .map(|milestone| (milestone.id, milestone.order))
    .collect()
}
