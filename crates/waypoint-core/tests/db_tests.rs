mod common;

use std::{collections::BTreeMap, time::Duration};

use common::{create_test_db, milestone_params, orders, seed_timeline, timeline_params};
use jiff::civil::date;
use rusqlite::Connection;
use serde_json::json;
use waypoint_core::{
    params::{ListMilestones, TimelineRef, UpdateMilestone},
    Database, ErrorKind, MilestoneStatus, ScheduleError, Violation,
};

fn move_to(timeline_id: u64, id: u64, order: u32) -> UpdateMilestone {
    UpdateMilestone {
        timeline_id,
        id,
        order: Some(order),
        ..Default::default()
    }
}

/// Seeds milestones at `seed`, moves the one at `from` to `to` and returns
/// the final positions keyed by each milestone's original position.
fn run_move(seed: &[u32], from: u32, to: u32) -> BTreeMap<u32, u32> {
    let (_temp_file, mut db) = create_test_db();
    let (timeline, ids) = seed_timeline(&mut db, seed);
    let moved = ids[seed.iter().position(|&order| order == from).unwrap()];

    db.update_milestone(&move_to(timeline.id, moved, to))
        .expect("Failed to move milestone");

    let by_id = orders(&db, timeline.id);
    seed.iter()
        .zip(&ids)
        .map(|(&original, id)| (original, by_id[id]))
        .collect()
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());
}

#[test]
fn test_move_first_to_last() {
    let result = run_move(&[1, 2, 3, 4], 1, 4);
    assert_eq!(result, BTreeMap::from([(1, 4), (2, 1), (3, 2), (4, 3)]));
}

#[test]
fn test_move_beyond_max_does_not_shift() {
    let result = run_move(&[1, 2, 3, 4], 1, 5);
    assert_eq!(result, BTreeMap::from([(1, 5), (2, 2), (3, 3), (4, 4)]));
}

#[test]
fn test_move_last_to_second() {
    let result = run_move(&[1, 2, 3, 4], 4, 2);
    assert_eq!(result, BTreeMap::from([(1, 1), (2, 3), (3, 4), (4, 2)]));
}

#[test]
fn test_move_below_min_does_not_shift() {
    let result = run_move(&[1, 2, 3, 4], 4, 0);
    assert_eq!(result, BTreeMap::from([(1, 1), (2, 2), (3, 3), (4, 0)]));
}

#[test]
fn test_single_milestone_move() {
    let result = run_move(&[1], 1, 0);
    assert_eq!(result, BTreeMap::from([(1, 0)]));
}

#[test]
fn test_move_into_gap_does_not_shift() {
    let result = run_move(&[1, 3, 4], 4, 2);
    assert_eq!(result, BTreeMap::from([(1, 1), (3, 3), (4, 2)]));
}

#[test]
fn test_move_onto_occupied_shifts_sibling() {
    let result = run_move(&[1, 2, 4], 4, 2);
    assert_eq!(result, BTreeMap::from([(1, 1), (2, 3), (4, 2)]));
}

#[test]
fn test_start_before_timeline_rejected_with_zero_writes() {
    let (_temp_file, mut db) = create_test_db();
    let (timeline, ids) = seed_timeline(&mut db, &[1, 2]);
    let before = db.get_milestone(ids[0]).unwrap().unwrap();

    let error = db
        .update_milestone(&UpdateMilestone {
            timeline_id: timeline.id,
            id: ids[0],
            name: Some("Renamed".to_string()),
            start_date: Some(date(2023, 12, 1)),
            order: Some(2),
            ..Default::default()
        })
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.kind().status_code(), 422);
    assert!(matches!(
        error.violations(),
        [Violation::StartsBeforeTimeline { .. }]
    ));
    assert_eq!(db.get_milestone(ids[0]).unwrap().unwrap(), before);
    assert_eq!(
        orders(&db, timeline.id),
        BTreeMap::from([(ids[0], 1), (ids[1], 2)])
    );
}

#[test]
fn test_end_after_timeline_rejected() {
    let (_temp_file, mut db) = create_test_db();
    let timeline = db
        .create_timeline(&timeline_params(Some(date(2024, 3, 31))))
        .unwrap();
    let milestone = db
        .create_milestone(&milestone_params(timeline.id, 0))
        .unwrap();

    let error = db
        .update_milestone(&UpdateMilestone {
            timeline_id: timeline.id,
            id: milestone.id,
            end_date: Some(Some(date(2024, 4, 2))),
            ..Default::default()
        })
        .unwrap_err();

    assert!(matches!(
        error.violations(),
        [Violation::EndsAfterTimeline { .. }]
    ));
    assert_eq!(
        db.get_milestone(milestone.id).unwrap().unwrap().end_date,
        Some(date(2024, 2, 5))
    );
}

#[test]
fn test_all_violations_reported_together() {
    let (_temp_file, mut db) = create_test_db();
    let timeline = db
        .create_timeline(&timeline_params(Some(date(2024, 3, 31))))
        .unwrap();
    let milestone = db
        .create_milestone(&milestone_params(timeline.id, 0))
        .unwrap();

    let error = db
        .update_milestone(&UpdateMilestone {
            timeline_id: timeline.id,
            id: milestone.id,
            start_date: Some(date(2023, 12, 20)),
            end_date: Some(Some(date(2023, 12, 10))),
            completion_date: Some(Some(date(2023, 12, 15))),
            ..Default::default()
        })
        .unwrap_err();

    assert_eq!(
        error.violations(),
        &[
            Violation::EndBeforeStart {
                start_date: date(2023, 12, 20),
                end_date: date(2023, 12, 10),
            },
            Violation::CompletionBeforeStart {
                start_date: date(2023, 12, 20),
                completion_date: date(2023, 12, 15),
            },
            Violation::StartsBeforeTimeline {
                start_date: date(2023, 12, 20),
                timeline_start: date(2024, 1, 1),
            },
        ]
    );
}

#[test]
fn test_update_fields_and_merge_details() {
    let (_temp_file, mut db) = create_test_db();
    let timeline = db.create_timeline(&timeline_params(None)).unwrap();
    let mut params = milestone_params(timeline.id, 0);
    params.details = Some(json!({"owner": "ops", "links": {"doc": "a"}}));
    params.description = Some("Initial".to_string());
    let milestone = db.create_milestone(&params).unwrap();

    let change = db
        .update_milestone(&UpdateMilestone {
            timeline_id: timeline.id,
            id: milestone.id,
            description: Some(None),
            status: Some(MilestoneStatus::Completed),
            completion_date: Some(Some(date(2024, 2, 4))),
            details: Some(json!({"links": {"ticket": "b"}})),
            hidden: Some(true),
            ..Default::default()
        })
        .unwrap();
    assert!(change.reassignment.is_noop());

    let stored = db.get_milestone(milestone.id).unwrap().unwrap();
    assert_eq!(stored, change.current);
    assert_eq!(stored.description, None);
    assert_eq!(stored.status, MilestoneStatus::Completed);
    assert_eq!(stored.completion_date, Some(date(2024, 2, 4)));
    assert!(stored.hidden);
    assert_eq!(
        stored.details,
        json!({"owner": "ops", "links": {"doc": "a", "ticket": "b"}})
    );
}

#[test]
fn test_repeated_move_is_idempotent() {
    let (_temp_file, mut db) = create_test_db();
    let (timeline, ids) = seed_timeline(&mut db, &[1, 2, 3, 4]);

    db.update_milestone(&move_to(timeline.id, ids[3], 2)).unwrap();
    let after_first = orders(&db, timeline.id);
    let change = db.update_milestone(&move_to(timeline.id, ids[3], 2)).unwrap();

    assert!(change.reassignment.is_noop());
    assert_eq!(orders(&db, timeline.id), after_first);
}

#[test]
fn test_soft_delete_leaves_gap() {
    let (_temp_file, mut db) = create_test_db();
    let (timeline, ids) = seed_timeline(&mut db, &[1, 2, 3]);

    let deleted = db.delete_milestone(timeline.id, ids[1]).unwrap();
    assert!(deleted.is_deleted());
    assert_eq!(
        orders(&db, timeline.id),
        BTreeMap::from([(ids[0], 1), (ids[2], 3)])
    );

    // The freed position can be taken without displacing anyone.
    let change = db.update_milestone(&move_to(timeline.id, ids[2], 2)).unwrap();
    assert!(!change.reassignment.displaced());

    // And reused by a new milestone.
    let replacement = db
        .create_milestone(&milestone_params(timeline.id, 3))
        .unwrap();
    assert_eq!(replacement.order, 3);
}

#[test]
fn test_deleted_milestone_is_not_found() {
    let (_temp_file, mut db) = create_test_db();
    let (timeline, ids) = seed_timeline(&mut db, &[1, 2]);
    db.delete_milestone(timeline.id, ids[0]).unwrap();

    assert!(db.get_milestone(ids[0]).unwrap().is_none());
    let error = db
        .update_milestone(&move_to(timeline.id, ids[0], 5))
        .unwrap_err();
    assert!(matches!(error, ScheduleError::MilestoneNotFound { .. }));
    assert_eq!(error.kind().status_code(), 404);

    let error = db.delete_milestone(timeline.id, ids[0]).unwrap_err();
    assert!(matches!(error, ScheduleError::MilestoneNotFound { .. }));
}

#[test]
fn test_missing_timeline_is_not_found() {
    let (_temp_file, mut db) = create_test_db();

    let error = db.update_milestone(&move_to(99, 1, 0)).unwrap_err();
    assert!(matches!(error, ScheduleError::TimelineNotFound { id: 99 }));

    let error = db.create_milestone(&milestone_params(99, 0)).unwrap_err();
    assert!(matches!(error, ScheduleError::TimelineNotFound { id: 99 }));

    let error = db.timeline_progress(99).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[test]
fn test_create_at_occupied_order_is_rejected() {
    let (_temp_file, mut db) = create_test_db();
    let (timeline, _ids) = seed_timeline(&mut db, &[1, 2]);

    let error = db
        .create_milestone(&milestone_params(timeline.id, 2))
        .unwrap_err();
    assert!(matches!(error, ScheduleError::OrderOccupied { order: 2, .. }));
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(orders(&db, timeline.id).len(), 2);
}

#[test]
fn test_create_rejects_dates_outside_timeline() {
    let (_temp_file, mut db) = create_test_db();
    let timeline = db
        .create_timeline(&timeline_params(Some(date(2024, 1, 31))))
        .unwrap();

    let error = db
        .create_milestone(&milestone_params(timeline.id, 0))
        .unwrap_err();
    assert!(matches!(
        error.violations(),
        [Violation::EndsAfterTimeline { .. }]
    ));
}

#[test]
fn test_create_rejects_invalid_input() {
    let (_temp_file, mut db) = create_test_db();
    let timeline = db.create_timeline(&timeline_params(None)).unwrap();

    let mut params = milestone_params(timeline.id, 0);
    params.duration = 0;
    let error = db.create_milestone(&params).unwrap_err();
    assert!(matches!(error, ScheduleError::InvalidInput { ref field, .. } if field == "duration"));

    let mut params = milestone_params(timeline.id, 0);
    params.name = "  ".to_string();
    let error = db.create_milestone(&params).unwrap_err();
    assert!(matches!(error, ScheduleError::InvalidInput { ref field, .. } if field == "name"));
}

#[test]
fn test_busy_writer_yields_retryable_conflict() {
    let (temp_file, mut db) = create_test_db();
    let (timeline, ids) = seed_timeline(&mut db, &[1, 2, 3]);
    db.set_busy_timeout(Duration::ZERO).unwrap();

    let other = Connection::open(temp_file.path()).unwrap();
    other.execute_batch("BEGIN IMMEDIATE").unwrap();

    let error = db
        .update_milestone(&move_to(timeline.id, ids[0], 3))
        .unwrap_err();
    assert!(matches!(error, ScheduleError::Conflict { .. }));
    assert!(error.is_retryable());
    assert_eq!(error.kind().status_code(), 409);

    other.execute_batch("ROLLBACK").unwrap();
    assert_eq!(
        orders(&db, timeline.id),
        BTreeMap::from([(ids[0], 1), (ids[1], 2), (ids[2], 3)])
    );

    db.update_milestone(&move_to(timeline.id, ids[0], 3))
        .expect("Retry should succeed once the lock is released");
    assert_eq!(
        orders(&db, timeline.id),
        BTreeMap::from([(ids[0], 3), (ids[1], 1), (ids[2], 2)])
    );
}

#[test]
fn test_failure_mid_reorder_rolls_back_every_write() {
    let (temp_file, mut db) = create_test_db();
    let (timeline, ids) = seed_timeline(&mut db, &[1, 2, 3, 4]);
    let before = orders(&db, timeline.id);

    // Lets the field write and the parking pass through, then fails the
    // second final position write.
    let other = Connection::open(temp_file.path()).unwrap();
    other
        .execute_batch(
            "CREATE TRIGGER freeze_order_two BEFORE UPDATE OF milestone_order ON milestones \
             WHEN NEW.milestone_order = 2 \
             BEGIN SELECT RAISE(ABORT, 'order 2 is frozen'); END;",
        )
        .unwrap();

    let error = db
        .update_milestone(&UpdateMilestone {
            name: Some("Renamed".to_string()),
            ..move_to(timeline.id, ids[0], 4)
        })
        .unwrap_err();
    assert!(matches!(error, ScheduleError::Database { .. }));
    assert_eq!(error.kind(), ErrorKind::Internal);
    assert!(!error.is_retryable());

    assert_eq!(orders(&db, timeline.id), before);
    let untouched = db.get_milestone(ids[0]).unwrap().unwrap();
    assert_eq!(untouched.name, "Milestone at 1");
    assert_eq!(untouched.order, 1);
}

#[test]
fn test_out_of_range_order_fails_to_load() {
    let (temp_file, mut db) = create_test_db();
    let (_timeline, ids) = seed_timeline(&mut db, &[1]);

    let other = Connection::open(temp_file.path()).unwrap();
    other
        .execute(
            "UPDATE milestones SET milestone_order = ?1 WHERE id = ?2",
            rusqlite::params![i64::from(u32::MAX) + 1, ids[0] as i64],
        )
        .unwrap();

    let error = db.get_milestone(ids[0]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Internal);
}

#[test]
fn test_list_milestones_filters() {
    let (_temp_file, mut db) = create_test_db();
    let timeline = db.create_timeline(&timeline_params(None)).unwrap();
    let visible = db
        .create_milestone(&milestone_params(timeline.id, 2))
        .unwrap();
    let mut hidden_params = milestone_params(timeline.id, 1);
    hidden_params.hidden = true;
    let hidden = db.create_milestone(&hidden_params).unwrap();
    let removed = db
        .create_milestone(&milestone_params(timeline.id, 0))
        .unwrap();
    db.delete_milestone(timeline.id, removed.id).unwrap();

    let list = |include_hidden, include_deleted| -> Vec<u64> {
        db.list_milestones(&ListMilestones {
            timeline_id: timeline.id,
            include_hidden,
            include_deleted,
        })
        .unwrap()
        .into_iter()
        .map(|milestone| milestone.id)
        .collect()
    };

    assert_eq!(list(false, false), vec![visible.id]);
    assert_eq!(list(true, false), vec![hidden.id, visible.id]);
    assert_eq!(list(true, true), vec![removed.id, hidden.id, visible.id]);
}

#[test]
fn test_timeline_progress_skips_hidden_and_deleted() {
    let (_temp_file, mut db) = create_test_db();
    let timeline = db.create_timeline(&timeline_params(None)).unwrap();

    let mut done = milestone_params(timeline.id, 0);
    done.start_date = date(2024, 1, 1);
    done.end_date = Some(date(2024, 1, 10));
    done.duration = 10;
    done.completion_date = Some(date(2024, 1, 5));
    db.create_milestone(&done).unwrap();

    let mut pending = milestone_params(timeline.id, 1);
    pending.start_date = date(2024, 1, 11);
    pending.end_date = Some(date(2024, 1, 25));
    pending.duration = 15;
    db.create_milestone(&pending).unwrap();

    let mut hidden = milestone_params(timeline.id, 2);
    hidden.hidden = true;
    hidden.start_date = date(2024, 6, 1);
    hidden.end_date = Some(date(2024, 6, 30));
    db.create_milestone(&hidden).unwrap();

    let removed = db
        .create_milestone(&milestone_params(timeline.id, 3))
        .unwrap();
    db.delete_milestone(timeline.id, removed.id).unwrap();

    let progress = db.timeline_progress(timeline.id).unwrap();
    assert_eq!(progress.duration, 25);
    assert_eq!(progress.completed_duration, 5);
    assert_eq!(progress.scheduled_duration, 20);
    assert_eq!(progress.progress, 25);
}

#[test]
fn test_timeline_crud() {
    let (_temp_file, mut db) = create_test_db();
    let first = db.create_timeline(&timeline_params(None)).unwrap();
    let mut other_owner = timeline_params(None);
    other_owner.reference_id = 8;
    db.create_timeline(&other_owner).unwrap();

    let fetched = db.get_timeline(first.id).unwrap().unwrap();
    assert_eq!(fetched, first);

    let owned = db
        .list_timelines(&TimelineRef {
            reference: "project".to_string(),
            reference_id: 7,
        })
        .unwrap();
    assert_eq!(owned, vec![first.clone()]);

    let deleted = db.delete_timeline(first.id).unwrap();
    assert!(deleted.is_deleted());
    assert!(db.get_timeline(first.id).unwrap().is_none());
    assert!(matches!(
        db.delete_timeline(first.id).unwrap_err(),
        ScheduleError::TimelineNotFound { .. }
    ));
}

#[test]
fn test_create_timeline_rejects_inverted_range() {
    let (_temp_file, mut db) = create_test_db();
    let mut params = timeline_params(Some(date(2023, 12, 31)));
    params.start_date = date(2024, 1, 1);

    let error = db.create_timeline(&params).unwrap_err();
    assert!(matches!(error, ScheduleError::InvalidInput { ref field, .. } if field == "end_date"));
}

#[test]
fn test_deleted_timeline_rejects_milestone_writes() {
    let (_temp_file, mut db) = create_test_db();
    let (timeline, ids) = seed_timeline(&mut db, &[1]);
    db.delete_timeline(timeline.id).unwrap();

    let error = db
        .update_milestone(&move_to(timeline.id, ids[0], 2))
        .unwrap_err();
    assert!(matches!(error, ScheduleError::TimelineNotFound { .. }));
}

#[test]
fn test_purge_timeline_removes_everything() {
    let (_temp_file, mut db) = create_test_db();
    let (timeline, ids) = seed_timeline(&mut db, &[1, 2, 3]);
    db.delete_milestone(timeline.id, ids[2]).unwrap();

    let removed = db.purge_timeline(timeline.id).unwrap();
    assert_eq!(removed, 3);
    assert!(db.get_timeline(timeline.id).unwrap().is_none());
    assert!(matches!(
        db.purge_timeline(timeline.id).unwrap_err(),
        ScheduleError::TimelineNotFound { .. }
    ));
}

#[test]
fn test_data_survives_reopen() {
    let (temp_file, mut db) = create_test_db();
    let (timeline, ids) = seed_timeline(&mut db, &[1, 2]);
    db.update_milestone(&move_to(timeline.id, ids[0], 2)).unwrap();
    drop(db);

    let db = Database::new(temp_file.path()).unwrap();
    assert_eq!(
        orders(&db, timeline.id),
        BTreeMap::from([(ids[0], 2), (ids[1], 1)])
    );
}
