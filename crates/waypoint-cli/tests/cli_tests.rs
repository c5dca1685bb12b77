use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command against `db_path` with colors off
fn wp_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wp").expect("Failed to find wp binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

fn create_timeline(db_path: &Path) {
    wp_cmd(db_path)
        .args([
            "timeline",
            "create",
            "Launch",
            "--start",
            "2024-01-01",
            "--end",
            "2024-06-30",
            "--reference",
            "project",
            "--reference-id",
            "7",
        ])
        .assert()
        .success();
}

fn add_milestone(db_path: &Path, name: &str, order: &str) {
    wp_cmd(db_path)
        .args([
            "milestone",
            "add",
            "1",
            name,
            "--order",
            order,
            "--start",
            "2024-02-01",
            "--end",
            "2024-02-10",
            "--duration",
            "10",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_create_timeline() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wp_cmd(&db_path)
        .args([
            "timeline",
            "create",
            "Launch",
            "--start",
            "2024-01-01",
            "--reference",
            "project",
            "--reference-id",
            "7",
            "--description",
            "Road to GA",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created timeline with ID: 1"))
        .stdout(predicate::str::contains("# 1. Launch"))
        .stdout(predicate::str::contains("2024-01-01 → open"))
        .stdout(predicate::str::contains("Road to GA"));
}

#[test]
fn test_cli_create_timeline_rejects_inverted_dates() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wp_cmd(&db_path)
        .args([
            "timeline",
            "create",
            "Backwards",
            "--start",
            "2024-05-01",
            "--end",
            "2024-04-01",
            "--reference",
            "project",
            "--reference-id",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("end_date"));
}

#[test]
fn test_cli_list_timelines() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wp_cmd(&db_path)
        .args(["timeline", "list", "--reference", "project", "--reference-id", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No timelines found."));

    create_timeline(&db_path);

    wp_cmd(&db_path)
        .args(["timeline", "list", "--reference", "project", "--reference-id", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Launch"));
}

#[test]
fn test_cli_add_and_list_milestones() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_timeline(&db_path);

    wp_cmd(&db_path)
        .args([
            "milestone",
            "add",
            "1",
            "Design",
            "--order",
            "1",
            "--start",
            "2024-02-01",
            "--duration",
            "5",
            "--details",
            r#"{"owner": "ux"}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created milestone with ID: 1 at position 1",
        ))
        .stdout(predicate::str::contains("\"owner\": \"ux\""));

    add_milestone(&db_path, "Build", "2");

    wp_cmd(&db_path)
        .args(["milestone", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Design (○ planned)"))
        .stdout(predicate::str::contains("### 2. Build (○ planned)"));
}

#[test]
fn test_cli_add_milestone_at_occupied_order_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_timeline(&db_path);
    add_milestone(&db_path, "Design", "1");

    wp_cmd(&db_path)
        .args([
            "milestone",
            "add",
            "1",
            "Duplicate",
            "--order",
            "1",
            "--start",
            "2024-02-01",
            "--duration",
            "5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Order 1 is already taken"));
}

#[test]
fn test_cli_move_milestone_shifts_siblings() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_timeline(&db_path);
    add_milestone(&db_path, "First", "1");
    add_milestone(&db_path, "Second", "2");
    add_milestone(&db_path, "Third", "3");

    wp_cmd(&db_path)
        .args(["milestone", "update", "1", "3", "--order", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated milestone with ID: 3"))
        .stdout(predicate::str::contains("- Moved from position 3 to 1"))
        .stdout(predicate::str::contains("- Shifted milestone 1 to position 2"))
        .stdout(predicate::str::contains("- Shifted milestone 2 to position 3"));

    wp_cmd(&db_path)
        .args(["milestone", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Third"))
        .stdout(predicate::str::contains("### 2. First"))
        .stdout(predicate::str::contains("### 3. Second"));
}

#[test]
fn test_cli_move_into_gap_reports_no_shift() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_timeline(&db_path);
    add_milestone(&db_path, "First", "1");
    add_milestone(&db_path, "Second", "2");

    wp_cmd(&db_path)
        .args(["milestone", "update", "1", "1", "--order", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Moved from position 1 to 9"))
        .stdout(predicate::str::contains("Shifted").not());
}

#[test]
fn test_cli_update_rejects_start_before_timeline() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_timeline(&db_path);
    add_milestone(&db_path, "First", "1");

    wp_cmd(&db_path)
        .args(["milestone", "update", "1", "1", "--start", "2023-12-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed"))
        .stderr(predicate::str::contains(
            "start_date: start date 2023-12-01 is before the timeline start 2024-01-01",
        ));
}

#[test]
fn test_cli_update_status_shows_status_text() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_timeline(&db_path);
    add_milestone(&db_path, "First", "1");

    wp_cmd(&db_path)
        .args([
            "milestone",
            "update",
            "1",
            "1",
            "--status",
            "blocked",
            "--blocked-text",
            "Waiting on vendor",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("(✗ blocked)"))
        .stdout(predicate::str::contains("> Waiting on vendor"));
}

#[test]
fn test_cli_delete_milestone_and_show_missing() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_timeline(&db_path);
    add_milestone(&db_path, "First", "1");

    wp_cmd(&db_path)
        .args(["milestone", "delete", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted milestone 'First' (ID: 1), position 1 is now free",
        ));

    wp_cmd(&db_path)
        .args(["milestone", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Milestone with ID 1 not found"));

    wp_cmd(&db_path)
        .args(["milestone", "list", "1", "--deleted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Deleted"));
}

#[test]
fn test_cli_timeline_show_and_progress() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_timeline(&db_path);
    add_milestone(&db_path, "First", "1");
    add_milestone(&db_path, "Second", "2");

    wp_cmd(&db_path)
        .args([
            "milestone",
            "update",
            "1",
            "1",
            "--completed-on",
            "2024-02-10",
        ])
        .assert()
        .success();

    wp_cmd(&db_path)
        .args(["timeline", "progress", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Progress: 50%"))
        .stdout(predicate::str::contains("- Completed: 10 of 20 scheduled days"));

    wp_cmd(&db_path)
        .args(["timeline", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Launch"))
        .stdout(predicate::str::contains("## Milestones"))
        .stdout(predicate::str::contains("### 2. Second"));
}

#[test]
fn test_cli_delete_timeline() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_timeline(&db_path);

    wp_cmd(&db_path)
        .args(["timeline", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted timeline 'Launch' (ID: 1)"));

    wp_cmd(&db_path)
        .args(["timeline", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Timeline with ID 1 not found"));
}

#[test]
fn test_cli_help_output() {
    Command::cargo_bin("wp")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("timeline"))
        .stdout(predicate::str::contains("milestone"))
        .stdout(predicate::str::contains("--database-file"));
}

#[test]
fn test_cli_invalid_date_is_rejected_by_parser() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wp_cmd(&db_path)
        .args([
            "timeline",
            "create",
            "Bad",
            "--start",
            "not-a-date",
            "--reference",
            "project",
            "--reference-id",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--start"));
}
