use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a `wp` command with --no-color against `db_path`
fn wp_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wp").expect("Failed to find wp binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

fn run_ok(db_path: &Path, args: &[&str]) -> String {
    let output = wp_cmd(db_path)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).expect("Invalid UTF-8")
}

/// Extract the ID from a "Created ... with ID: <n>" line
fn extract_id_from_output(output: &str) -> String {
    let start = output.find("ID: ").expect("No ID in output") + 4;
    output[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect()
}

/// Step IDs in display order, read from "- [ ] n. Title (ID: x)" lines
fn step_ids(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.starts_with("- [ ] ") || line.starts_with("- [x] "))
        .map(|line| {
            let start = line.rfind("(ID: ").expect("No step ID") + 5;
            line[start..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect()
        })
        .collect()
}

#[test]
fn test_cli_create_event_parses_description() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wp_cmd(&db_path)
        .args([
            "event",
            "create",
            "Move house",
            "--description",
            "1. Pack boxes\n2. Rent van",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created event with ID: 1"))
        .stdout(predicate::str::contains("# 1. Move house"))
        .stdout(predicate::str::contains("- [ ] 1. Pack boxes"))
        .stdout(predicate::str::contains("- [ ] 2. Rent van"));
}

#[test]
fn test_cli_create_event_falls_back_to_generic_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wp_cmd(&db_path)
        .args(["event", "create", "Something"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Begin preparation"))
        .stdout(predicate::str::contains("Review and accept"))
        .stdout(predicate::str::contains("## Steps (0/4)"));
}

#[test]
fn test_cli_create_event_with_explicit_steps() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wp_cmd(&db_path)
        .args(["event", "create", "Dinner", "-s", "Shop", "-s", "Cook"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Shop\n2. Cook"))
        .stdout(predicate::str::contains("Begin preparation").not());
}

#[test]
fn test_cli_list_events() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wp_cmd(&db_path)
        .args(["event", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No events found."));

    run_ok(&db_path, &["event", "create", "Listed"]);

    // no subcommand lists events too
    wp_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Events"))
        .stdout(predicate::str::contains("## Listed (ID: 1)"));
}

#[test]
fn test_cli_template_drives_generation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wp_cmd(&db_path)
        .args([
            "template", "add", "travel", "-k", "trip,flight", "-s", "Book tickets", "-s",
            "Pack bags", "-p", "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created template with ID: 1"));

    wp_cmd(&db_path)
        .args(["preview", "Weekend Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("template 'travel' (keyword match)"))
        .stdout(predicate::str::contains("1. Book tickets"));

    wp_cmd(&db_path)
        .args(["preview", "Anything", "-c", "travel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(category match)"));

    // preview stores nothing
    wp_cmd(&db_path)
        .args(["event", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No events found."));

    wp_cmd(&db_path)
        .args(["template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## travel (ID: 1, priority 5)"))
        .stdout(predicate::str::contains("trip, flight"));

    wp_cmd(&db_path)
        .args(["template", "remove", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted template 'travel' (ID: 1)"));

    wp_cmd(&db_path)
        .args(["template", "remove", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template with ID 1 not found"));
}

#[test]
fn test_cli_template_import() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let file = temp_dir.path().join("templates.json");
    std::fs::write(
        &file,
        r#"[{"category": "study", "keywords": ["exam"], "template_steps": [{"title": "Review"}]}]"#,
    )
    .unwrap();

    wp_cmd(&db_path)
        .args(["template", "import", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 template(s)"));

    wp_cmd(&db_path)
        .args(["event", "create", "Final exam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [ ] 1. Review"));
}

#[test]
fn test_cli_step_workflow() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let created = run_ok(&db_path, &["event", "create", "Garden", "-d", "1. Dig\n2. Plant"]);
    let event_id = extract_id_from_output(&created);

    let added = run_ok(&db_path, &["step", "add", &event_id, "Water"]);
    assert!(added.contains("Created step with ID:"));

    wp_cmd(&db_path)
        .args(["step", "insert", &event_id, "0", "Buy seeds"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [ ] 1. Buy seeds"));

    let shown = run_ok(&db_path, &["event", "show", &event_id]);
    assert!(shown.contains("1. Buy seeds\n2. Dig\n3. Plant\n4. Water"));
    let ids = step_ids(&shown);
    assert_eq!(ids.len(), 4);

    wp_cmd(&db_path)
        .args(["step", "done", &ids[0]])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [x] 1. Buy seeds"));

    wp_cmd(&db_path)
        .args(["step", "update", &ids[1], "--title", "Dig beds"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes made:\n- Updated title"));

    wp_cmd(&db_path)
        .args(["step", "remove", &ids[3]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted step 'Water'"));

    let reversed = [ids[2].as_str(), ids[1].as_str(), ids[0].as_str()];
    let mut reorder = vec!["step", "reorder", event_id.as_str()];
    reorder.extend(reversed);
    wp_cmd(&db_path)
        .args(&reorder)
        .assert()
        .success()
        .stdout(predicate::str::contains("- [ ] 1. Plant"));

    wp_cmd(&db_path)
        .args(["event", "show", &event_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Plant\n2. Dig beds\n3. Buy seeds"))
        .stdout(predicate::str::contains("## Steps (1/3)"));

    wp_cmd(&db_path)
        .args(["step", "undo", &ids[0]])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [ ] 3. Buy seeds"));
}

#[test]
fn test_cli_regenerate_sync_and_merge() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let created = run_ok(&db_path, &["event", "create", "Essay", "-s", "Outline", "-s", "Draft"]);
    let event_id = extract_id_from_output(&created);

    wp_cmd(&db_path)
        .args(["event", "regenerate", &event_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Regenerated 2 step(s), parsed from description"));

    wp_cmd(&db_path)
        .args(["event", "sync", &event_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Outline\n2. Draft"));

    wp_cmd(&db_path)
        .args(["event", "merge", &event_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Outline\n2. Draft"))
        .stdout(predicate::str::contains("Execution steps:").not());
}

#[test]
fn test_cli_update_then_regenerate() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    run_ok(
        &db_path,
        &["template", "add", "travel", "-k", "trip", "-s", "Book tickets", "-s", "Pack bags"],
    );
    let created = run_ok(&db_path, &["event", "create", "Weekend trip"]);
    let event_id = extract_id_from_output(&created);
    assert!(created.contains("1. Book tickets\n2. Pack bags"));

    // clearing the synced list lets the template match again
    wp_cmd(&db_path)
        .args(["event", "regenerate", &event_id, "-d", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Cleared description"))
        .stdout(predicate::str::contains(
            "Regenerated 2 step(s), template 'travel' (keyword match)",
        ));

    wp_cmd(&db_path)
        .args(["event", "update", &event_id, "-t", "Spa day", "-d", "Relax"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Updated title\n- Updated description"))
        .stdout(predicate::str::contains("# 1. Spa day"))
        .stdout(predicate::str::contains("## Steps (0/2)"));

    wp_cmd(&db_path)
        .args(["event", "regenerate", &event_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Regenerated 4 step(s), generic plan"))
        .stdout(predicate::str::contains("Relax"));

    wp_cmd(&db_path)
        .args(["event", "update", &event_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));

    wp_cmd(&db_path)
        .args(["event", "update", "99", "-t", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Event with ID 99 not found"));
}

#[test]
fn test_cli_event_status() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let created = run_ok(&db_path, &["event", "create", "Paint fence"]);
    let event_id = extract_id_from_output(&created);
    assert!(created.contains("- Status: ○ Pending"));

    wp_cmd(&db_path)
        .args(["event", "status", &event_id, "in-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Status set to in_progress"))
        .stdout(predicate::str::contains("- Status: ➤ In Progress"));

    wp_cmd(&db_path)
        .args(["event", "done", &event_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Status: ✓ Completed"))
        .stdout(predicate::str::contains("- Completed: "));

    wp_cmd(&db_path)
        .args(["event", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Completed"));

    wp_cmd(&db_path)
        .args(["event", "status", &event_id, "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Completed: ").not());

    wp_cmd(&db_path)
        .args(["event", "status", &event_id, "archived"])
        .assert()
        .failure();
}

#[test]
fn test_cli_delete_requires_confirm() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let created = run_ok(&db_path, &["event", "create", "Temp"]);
    let event_id = extract_id_from_output(&created);

    wp_cmd(&db_path)
        .args(["event", "delete", &event_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    wp_cmd(&db_path)
        .args(["event", "delete", &event_id, "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted event 'Temp'"))
        .stdout(predicate::str::contains("and 4 step(s)"));

    wp_cmd(&db_path)
        .args(["event", "show", &event_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_invalid_input_errors() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wp_cmd(&db_path)
        .args(["event", "create", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create event"));

    let created = run_ok(&db_path, &["event", "create", "Pos", "-s", "Only"]);
    let event_id = extract_id_from_output(&created);

    wp_cmd(&db_path)
        .args(["step", "insert", &event_id, "5", "Far away"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("position"));

    wp_cmd(&db_path)
        .args(["step", "update", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn test_cli_text_tools() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    wp_cmd(&db_path)
        .args(["text", "describe", "Wash", "Dry"])
        .assert()
        .success()
        .stdout("1. Wash\n2. Dry\n");

    wp_cmd(&db_path)
        .args(["text", "parse", "intro\n1. A\n- B\n3. "])
        .assert()
        .success()
        .stdout("A\nB\n");

    wp_cmd(&db_path)
        .args(["text", "check", "1. only one"])
        .assert()
        .success()
        .stdout("false\n");

    wp_cmd(&db_path)
        .args(["text", "merge", "Notes", "Wash"])
        .assert()
        .success()
        .stdout("Notes\n\nExecution steps:\n1. Wash\n");
}
