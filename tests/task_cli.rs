mod support;

use predicates::str::contains;
use serde_json::Value;

use support::TestStore;

#[test]
fn add_then_list_shows_the_task() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();

    store
        .cmd()
        .args(["add", "Buy milk", "--priority", "low"])
        .assert()
        .success()
        .stdout(contains("Task created"))
        .stdout(contains("Buy milk"));

    store
        .cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Buy milk"))
        .stdout(contains("low"));

    let envelope = store.list_json();
    assert_eq!(envelope["schema_version"].as_str(), Some("tm.v1"));
    assert_eq!(envelope["command"].as_str(), Some("list"));
    assert_eq!(envelope["data"]["total"].as_u64(), Some(1));
    let task = &envelope["data"]["tasks"][0];
    assert_eq!(task["title"].as_str(), Some("Buy milk"));
    assert_eq!(task["completed"].as_bool(), Some(false));
    assert_eq!(task["priority"].as_str(), Some("low"));
    assert!(task["dueDate"].is_null());
    assert!(task["createdAt"].is_string());

    Ok(())
}

#[test]
fn new_tasks_are_listed_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();

    store.cmd().args(["add", "First"]).assert().success();
    store.cmd().args(["add", "Second"]).assert().success();
    store.cmd().args(["add", "Third"]).assert().success();

    let envelope = store.list_json();
    let titles: Vec<&str> = envelope["data"]["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .map(|task| task["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);

    Ok(())
}

#[test]
fn whitespace_title_is_rejected_as_user_error() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();

    store
        .cmd()
        .args(["add", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("title cannot be empty"));

    assert_eq!(store.list_json()["data"]["total"].as_u64(), Some(0));

    Ok(())
}

#[test]
fn toggle_flips_completion_and_counts() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();
    store.cmd().args(["add", "Toggle me"]).assert().success();
    let id = store.task_id(0);

    store
        .cmd()
        .args(["toggle", &id])
        .assert()
        .success()
        .stdout(contains("Task completed"));

    let envelope = store.list_json();
    assert_eq!(envelope["data"]["counts"]["completed"].as_u64(), Some(1));
    assert_eq!(envelope["data"]["counts"]["active"].as_u64(), Some(0));
    assert_eq!(
        envelope["data"]["tasks"][0]["completed"].as_bool(),
        Some(true)
    );

    store
        .cmd()
        .args(["toggle", &id])
        .assert()
        .success()
        .stdout(contains("Task reopened"));
    assert_eq!(
        store.list_json()["data"]["tasks"][0]["completed"].as_bool(),
        Some(false)
    );

    Ok(())
}

#[test]
fn toggle_accepts_unique_id_prefix() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();
    store.cmd().args(["add", "Prefixed"]).assert().success();
    let id = store.task_id(0);

    store
        .cmd()
        .args(["toggle", &id[..8]])
        .assert()
        .success()
        .stdout(contains("Task completed"));

    Ok(())
}

#[test]
fn unknown_id_is_a_user_error() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();
    store.cmd().args(["add", "Lonely"]).assert().success();

    store
        .cmd()
        .args(["toggle", "zzzzzzzz"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("No task matches"));

    store
        .cmd()
        .args(["rm", "zzzzzzzz"])
        .assert()
        .failure()
        .code(2);

    assert_eq!(store.list_json()["data"]["total"].as_u64(), Some(1));

    Ok(())
}

#[test]
fn rm_deletes_only_the_matching_task() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();
    store.cmd().args(["add", "Keep A"]).assert().success();
    store.cmd().args(["add", "Drop me"]).assert().success();
    store.cmd().args(["add", "Keep B"]).assert().success();
    let id = store.task_id(1);

    store
        .cmd()
        .args(["rm", &id])
        .assert()
        .success()
        .stdout(contains("Task deleted"));

    let envelope = store.list_json();
    let titles: Vec<&str> = envelope["data"]["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .map(|task| task["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["Keep B", "Keep A"]);

    Ok(())
}

#[test]
fn list_filters_active_and_completed() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();
    store.cmd().args(["add", "Open task"]).assert().success();
    store.cmd().args(["add", "Done task"]).assert().success();
    let done_id = store.task_id(0);
    store.cmd().args(["toggle", &done_id]).assert().success();

    let output = store
        .cmd()
        .args(["list", "--filter", "active", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let active: Value = serde_json::from_slice(&output)?;
    assert_eq!(active["data"]["total"].as_u64(), Some(1));
    assert_eq!(
        active["data"]["tasks"][0]["title"].as_str(),
        Some("Open task")
    );

    let output = store
        .cmd()
        .args(["list", "--filter", "completed", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let completed: Value = serde_json::from_slice(&output)?;
    assert_eq!(completed["data"]["total"].as_u64(), Some(1));
    assert_eq!(
        completed["data"]["tasks"][0]["title"].as_str(),
        Some("Done task")
    );

    // Counts describe the whole collection regardless of the filter.
    assert_eq!(completed["data"]["counts"]["all"].as_u64(), Some(2));

    store
        .cmd()
        .args(["list", "--filter", "bogus"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown filter"));

    Ok(())
}

#[test]
fn json_errors_use_the_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();

    let output = store
        .cmd()
        .args(["toggle", "nope", "--json"])
        .assert()
        .failure()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output)?;
    assert_eq!(envelope["status"].as_str(), Some("error"));
    assert_eq!(envelope["command"].as_str(), Some("toggle"));
    assert_eq!(envelope["error"]["code"].as_i64(), Some(2));

    Ok(())
}
