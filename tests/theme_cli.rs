mod support;

use predicates::str::contains;
use serde_json::Value;

use support::TestStore;

#[test]
fn theme_defaults_to_light() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();

    store
        .cmd()
        .args(["theme"])
        .assert()
        .success()
        .stdout(contains("light"));

    Ok(())
}

#[test]
fn theme_choice_survives_across_invocations() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();

    store
        .cmd()
        .args(["theme", "dark"])
        .assert()
        .success()
        .stdout(contains("dark"));

    let output = store
        .cmd()
        .args(["theme", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output)?;
    assert_eq!(envelope["data"]["dark"].as_bool(), Some(true));

    store
        .cmd()
        .args(["theme", "light"])
        .assert()
        .success()
        .stdout(contains("light"));

    Ok(())
}

#[test]
fn theme_rejects_unknown_modes() -> Result<(), Box<dyn std::error::Error>> {
    let store = TestStore::new();

    store
        .cmd()
        .args(["theme", "solarized"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown theme"));

    Ok(())
}
