use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A throwaway store directory for one test.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A tm command pointed at this store.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tm").expect("tm binary");
        cmd.arg("--store").arg(self.path());
        cmd
    }

    /// Run `tm list --json` and return the parsed envelope.
    pub fn list_json(&self) -> Value {
        let output = self
            .cmd()
            .args(["list", "--json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("valid json envelope")
    }

    /// Id of the task at `index` in store order (newest first).
    pub fn task_id(&self, index: usize) -> String {
        self.list_json()["data"]["tasks"][index]["id"]
            .as_str()
            .expect("task id")
            .to_string()
    }
}
