use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary homes live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated application home directory.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// The CLI in script mode with colours off and its own home directory.
pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("budget_tracker_cli").expect("binary built");
    cmd.env("BUDGET_TRACKER_CLI_SCRIPT", "1")
        .env("BUDGET_TRACKER_HOME", home)
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env_remove("RUST_LOG");
    cmd
}
