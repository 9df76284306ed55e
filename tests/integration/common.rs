use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

use serde_json::Value;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_game-run");

pub fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Run the binary with a controlled environment.
pub fn run_game_run(args: &[&str], profile_store: Option<&Path>) -> Output {
    let mut command = Command::new(BINARY_PATH);
    command
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("GAME_RUN_CONFIG")
        .env("HOME", "/home/tester");
    if let Some(store) = profile_store {
        command.env("GAME_RUN_CONFIG", store);
    }
    command.output().expect("game-run binary should run")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Parse the `--dry-run` JSON payload, failing with the captured stderr.
pub fn dry_run_payload(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "dry run should succeed, stderr:\n{}",
        stderr(output)
    );
    serde_json::from_str(&stdout(output)).expect("dry run prints JSON")
}

pub fn argv(payload: &Value) -> Vec<String> {
    payload["argv"]
        .as_array()
        .expect("argv is an array")
        .iter()
        .map(|token| token.as_str().expect("argv tokens are strings").to_string())
        .collect()
}
