use serde_json::Value;
use tempfile::tempdir;

use crate::common::{argv, dry_run_payload, run_game_run, stderr, stdout};

#[test]
fn no_arguments_prints_help_and_succeeds() {
    let output = run_game_run(&[], None);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"), "stdout:\n{}", stdout(&output));
}

#[test]
fn version_flag_prints_version() {
    let output = run_game_run(&["-v"], None);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        format!("game-run {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn frame_limiter_with_vulkan_vsync_leads_the_command() {
    let output = run_game_run(&["--dry-run", "-f", "60", "--vsync", "vulkan", "/games/doom"], None);
    let payload = dry_run_payload(&output);

    assert_eq!(argv(&payload), vec!["strangle", "60", "-v", "3", "/games/doom"]);
}

#[test]
fn proton_with_esync_exports_prefix_variables() {
    let output = run_game_run(
        &[
            "--dry-run",
            "-w",
            "proton",
            "-p",
            "/home/u/.wine-x",
            "-s",
            "esync",
            "game.exe",
        ],
        None,
    );
    let payload = dry_run_payload(&output);

    assert_eq!(
        argv(&payload),
        vec![
            "/usr/share/steam/compatibilitytools.d/proton-ge-custom/proton",
            "run",
            "game.exe"
        ]
    );
    let env = &payload["env"];
    assert_eq!(env["WINEPREFIX"], Value::String("/home/u/.wine-x".into()));
    assert_eq!(env["STEAM_COMPAT_DATA_PATH"], Value::String("/home/u/.wine-x".into()));
    assert_eq!(
        env["STEAM_COMPAT_CLIENT_INSTALL_PATH"],
        Value::String("/home/tester/.steam/steam".into())
    );
    assert_eq!(env["WINEESYNC"], Value::String("1".into()));
}

#[test]
fn steam_id_keeps_extra_arguments() {
    let output = run_game_run(&["--dry-run", "--steam", "-a", "-novid -console", "12345"], None);
    let payload = dry_run_payload(&output);

    assert_eq!(
        argv(&payload),
        vec!["steam", "steam://rungameid/12345", "-novid", "-console"]
    );
}

#[test]
fn extra_arguments_are_split_on_spaces() {
    let output = run_game_run(&["--dry-run", "-a", "-foo -bar baz", "game"], None);
    let payload = dry_run_payload(&output);

    assert_eq!(argv(&payload), vec!["game", "-foo", "-bar", "baz"]);
}

#[test]
fn fsync_without_wine_fails_before_spawning() {
    let temp = tempdir().expect("can create temp directory");
    let marker = temp.path().join("spawned");
    let marker_arg = marker.display().to_string();

    let output = run_game_run(&["-s", "fsync", "touch", "-a", &marker_arg], None);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("`sync` requires `wine`"),
        "stderr:\n{}",
        stderr(&output)
    );
    assert!(!marker.exists(), "nothing may be spawned");
}

#[test]
fn wine_without_prefix_is_rejected() {
    let output = run_game_run(&["-w", "wine", "game.exe"], None);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("`wine` requires `prefix`"));
    assert!(stderr(&output).contains("hint [dependency_error]"));
}

#[test]
fn flags_without_a_game_report_a_missing_target() {
    let output = run_game_run(&["-g"], None);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No game path or id was provided"));
}

#[test]
fn real_launch_creates_the_prefix_and_spawns() {
    let temp = tempdir().expect("can create temp directory");
    let prefix = temp.path().join("prefixes").join("doom");
    let prefix_arg = prefix.display().to_string();

    let output = run_game_run(&["-w", "true", "-p", &prefix_arg, "game.exe"], None);

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert!(prefix.is_dir(), "prefix directory is created before spawning");
}

#[test]
fn unknown_program_exits_with_failure() {
    let output = run_game_run(&["/nonexistent/game-run-missing-game"], None);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to spawn"));
}
