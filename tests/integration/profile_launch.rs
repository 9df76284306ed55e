use std::fs;

use serde_json::Value;
use tempfile::tempdir;

use crate::common::{argv, dry_run_payload, fixture, run_game_run, stderr, stdout};

#[test]
fn list_prints_every_game() {
    let store = fixture("tests/fixtures/games.ini");
    let output = run_game_run(&["list"], Some(&store));

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let names: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(
        names,
        vec!["broken", "celeste", "cyberpunk", "minecraft", "witcher3"]
    );
}

#[test]
fn list_filters_by_category_and_categories_are_distinct() {
    let store = fixture("tests/fixtures/games.ini");

    let rpg = run_game_run(&["list", "rpg"], Some(&store));
    assert_eq!(stdout(&rpg).trim(), "cyberpunk\nwitcher3");

    let categories = run_game_run(&["categories"], Some(&store));
    assert_eq!(stdout(&categories).trim(), "platformer\nrpg\nsandbox");
}

#[test]
fn section_names_with_spaces_and_dots_are_listed_verbatim() {
    let temp = tempdir().expect("can create temp directory");
    let store = temp.path().join("games.ini");
    fs::write(
        &store,
        "[Dark Souls]\npath = ds.exe\n\n[half.life]\npath = hl.exe\n",
    )
    .expect("can write store");

    let list = run_game_run(&["list"], Some(&store));
    assert!(list.status.success(), "stderr:\n{}", stderr(&list));
    assert_eq!(stdout(&list).trim(), "Dark Souls\nhalf.life");

    let launch = run_game_run(&["launch", "half.life", "--dry-run"], Some(&store));
    assert_eq!(argv(&dry_run_payload(&launch)), vec!["hl.exe"]);
}

#[test]
fn disabled_fsr_without_wine_is_rejected() {
    let temp = tempdir().expect("can create temp directory");
    let store = temp.path().join("games.ini");
    fs::write(&store, "[doom]\npath = doom\nfsr = no\n").expect("can write store");

    let output = run_game_run(&["launch", "doom", "--dry-run"], Some(&store));

    assert!(!output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("`fsr` requires `wine`"), "stderr:\n{stderr}");
    assert!(stderr.contains("hint [dependency_error]"), "stderr:\n{stderr}");
}

#[test]
fn config_flag_overrides_environment() {
    let store = fixture("tests/fixtures/games.toml");
    let store_arg = store.display().to_string();
    let bogus = fixture("tests/fixtures/does-not-exist.ini");

    let output = run_game_run(&["list", "--config", &store_arg], Some(&bogus));

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "hades\nportal2");
}

#[test]
fn profile_with_wrappers_builds_the_full_command() {
    let store = fixture("tests/fixtures/games.ini");
    let output = run_game_run(&["launch", "celeste", "--dry-run"], Some(&store));
    let payload = dry_run_payload(&output);

    assert_eq!(
        argv(&payload),
        vec![
            "strangle",
            "60",
            "-v",
            "3",
            "gamemoderun",
            "mangohud",
            "/games/celeste/Celeste"
        ]
    );
    assert_eq!(payload["source"], Value::String("profile section `celeste`".into()));
}

#[test]
fn profile_with_proton_sets_cache_and_sync_variables() {
    let store = fixture("tests/fixtures/games.ini");
    let output = run_game_run(&["launch", "witcher3", "--dry-run"], Some(&store));
    let payload = dry_run_payload(&output);

    assert_eq!(
        argv(&payload),
        vec![
            "/usr/share/steam/compatibilitytools.d/proton-ge-custom/proton",
            "run",
            "/games/witcher3/bin/x64/witcher3.exe",
            "-skipintro",
            "-dx12"
        ]
    );
    let env = &payload["env"];
    assert_eq!(env["WINEFSYNC"], Value::String("1".into()));
    assert_eq!(env["WINE_FULLSCREEN_FSR"], Value::String("1".into()));
    assert_eq!(
        env["DXVK_STATE_CACHE_PATH"],
        Value::String("/tmp/game-run-fixture/witcher3".into())
    );
    assert_eq!(
        payload["prefix_dir"],
        Value::String("/tmp/game-run-fixture/witcher3".into())
    );
}

#[test]
fn steam_profile_with_prime_and_dxvk_frame_rate() {
    let store = fixture("tests/fixtures/games.ini");
    let output = run_game_run(&["launch", "cyberpunk", "--dry-run"], Some(&store));
    let payload = dry_run_payload(&output);

    assert_eq!(argv(&payload), vec!["steam", "steam://rungameid/1091500"]);
    let env = &payload["env"];
    assert_eq!(env["__NV_PRIME_RENDER_OFFLOAD"], Value::String("1".into()));
    assert_eq!(env["DXVK_FRAME_RATE"], Value::String("50".into()));
}

#[test]
fn java_profile_keeps_working_dir_for_the_child() {
    let store = fixture("tests/fixtures/games.ini");
    let output = run_game_run(&["launch", "minecraft", "--dry-run"], Some(&store));
    let payload = dry_run_payload(&output);

    assert_eq!(
        argv(&payload),
        vec!["java", "-jar", "/games/minecraft/launcher.jar"]
    );
    assert_eq!(payload["working_dir"], Value::String("/games/minecraft".into()));
}

#[test]
fn malformed_boolean_is_a_config_error() {
    let store = fixture("tests/fixtures/games.ini");
    let output = run_game_run(&["launch", "broken"], Some(&store));

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("`maybe`"), "stderr:\n{stderr}");
    assert!(stderr.contains("hint [config_error]"), "stderr:\n{stderr}");
}

#[test]
fn unknown_game_exits_with_failure() {
    let store = fixture("tests/fixtures/games.ini");
    let output = run_game_run(&["launch", "half-life-3"], Some(&store));

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no game named `half-life-3`"));
}

#[test]
fn missing_profile_store_exits_with_failure() {
    let temp = tempdir().expect("can create temp directory");
    let store = temp.path().join("games.ini");

    let output = run_game_run(&["list"], Some(&store));

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("hint [profile_store_unreadable]"));
}

#[test]
fn profile_launch_spawns_with_prefix() {
    let temp = tempdir().expect("can create temp directory");
    let store = temp.path().join("games.ini");
    let prefix = temp.path().join("pfx");
    fs::write(
        &store,
        format!(
            "[noop]\npath = game.exe\nwine = true\nprefix = {}\nsync = esync\n",
            prefix.display()
        ),
    )
    .expect("can write store");

    let output = run_game_run(&["launch", "noop"], Some(&store));

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert!(prefix.is_dir(), "prefix directory is created");
}
