//! CLI entrypoint module structure.
use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use crate::{
    launch::{self, BuildContext, DryRunSink, LaunchPlan, ProcessSpawner, ResolvedOptions},
    store::{telemetry as store_telemetry, ProfileStore},
};

pub mod args;
pub mod profile;

pub use args::{CliCommand, GameRunArgs, LaunchArgs, LaunchFlags, ListArgs, ParsedCommand};
pub use profile::{resolve_profile_store_path, StorePathSource};

/// Version line printed by `-v/--version`.
pub fn version_text() -> String {
    format!("game-run {}", env!("CARGO_PKG_VERSION"))
}

/// Launch from ad-hoc flags. Returns text to print, if any.
pub fn execute_flag_launch(flags: LaunchFlags) -> Result<Option<String>> {
    let options = ResolvedOptions::from_flags(&flags)?;
    run_launch(&options, launch::FLAGS_ORIGIN, flags.dry_run)
}

/// Execute a profile store command. Returns text to print, if any.
pub fn execute_cli_command(
    command: CliCommand,
    config_override: Option<PathBuf>,
) -> Result<Option<String>> {
    let store = load_profile_store(config_override)?;

    match command {
        CliCommand::Launch(args) => {
            let section = store.section(&args.game)?;
            let options = ResolvedOptions::from_profile(section)?;
            run_launch(&options, &section.origin(), args.dry_run)
        }
        CliCommand::List(args) => {
            let names: Vec<&str> = store
                .games(args.category.as_deref())
                .into_iter()
                .map(|section| section.name.as_str())
                .collect();
            Ok(join_lines(&names))
        }
        CliCommand::Categories => {
            let categories: Vec<&str> = store.categories().into_iter().collect();
            Ok(join_lines(&categories))
        }
    }
}

fn load_profile_store(config_override: Option<PathBuf>) -> Result<ProfileStore> {
    let (path, source) = resolve_profile_store_path(config_override)?;
    store_telemetry::log_path_source(&path, source);
    Ok(ProfileStore::load_from_path(path)?)
}

fn run_launch(options: &ResolvedOptions, source: &str, dry_run: bool) -> Result<Option<String>> {
    let context = BuildContext::from_env();

    if dry_run {
        let mut sink = DryRunSink::default();
        let report = launch::launch(options, source, &context, &mut sink)?;
        return render_plan(source, options, &report.plan).map(Some);
    }

    let mut sink = ProcessSpawner;
    launch::launch(options, source, &context, &mut sink)?;
    Ok(None)
}

/// Format a plan as the JSON payload printed by `--dry-run`.
pub fn render_plan(source: &str, options: &ResolvedOptions, plan: &LaunchPlan) -> Result<String> {
    let payload = json!({
        "source": source,
        "options": options,
        "argv": plan.argv,
        "env": plan.env,
        "working_dir": plan.working_dir,
        "prefix_dir": plan.prefix_dir,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

fn join_lines(lines: &[&str]) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    Some(lines.join("\n"))
}
