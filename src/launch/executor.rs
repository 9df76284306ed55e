//! Execute sink: prepare the prefix and spawn the planned process without waiting on it.
use std::process::Stdio;

use tokio::{process::Command, runtime::Handle};
use tracing::info;

use crate::lib::{errors::ExecuteError, fs as prefix_fs};

use super::LaunchPlan;

/// Receives a finished plan and starts it.
pub trait LaunchSink {
    /// Returns the pid of the spawned process when the platform reports one.
    fn execute(&mut self, plan: &LaunchPlan) -> Result<Option<u32>, ExecuteError>;
}

/// Spawns the game as a detached child of the launcher.
///
/// Must be called from inside a Tokio runtime; outside of one `execute`
/// returns [`ExecuteError::NoRuntime`] before touching the filesystem.
#[derive(Debug, Default)]
pub struct ProcessSpawner;

impl LaunchSink for ProcessSpawner {
    fn execute(&mut self, plan: &LaunchPlan) -> Result<Option<u32>, ExecuteError> {
        Handle::try_current().map_err(|_| ExecuteError::NoRuntime)?;

        if let Some(prefix) = &plan.prefix_dir {
            prefix_fs::ensure_prefix_dir(prefix)?;
        }

        let mut command = build_command(plan)?;
        let program = plan.program().unwrap_or_default().to_string();
        let child = command
            .spawn()
            .map_err(|source| ExecuteError::Spawn { program, source })?;
        let pid = child.id();
        info!(
            target: "game_run::launch",
            pid = pid,
            argv = ?plan.argv,
            "Spawned game process"
        );
        Ok(pid)
    }
}

/// Records the plan instead of running it (`--dry-run`).
#[derive(Debug, Default)]
pub struct DryRunSink {
    pub planned: Option<LaunchPlan>,
}

impl LaunchSink for DryRunSink {
    fn execute(&mut self, plan: &LaunchPlan) -> Result<Option<u32>, ExecuteError> {
        self.planned = Some(plan.clone());
        Ok(None)
    }
}

/// Build the child command: inherited environment plus the plan's assignments.
pub fn build_command(plan: &LaunchPlan) -> Result<Command, ExecuteError> {
    let (program, args) = plan.argv.split_first().ok_or(ExecuteError::EmptyCommand)?;

    let mut command = Command::new(program);
    command.args(args);
    command.envs(&plan.env);
    if let Some(dir) = &plan.working_dir {
        command.current_dir(dir);
    }
    command
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    Ok(command)
}
