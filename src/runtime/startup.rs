use std::process::ExitCode;

use anyhow::Error;
use clap::CommandFactory;

use crate::{
    cli::{execute_cli_command, execute_flag_launch, version_text, GameRunArgs, ParsedCommand},
    lib::errors::{ErrorDescriptor, ExecuteError, LaunchError, ProfileStoreError},
};

/// Bundles a runtime error message with an exit code and an optional remediation hint.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
    descriptor: Option<&'static ErrorDescriptor>,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            descriptor: descriptor_for(&err),
            message: format!("{err:#}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("game-run: {}", self.message);
        if let Some(descriptor) = self.descriptor {
            eprintln!("hint [{}]: {}", descriptor.code, descriptor.remediation);
        }
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn descriptor(&self) -> Option<&'static ErrorDescriptor> {
        self.descriptor
    }
}

fn descriptor_for(err: &Error) -> Option<&'static ErrorDescriptor> {
    if let Some(err) = err.downcast_ref::<LaunchError>() {
        return Some(err.descriptor());
    }
    if let Some(err) = err.downcast_ref::<ProfileStoreError>() {
        return Some(err.descriptor());
    }
    err.downcast_ref::<ExecuteError>().map(ExecuteError::descriptor)
}

/// Run one parsed invocation to completion.
pub fn run(command: ParsedCommand) -> Result<(), RuntimeExit> {
    let output = match command {
        ParsedCommand::Help => {
            GameRunArgs::command()
                .print_help()
                .map_err(RuntimeExit::from_error)?;
            None
        }
        ParsedCommand::Version => Some(version_text()),
        ParsedCommand::LaunchFlags(flags) => {
            execute_flag_launch(flags).map_err(RuntimeExit::from_error)?
        }
        ParsedCommand::Cli {
            command,
            config_override,
        } => execute_cli_command(command, config_override).map_err(RuntimeExit::from_error)?,
    };

    if let Some(output) = output {
        println!("{output}");
    }
    tracing::debug!(target: "game_run::runtime", "Invocation finished");
    Ok(())
}
