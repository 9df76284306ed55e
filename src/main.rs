//! Entry point for game-run.
use std::process::ExitCode;

use clap::Parser;
use game_run::{
    cli::GameRunArgs,
    lib::telemetry,
    runtime::{self, RuntimeExit},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match bootstrap() {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let command = GameRunArgs::parse().into_command();
    runtime::run(command)
}
