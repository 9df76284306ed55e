//! Telemetry initialization and launch span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper recording one launch from option resolution to spawn.
pub struct LaunchSpan {
    span: Span,
    started_at: Instant,
    invocation_id: Uuid,
}

impl LaunchSpan {
    /// Start a launch span. `source` names where the options came from.
    pub fn start(source: &str) -> Self {
        let invocation_id = Uuid::new_v4();
        let span = info_span!(
            target: "game_run::launch",
            "launch",
            %invocation_id,
            source
        );
        Self {
            span,
            started_at: Instant::now(),
            invocation_id,
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span while recording the outcome.
    pub fn finish(self, status: &'static str, pid: Option<u32>, argc: usize, env_count: usize) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "game_run::launch",
            invocation_id = %self.invocation_id,
            status = status,
            pid = pid,
            argc = argc,
            env_count = env_count,
            elapsed_ms = elapsed_ms,
            "Finished launch"
        );
    }
}
