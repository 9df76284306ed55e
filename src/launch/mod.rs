//! Option resolution, command assembly and spawning of a game launch.
use anyhow::Result;

use crate::lib::telemetry::LaunchSpan;

pub mod builder;
pub mod executor;
pub mod normalize;
pub mod options;

pub use builder::{build_launch_plan, BuildContext, LaunchPlan};
pub use executor::{build_command, DryRunSink, LaunchSink, ProcessSpawner};
pub use normalize::FLAGS_ORIGIN;
pub use options::{
    CompatLayer, OverlayOptions, ResolvedOptions, RuntimeKind, SyncMode, VsyncMode,
};

/// Result of handing a plan to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub plan: LaunchPlan,
    pub pid: Option<u32>,
}

/// Build the plan for `options` and pass it to `sink`.
///
/// Nothing reaches the sink unless every dependency check passed.
pub fn launch(
    options: &ResolvedOptions,
    source: &str,
    context: &BuildContext,
    sink: &mut dyn LaunchSink,
) -> Result<LaunchReport> {
    let span = LaunchSpan::start(source);
    let plan = {
        let _entered = span.span().enter();
        build_launch_plan(options, context)
    };
    let plan = match plan {
        Ok(plan) => plan,
        Err(err) => {
            span.finish("rejected", None, 0, 0);
            return Err(err.into());
        }
    };

    let pid = {
        let _entered = span.span().enter();
        sink.execute(&plan)
    };
    match pid {
        Ok(pid) => {
            span.finish("launched", pid, plan.argv.len(), plan.env.len());
            Ok(LaunchReport { plan, pid })
        }
        Err(err) => {
            span.finish("failed", None, plan.argv.len(), plan.env.len());
            Err(err.into())
        }
    }
}
