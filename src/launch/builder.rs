//! Assemble the argument vector and environment assignments for one launch.
//!
//! The build order is fixed: wrapper programs must precede the compatibility
//! layer, which precedes the runtime launcher, the target and finally the extra
//! arguments. Nothing here touches the process environment or the filesystem;
//! side effects are carried in the returned [`LaunchPlan`] and applied by the
//! executor.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{debug, warn};

use crate::lib::{errors::LaunchError, paths};

use super::options::{CompatLayer, ResolvedOptions, RuntimeKind, SyncMode};

pub const FRAME_LIMITER_BIN: &str = "strangle";
pub const VSYNC_FLAG: &str = "-v";
pub const CPU_GOVERNOR_BIN: &str = "gamemoderun";
pub const OVERLAY_BIN: &str = "mangohud";
pub const OVERLAY_DLSYM_FLAG: &str = "--dlsym";
pub const PROTON_RUN_VERB: &str = "run";

/// Host facts the builder needs but must not look up itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub steam_client_install_path: PathBuf,
    pub default_proton_path: PathBuf,
}

impl BuildContext {
    pub fn from_env() -> Self {
        Self {
            steam_client_install_path: paths::steam_client_install_path(),
            default_proton_path: PathBuf::from(paths::DEFAULT_PROTON_PATH),
        }
    }
}

/// Fully resolved process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    /// Program followed by its arguments.
    pub argv: Vec<String>,
    /// Assignments layered over the inherited environment.
    pub env: BTreeMap<String, String>,
    /// Working directory of the spawned process.
    pub working_dir: Option<PathBuf>,
    /// Prefix directory to create before spawning.
    pub prefix_dir: Option<PathBuf>,
}

impl LaunchPlan {
    fn arg(&mut self, token: impl Into<String>) {
        self.argv.push(token.into());
    }

    fn set_env(&mut self, key: &str, value: impl Into<String>) {
        self.env.insert(key.to_string(), value.into());
    }

    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }
}

/// Build the launch plan, failing on the first violated dependency.
pub fn build_launch_plan(
    options: &ResolvedOptions,
    context: &BuildContext,
) -> Result<LaunchPlan, LaunchError> {
    if options.target.trim().is_empty() {
        return Err(LaunchError::MissingTarget);
    }

    let mut plan = LaunchPlan::default();
    push_frame_limiter(&mut plan, options);
    push_cpu_governor(&mut plan, options);
    push_overlay(&mut plan, options);
    push_compat_layer(&mut plan, options, context)?;
    push_gpu_offload(&mut plan, options);
    let target_emitted = push_runtime(&mut plan, options);
    if !target_emitted {
        plan.arg(options.target.as_str());
    }
    push_extra_args(&mut plan, options.extra_args.as_deref());
    plan.working_dir = options.working_dir.clone();

    debug!(
        target: "game_run::launch",
        argv = ?plan.argv,
        env = ?plan.env,
        working_dir = ?plan.working_dir,
        "Built launch plan"
    );
    Ok(plan)
}

fn push_frame_limiter(plan: &mut LaunchPlan, options: &ResolvedOptions) {
    if options.frame_limit.is_some() || options.vsync.is_some() {
        plan.arg(FRAME_LIMITER_BIN);
        if let Some(fps) = options.frame_limit {
            plan.arg(fps.to_string());
        }
        if let Some(vsync) = options.vsync {
            plan.arg(VSYNC_FLAG);
            plan.arg(vsync.code());
        }
    }

    if let Some(rate) = &options.dxvk_frame_rate {
        plan.set_env("DXVK_FRAME_RATE", rate.as_str());
    }
}

fn push_cpu_governor(plan: &mut LaunchPlan, options: &ResolvedOptions) {
    if options.launcher_wrapper == Some(true) {
        plan.arg(CPU_GOVERNOR_BIN);
    }
}

fn push_overlay(plan: &mut LaunchPlan, options: &ResolvedOptions) {
    let Some(overlay) = options.overlay else {
        return;
    };
    if !overlay.enabled {
        return;
    }
    plan.arg(OVERLAY_BIN);
    if overlay.extra_flag {
        plan.arg(OVERLAY_DLSYM_FLAG);
    }
}

fn push_compat_layer(
    plan: &mut LaunchPlan,
    options: &ResolvedOptions,
    context: &BuildContext,
) -> Result<(), LaunchError> {
    let Some(layer) = &options.compat_layer else {
        return ensure_no_wine_only_options(options);
    };

    let prefix = options.prefix.as_deref().ok_or(LaunchError::Dependency {
        option: "wine",
        requires: "prefix",
    })?;
    let prefix_value = path_value(prefix);
    plan.set_env("WINEPREFIX", prefix_value.as_str());

    match layer {
        CompatLayer::Native(program) | CompatLayer::Custom(program) => plan.arg(program.as_str()),
        CompatLayer::TranslationLayer(binary) => {
            plan.set_env("STEAM_COMPAT_DATA_PATH", prefix_value.as_str());
            plan.set_env(
                "STEAM_COMPAT_CLIENT_INSTALL_PATH",
                path_value(&context.steam_client_install_path),
            );
            match binary {
                Some(binary) => plan.arg(binary.as_str()),
                None => plan.arg(path_value(&context.default_proton_path)),
            }
            plan.arg(PROTON_RUN_VERB);
        }
    }
    plan.prefix_dir = Some(prefix.to_path_buf());

    match &options.sync {
        Some(SyncMode::Esync) => plan.set_env("WINEESYNC", "1"),
        Some(SyncMode::Fsync) => plan.set_env("WINEFSYNC", "1"),
        Some(SyncMode::Unrecognized(raw)) => warn!(
            target: "game_run::launch",
            sync = %raw,
            "Unrecognized sync mode ignored; expected none, esync or fsync"
        ),
        Some(SyncMode::None) | None => {}
    }

    if options.upscaling == Some(true) {
        plan.set_env("WINE_FULLSCREEN_FSR", "1");
        plan.set_env("WINE_FULLSCREEN_FSR_STRENGTH", "2");
    }

    if options.graphics_optimizations == Some(true) {
        plan.set_env("DXVK_LOG_LEVEL", "none");
        plan.set_env("DXVK_HUD", "compiler");
        plan.set_env("DXVK_STATE_CACHE", "1");
        plan.set_env("DXVK_STATE_CACHE_PATH", prefix_value.as_str());
    }

    Ok(())
}

/// Sync, FSR and DXVK settings only make sense inside a Wine prefix.
///
/// Presence is what counts: an explicit `fsr = no` without wine is rejected too.
fn ensure_no_wine_only_options(options: &ResolvedOptions) -> Result<(), LaunchError> {
    let offending = if options.sync.is_some() {
        Some("sync")
    } else if options.upscaling.is_some() {
        Some("fsr")
    } else if options.graphics_optimizations.is_some() {
        Some("dxvk")
    } else {
        None
    };

    match offending {
        Some(option) => Err(LaunchError::Dependency {
            option,
            requires: "wine",
        }),
        None => Ok(()),
    }
}

fn push_gpu_offload(plan: &mut LaunchPlan, options: &ResolvedOptions) {
    if options.gpu_offload == Some(true) {
        plan.set_env("__NV_PRIME_RENDER_OFFLOAD", "1");
        plan.set_env("__VK_LAYER_NV_optimus", "NVIDIA_only");
        plan.set_env("__GLX_VENDOR_LIBRARY_NAME", "nvidia");
    }
}

/// Returns true when the runtime launcher already emitted the target token.
fn push_runtime(plan: &mut LaunchPlan, options: &ResolvedOptions) -> bool {
    match options.runtime.unwrap_or_default() {
        RuntimeKind::Java => {
            plan.arg("java");
            plan.arg("-jar");
            false
        }
        RuntimeKind::SteamId => {
            plan.arg("steam");
            plan.arg(format!("steam://rungameid/{}", options.target));
            true
        }
        RuntimeKind::LutrisId => {
            plan.arg("lutris");
            plan.arg(format!("lutris:rungameid/{}", options.target));
            plan.set_env("LUTRIS_SKIP_INIT", "1");
            true
        }
        RuntimeKind::Flatpak => {
            plan.arg("flatpak");
            plan.arg("run");
            false
        }
        RuntimeKind::RawPath => false,
    }
}

/// Arguments are split on single spaces; an argument containing a space cannot be expressed.
fn push_extra_args(plan: &mut LaunchPlan, extra_args: Option<&str>) {
    let Some(extra_args) = extra_args else {
        return;
    };
    for token in extra_args.split(' ').filter(|token| !token.is_empty()) {
        plan.arg(token);
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
