//! Turn command-line flags or a profile section into `ResolvedOptions`.
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{
    cli::LaunchFlags,
    lib::errors::LaunchError,
    store::ProfileSection,
};

use super::options::{
    CompatLayer, OverlayOptions, ResolvedOptions, RuntimeKind, SyncMode, VsyncMode,
};

/// Origin label used for errors raised while reading flags.
pub const FLAGS_ORIGIN: &str = "command-line flags";

/// Profile keys selecting a runtime kind, in precedence order.
const RUNTIME_KEYS: [(&str, RuntimeKind); 4] = [
    ("java", RuntimeKind::Java),
    ("steam", RuntimeKind::SteamId),
    ("lutris", RuntimeKind::LutrisId),
    ("flatpak", RuntimeKind::Flatpak),
];

impl ResolvedOptions {
    /// Normalize ad-hoc command-line flags. Absent switches stay unset.
    pub fn from_flags(flags: &LaunchFlags) -> Result<Self, LaunchError> {
        let target = require_target(flags.game.as_deref())?;

        let frame_limit = flags
            .fps
            .map(|fps| {
                if fps == 0 {
                    Err(LaunchError::Config {
                        origin: FLAGS_ORIGIN.to_string(),
                        key: "fps",
                        value: fps.to_string(),
                        expected: "a positive integer",
                    })
                } else {
                    Ok(fps)
                }
            })
            .transpose()?;

        let vsync = flags
            .vsync
            .as_deref()
            .map(|raw| VsyncMode::parse(raw, FLAGS_ORIGIN))
            .transpose()?;

        let overlay = (flags.mangohud || flags.dlsym).then_some(OverlayOptions {
            enabled: flags.mangohud,
            extra_flag: flags.dlsym,
        });

        let runtime = if flags.java {
            Some(RuntimeKind::Java)
        } else if flags.steam {
            Some(RuntimeKind::SteamId)
        } else if flags.lutris {
            Some(RuntimeKind::LutrisId)
        } else if flags.flatpak {
            Some(RuntimeKind::Flatpak)
        } else {
            None
        };

        Ok(Self {
            launcher_wrapper: switch(flags.gamemode),
            overlay,
            frame_limit,
            vsync,
            dxvk_frame_rate: non_empty(flags.fps_dxvk.as_deref()),
            compat_layer: non_empty(flags.wine.as_deref()).map(|raw| CompatLayer::resolve(&raw)),
            prefix: non_empty_path(flags.prefix.as_deref()),
            sync: flags.sync.as_deref().map(SyncMode::parse),
            upscaling: switch(flags.fsr),
            graphics_optimizations: switch(flags.dxvk),
            gpu_offload: switch(flags.prime),
            runtime,
            target,
            extra_args: flags.args.clone(),
            working_dir: non_empty_path(flags.working_dir.as_deref()),
            category: None,
        })
    }

    /// Normalize a profile section. Only keys present in the section are populated.
    pub fn from_profile(section: &ProfileSection) -> Result<Self, LaunchError> {
        let target = require_target(section.get_str("path"))?;
        let origin = section.origin();

        let mangohud = section.get_bool("mangohud")?;
        let dlsym = section.get_bool("dlsym")?;
        let overlay = (mangohud.is_some() || dlsym.is_some()).then(|| OverlayOptions {
            enabled: mangohud.unwrap_or(false),
            extra_flag: dlsym.unwrap_or(false),
        });

        let vsync = section
            .get_str("vsync")
            .map(|raw| VsyncMode::parse(raw, &origin))
            .transpose()?;

        Ok(Self {
            launcher_wrapper: section.get_bool("gamemode")?,
            overlay,
            frame_limit: section.get_positive_u32("fps")?,
            vsync,
            dxvk_frame_rate: non_empty(section.get_str("fps_dxvk")),
            compat_layer: non_empty(section.get_str("wine")).map(|raw| CompatLayer::resolve(&raw)),
            prefix: non_empty(section.get_str("prefix")).map(PathBuf::from),
            sync: section.get_str("sync").map(SyncMode::parse),
            upscaling: section.get_bool("fsr")?,
            graphics_optimizations: section.get_bool("dxvk")?,
            gpu_offload: section.get_bool("prime")?,
            runtime: runtime_from_profile(section)?,
            target,
            extra_args: section.get_str("args").map(str::to_string),
            working_dir: non_empty(section.get_str("working_dir")).map(PathBuf::from),
            category: section.get_str("category").map(str::to_string),
        })
    }
}

fn runtime_from_profile(section: &ProfileSection) -> Result<Option<RuntimeKind>, LaunchError> {
    let mut selected = None;
    for (key, kind) in RUNTIME_KEYS {
        if section.get_bool(key)? != Some(true) {
            continue;
        }
        match selected {
            None => selected = Some(kind),
            Some(winner) => warn!(
                target: "game_run::launch",
                game = %section.name,
                ignored = key,
                selected = RuntimeKind::as_str(&winner),
                "Several runtime kinds enabled; keeping the first"
            ),
        }
    }
    Ok(selected)
}

fn require_target(raw: Option<&str>) -> Result<String, LaunchError> {
    match raw {
        Some(target) if !target.trim().is_empty() => Ok(target.to_string()),
        _ => Err(LaunchError::MissingTarget),
    }
}

fn switch(flag: bool) -> Option<bool> {
    flag.then_some(true)
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

fn non_empty_path(raw: Option<&Path>) -> Option<PathBuf> {
    raw.filter(|path| !path.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
