//! Source-agnostic launch options produced by the normalizer.
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::lib::errors::LaunchError;

/// Identifier selecting plain Wine.
pub const NATIVE_LAYER_ID: &str = "wine";
/// Identifier selecting Proton.
pub const TRANSLATION_LAYER_ID: &str = "proton";

/// Telemetry overlay settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverlayOptions {
    pub enabled: bool,
    pub extra_flag: bool,
}

/// Vertical-sync backend hint passed to the frame limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VsyncMode {
    OpenGl,
    Vulkan,
}

impl VsyncMode {
    pub fn parse(raw: &str, origin: &str) -> Result<Self, LaunchError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "opengl" => Ok(Self::OpenGl),
            "vulkan" => Ok(Self::Vulkan),
            _ => Err(LaunchError::Config {
                origin: origin.to_string(),
                key: "vsync",
                value: raw.to_string(),
                expected: "`opengl` or `vulkan`",
            }),
        }
    }

    /// Mode code understood by `strangle -v`.
    pub const fn code(&self) -> &'static str {
        match self {
            VsyncMode::OpenGl => "n",
            VsyncMode::Vulkan => "3",
        }
    }
}

/// Compatibility runtime, resolved once from its path or identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "program", rename_all = "snake_case")]
pub enum CompatLayer {
    /// Wine, run as given (`wine` or a path ending in `wine`).
    Native(String),
    /// Proton; `None` selects the bundled default build.
    TranslationLayer(Option<String>),
    /// Any other runtime binary.
    Custom(String),
}

impl CompatLayer {
    /// Classify a `wine` option value by its last path component.
    pub fn resolve(raw: &str) -> Self {
        let raw = raw.trim();
        let base_name = Path::new(raw)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(raw);

        match base_name {
            NATIVE_LAYER_ID => Self::Native(raw.to_string()),
            TRANSLATION_LAYER_ID if raw == TRANSLATION_LAYER_ID => Self::TranslationLayer(None),
            TRANSLATION_LAYER_ID => Self::TranslationLayer(Some(raw.to_string())),
            _ => Self::Custom(raw.to_string()),
        }
    }
}

/// Wine threading synchronization strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    None,
    Esync,
    Fsync,
    /// Kept so the builder can warn; it has no effect.
    Unrecognized(String),
}

impl SyncMode {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "esync" => Self::Esync,
            "fsync" => Self::Fsync,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }
}

/// How the final target is invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeKind {
    Java,
    SteamId,
    LutrisId,
    Flatpak,
    #[default]
    RawPath,
}

impl RuntimeKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RuntimeKind::Java => "java",
            RuntimeKind::SteamId => "steam",
            RuntimeKind::LutrisId => "lutris",
            RuntimeKind::Flatpak => "flatpak",
            RuntimeKind::RawPath => "path",
        }
    }
}

/// Options for a single launch, independent of where they came from.
///
/// `None` means "not specified", which the builder treats differently from an
/// explicit `false` only where a dependency check applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    pub launcher_wrapper: Option<bool>,
    pub overlay: Option<OverlayOptions>,
    pub frame_limit: Option<u32>,
    pub vsync: Option<VsyncMode>,
    pub dxvk_frame_rate: Option<String>,
    pub compat_layer: Option<CompatLayer>,
    pub prefix: Option<PathBuf>,
    pub sync: Option<SyncMode>,
    pub upscaling: Option<bool>,
    pub graphics_optimizations: Option<bool>,
    pub gpu_offload: Option<bool>,
    pub runtime: Option<RuntimeKind>,
    pub target: String,
    pub extra_args: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub category: Option<String>,
}

impl ResolvedOptions {
    /// Options that only launch `target` as-is.
    pub fn for_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }
}
