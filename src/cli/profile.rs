//! Profile store location resolution.
use std::{env, path::PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::lib::paths;

const PROFILE_STORE_ENV: &str = "GAME_RUN_CONFIG";

/// Where the profile store path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePathSource {
    Cli,
    Env,
    Default,
}

impl StorePathSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StorePathSource::Cli => "cli",
            StorePathSource::Env => "env",
            StorePathSource::Default => "default",
        }
    }
}

/// Resolve the profile store path in the order: CLI override → env var → default.
pub fn resolve_profile_store_path(
    override_path: Option<PathBuf>,
) -> Result<(PathBuf, StorePathSource)> {
    let (path, source) = if let Some(path) = override_path {
        (path, StorePathSource::Cli)
    } else if let Some(path) = env::var_os(PROFILE_STORE_ENV).filter(|value| !value.is_empty()) {
        (PathBuf::from(path), StorePathSource::Env)
    } else {
        let path = paths::default_profile_store_path().map_err(|message| anyhow!(message))?;
        (path, StorePathSource::Default)
    };

    if path.is_absolute() {
        return Ok((path, source));
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok((cwd.join(path), source))
}
