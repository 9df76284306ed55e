//! Well-known locations: profile store, Steam client, bundled Proton build.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Proton build used when the profile just says `proton`.
pub const DEFAULT_PROTON_PATH: &str = "/usr/share/steam/compatibilitytools.d/proton-ge-custom/proton";
/// File name of the profile store inside the config directory.
pub const PROFILE_STORE_FILE: &str = "games.ini";
/// Application directory below the XDG config root.
const APP_DIR: &str = "game-run";
const XDG_CONFIG_HOME_ENV: &str = "XDG_CONFIG_HOME";
const HOME_ENV: &str = "HOME";

/// Returns true if the path is non-empty and absolute.
pub fn is_nonempty_absolute(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}

/// Resolve the default profile store location.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/game-run/games.ini` when `XDG_CONFIG_HOME` is set and absolute.
/// 2. `$HOME/.config/game-run/games.ini` otherwise.
pub fn default_profile_store_path() -> Result<PathBuf, &'static str> {
    default_profile_store_path_from(env::var_os(XDG_CONFIG_HOME_ENV), env::var_os(HOME_ENV))
}

fn default_profile_store_path_from(
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf, &'static str> {
    if let Some(xdg) = xdg_config_home.map(PathBuf::from) {
        if is_nonempty_absolute(&xdg) {
            return Ok(xdg.join(APP_DIR).join(PROFILE_STORE_FILE));
        }
    }

    if let Some(home) = home {
        return Ok(PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(PROFILE_STORE_FILE));
    }

    Err("XDG_CONFIG_HOME and HOME are both unset")
}

/// Steam client install directory exported to Proton.
pub fn steam_client_install_path() -> PathBuf {
    steam_client_install_path_from(env::var_os(HOME_ENV))
}

fn steam_client_install_path_from(home: Option<OsString>) -> PathBuf {
    home.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"))
        .join(".steam")
        .join("steam")
}
