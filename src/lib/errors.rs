use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use ini::ParseError as IniParseError;
use thiserror::Error;

/// Errors that can occur while loading the profile store.
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    /// Failed to read the profile file from disk.
    #[error("Failed to read profile store {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// INI syntax error.
    #[error("Failed to parse profile store {path}: {source}")]
    IniSyntax {
        path: PathBuf,
        #[source]
        source: IniParseError,
    },
    /// Failed to turn a TOML document into game sections.
    #[error("Failed to parse profile store {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// The requested game has no section in the store.
    #[error("Profile store {path} has no game named `{game}`")]
    UnknownGame { path: PathBuf, game: String },
}

impl ProfileStoreError {
    pub fn from_read_error(path: PathBuf, source: io::Error) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }

    pub fn descriptor(&self) -> &'static ErrorDescriptor {
        match self {
            Self::FileRead { .. } | Self::IniSyntax { .. } | Self::Parse { .. } => {
                &PROFILE_STORE_UNREADABLE_ERROR
            }
            Self::UnknownGame { .. } => &UNKNOWN_GAME_ERROR,
        }
    }
}

/// Failures detected while resolving options into a launch plan.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchError {
    /// A conditional option was used without its prerequisite.
    #[error("`{option}` requires `{requires}` to be set")]
    Dependency {
        option: &'static str,
        requires: &'static str,
    },
    /// A value could not be coerced into the expected type.
    #[error("Invalid value `{value}` for `{key}` in {origin}: expected {expected}")]
    Config {
        origin: String,
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Nothing to launch.
    #[error("No game path or id was provided")]
    MissingTarget,
}

impl LaunchError {
    pub fn descriptor(&self) -> &'static ErrorDescriptor {
        match self {
            Self::Dependency { .. } => &DEPENDENCY_ERROR,
            Self::Config { .. } => &CONFIG_VALUE_ERROR,
            Self::MissingTarget => &MISSING_TARGET_ERROR,
        }
    }
}

/// Errors raised by the execute sink while preparing or spawning the game.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("Failed to create prefix directory {path}: {source}")]
    CreatePrefix {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Launch plan has an empty argument vector")]
    EmptyCommand,
    #[error("Spawning requires a running Tokio runtime")]
    NoRuntime,
}

impl ExecuteError {
    pub fn descriptor(&self) -> &'static ErrorDescriptor {
        match self {
            Self::CreatePrefix { .. } => &PREFIX_CREATE_ERROR,
            Self::Spawn { .. } | Self::EmptyCommand | Self::NoRuntime => &SPAWN_ERROR,
        }
    }
}

/// Stable error code plus a remediation hint shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
}

impl ErrorDescriptor {
    pub const fn new(code: &'static str, remediation: &'static str) -> Self {
        Self { code, remediation }
    }
}

pub const DEPENDENCY_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "dependency_error",
    "Set --wine/--prefix (or `wine`/`prefix` in the profile) before using wine-only options.",
);

pub const CONFIG_VALUE_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "config_error",
    "Booleans accept true/false, yes/no, on/off or 1/0; numbers must be positive integers.",
);

pub const MISSING_TARGET_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "missing_target",
    "Pass the game path as an argument or set `path` in the profile section.",
);

pub const PROFILE_STORE_UNREADABLE_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "profile_store_unreadable",
    "Check the file given by --config or GAME_RUN_CONFIG (defaults to ~/.config/game-run/games.ini).",
);

pub const UNKNOWN_GAME_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "unknown_game",
    "Run `game-run list` to see the games defined in the profile store.",
);

pub const PREFIX_CREATE_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "prefix_create_failed",
    "Make sure the parent directory of the prefix exists and is writable.",
);

pub const SPAWN_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "spawn_failed",
    "Make sure the first program in the command (wrapper, wine/proton or the game) is installed and on PATH.",
);
