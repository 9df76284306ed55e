//! Filesystem helpers for compatibility-layer prefixes.

use std::{fs, path::Path};

use tracing::{debug, info};

use crate::lib::errors::ExecuteError;

/// Outcome of `ensure_prefix_dir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixDirStatus {
    Created,
    AlreadyPresent,
}

/// Create the prefix directory (and parents) unless it already exists.
pub fn ensure_prefix_dir(prefix: &Path) -> Result<PrefixDirStatus, ExecuteError> {
    if prefix.is_dir() {
        debug!(
            target: "game_run::launch",
            prefix = %prefix.display(),
            "Prefix directory already present"
        );
        return Ok(PrefixDirStatus::AlreadyPresent);
    }

    fs::create_dir_all(prefix).map_err(|source| ExecuteError::CreatePrefix {
        path: prefix.to_path_buf(),
        source,
    })?;
    info!(
        target: "game_run::launch",
        prefix = %prefix.display(),
        "Created prefix directory"
    );
    Ok(PrefixDirStatus::Created)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn ensure_prefix_dir_creates_nested_directory() {
        let temp = tempdir().expect("can create temp directory");
        let prefix = temp.path().join("prefixes").join("celeste");

        let status = ensure_prefix_dir(&prefix).expect("can create prefix");

        assert_eq!(status, PrefixDirStatus::Created);
        assert!(prefix.is_dir(), "prefix directory exists");
    }

    #[test]
    fn ensure_prefix_dir_keeps_existing_contents() {
        let temp = tempdir().expect("can create temp directory");
        let marker = temp.path().join("system.reg");
        fs::write(&marker, "WINE REGISTRY").expect("can write marker");

        let status = ensure_prefix_dir(temp.path()).expect("existing prefix is fine");

        assert_eq!(status, PrefixDirStatus::AlreadyPresent);
        assert!(marker.exists(), "existing prefix contents are untouched");
    }

    #[test]
    fn ensure_prefix_dir_fails_when_a_file_is_in_the_way() {
        let temp = tempdir().expect("can create temp directory");
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").expect("can write blocker");

        let error = ensure_prefix_dir(&blocker.join("pfx")).expect_err("cannot nest under a file");

        match error {
            ExecuteError::CreatePrefix { path, .. } => assert_eq!(path, blocker.join("pfx")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }
}
