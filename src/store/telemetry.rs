use std::path::Path;

use tracing::{debug, info};

use crate::cli::StorePathSource;

use super::ProfileStore;

pub fn log_path_source(path: &Path, source: StorePathSource) {
    match source {
        StorePathSource::Default => debug!(
            target: "game_run::store",
            path = %path.display(),
            "GAME_RUN_CONFIG not set; using default profile store"
        ),
        StorePathSource::Cli | StorePathSource::Env => info!(
            target: "game_run::store",
            path = %path.display(),
            origin = source.as_str(),
            "Loading profile store from explicit location"
        ),
    }
}

pub fn log_loaded(store: &ProfileStore) {
    info!(
        target: "game_run::store",
        path = %store.source_path.display(),
        games = store.len(),
        categories = store.categories().len(),
        "Profile store loaded successfully"
    );
}
