//! Load the profile store: one section per game, string values per key.
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use config::Source;
use ini::{Ini, ParseOption};
use tracing::{debug, error, info, warn};

use crate::lib::errors::ProfileStoreError;

pub mod section;
pub mod telemetry;

pub use section::{parse_bool, parse_positive_u32, ProfileSection};

/// Profile key holding the grouping tag used by `list`.
pub const CATEGORY_KEY: &str = "category";

/// All game sections of one profile file.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    sections: BTreeMap<String, ProfileSection>,
    pub source_path: PathBuf,
}

impl ProfileStore {
    pub fn from_sections(
        source_path: PathBuf,
        sections: impl IntoIterator<Item = ProfileSection>,
    ) -> Self {
        let sections = sections
            .into_iter()
            .map(|section| (section.name.clone(), section))
            .collect();
        Self {
            sections,
            source_path,
        }
    }

    /// Load a profile store from a specific path.
    ///
    /// Files ending in `.toml` go through `config`; anything else is read as
    /// INI with section names kept exactly as written.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ProfileStoreError> {
        info!(
            target: "game_run::store",
            path = %path.display(),
            "Starting profile store load"
        );

        let text = fs::read_to_string(&path).map_err(|err| {
            let error = ProfileStoreError::from_read_error(path.clone(), err);
            error!(
                target: "game_run::store",
                path = %path.display(),
                reason = %error,
                "Failed to read profile store"
            );
            error
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let parsed = if is_toml {
            parse_toml(&path, &text)
        } else {
            parse_ini(&path, &text)
        };
        let sections = parsed.map_err(|error| {
            error!(
                target: "game_run::store",
                path = %path.display(),
                reason = %error,
                "Failed to parse profile store"
            );
            error
        })?;

        let store = Self::from_sections(
            path,
            sections
                .into_iter()
                .map(|(name, values)| ProfileSection::new(name, values)),
        );
        telemetry::log_loaded(&store);
        Ok(store)
    }

    /// Find a game section: exact name first, then ASCII case-insensitive.
    pub fn section(&self, game: &str) -> Result<&ProfileSection, ProfileStoreError> {
        self.sections
            .get(game)
            .or_else(|| {
                self.sections
                    .values()
                    .find(|section| section.name.eq_ignore_ascii_case(game))
            })
            .ok_or_else(|| ProfileStoreError::UnknownGame {
                path: self.source_path.clone(),
                game: game.to_string(),
            })
    }

    /// Games in name order, optionally restricted to one category.
    pub fn games(&self, category: Option<&str>) -> Vec<&ProfileSection> {
        self.sections
            .values()
            .filter(|section| match category {
                Some(wanted) => section.get_str(CATEGORY_KEY) == Some(wanted),
                None => true,
            })
            .collect()
    }

    /// Distinct categories in name order.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.sections
            .values()
            .filter_map(|section| section.get_str(CATEGORY_KEY))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

type RawSections = BTreeMap<String, BTreeMap<String, String>>;

/// Keys are lowercased; repeated sections are merged with later values winning.
fn parse_ini(path: &Path, text: &str) -> Result<RawSections, ProfileStoreError> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let document =
        Ini::load_from_str_opt(text, options).map_err(|source| ProfileStoreError::IniSyntax {
            path: path.to_path_buf(),
            source,
        })?;

    let mut sections = RawSections::new();
    for (name, properties) in &document {
        let Some(name) = name else {
            if !properties.is_empty() {
                debug!(
                    target: "game_run::store",
                    keys = properties.len(),
                    "Skipping keys outside of any game section"
                );
            }
            continue;
        };
        let values = sections.entry(name.to_string()).or_default();
        for (key, value) in properties.iter() {
            values.insert(key.to_ascii_lowercase(), value.to_string());
        }
    }
    Ok(sections)
}

/// Top-level tables become sections; scalar values are stringified.
fn parse_toml(path: &Path, text: &str) -> Result<RawSections, ProfileStoreError> {
    let document = config::Config::builder()
        .add_source(config::File::from_str(text, config::FileFormat::Toml))
        .build()
        .and_then(|document| document.collect())
        .map_err(|err| ProfileStoreError::from_parse_error(path.to_path_buf(), err))?;

    let mut sections = RawSections::new();
    for (name, value) in document {
        let table = match value.into_table() {
            Ok(table) => table,
            Err(_) => {
                debug!(
                    target: "game_run::store",
                    key = %name,
                    "Skipping top-level key outside of any game section"
                );
                continue;
            }
        };

        let mut values = BTreeMap::new();
        for (key, raw) in table {
            match raw.into_string() {
                Ok(value) => {
                    values.insert(key, value);
                }
                Err(err) => warn!(
                    target: "game_run::store",
                    game = %name,
                    key = %key,
                    reason = %err,
                    "Skipping non-scalar profile value"
                ),
            }
        }
        sections.insert(name, values);
    }
    Ok(sections)
}
