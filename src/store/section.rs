use std::collections::BTreeMap;

use crate::lib::errors::LaunchError;

/// One game entry of the profile store: string keys mapped to raw string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSection {
    pub name: String,
    values: BTreeMap<String, String>,
}

impl ProfileSection {
    pub fn new(name: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a section from literal pairs.
    pub fn from_pairs<'a>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let values = pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self::new(name, values)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Strict boolean lookup. Absent keys yield `None`.
    pub fn get_bool(&self, key: &'static str) -> Result<Option<bool>, LaunchError> {
        self.get_str(key)
            .map(|raw| parse_bool(raw).ok_or_else(|| self.invalid(key, raw, "a boolean")))
            .transpose()
    }

    /// Strict positive integer lookup. Absent keys yield `None`.
    pub fn get_positive_u32(&self, key: &'static str) -> Result<Option<u32>, LaunchError> {
        self.get_str(key)
            .map(|raw| {
                parse_positive_u32(raw).ok_or_else(|| self.invalid(key, raw, "a positive integer"))
            })
            .transpose()
    }

    /// Label used in error messages.
    pub fn origin(&self) -> String {
        format!("profile section `{}`", self.name)
    }

    fn invalid(&self, key: &'static str, raw: &str, expected: &'static str) -> LaunchError {
        LaunchError::Config {
            origin: self.origin(),
            key,
            value: raw.to_string(),
            expected,
        }
    }
}

/// Boolean literals accepted by INI-style profile stores.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_positive_u32(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|value| *value > 0)
}
