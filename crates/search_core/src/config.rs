use std::{collections::HashSet, fs, io, path::Path};

use serde::Deserialize;
use shared::domain::{default_sort_modes, SortDirection, SortMode};
use tracing::warn;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "search.toml";
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/ScoopInstaller/Scoop/master/buckets.json";
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 20;
pub const DEFAULT_POPULARITY_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub results_per_page: u32,
    pub popularity_threshold: u32,
    pub catalog_url: String,
    pub sort_modes: Vec<SortMode>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            popularity_threshold: DEFAULT_POPULARITY_THRESHOLD,
            catalog_url: DEFAULT_CATALOG_URL.into(),
            sort_modes: default_sort_modes(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    results_per_page: Option<u32>,
    popularity_threshold: Option<u32>,
    catalog_url: Option<String>,
    sort_modes: Option<Vec<SortMode>>,
}

impl SearchConfig {
    pub fn sort_mode(&self, index: usize) -> Option<&SortMode> {
        self.sort_modes.get(index)
    }

    /// Default direction of the mode at `index`, falling back to the first mode.
    pub fn default_direction(&self, index: usize) -> SortDirection {
        self.sort_mode(index)
            .or_else(|| self.sort_modes.first())
            .map(|mode| mode.default_direction)
            .unwrap_or(SortDirection::Descending)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.results_per_page == 0 {
            return Err(ConfigError::ZeroResultsPerPage);
        }
        if self.sort_modes.is_empty() {
            return Err(ConfigError::EmptySortCatalog);
        }
        let mut seen = HashSet::new();
        for mode in &self.sort_modes {
            if !seen.insert(mode.name.as_str()) {
                return Err(ConfigError::DuplicateSortMode(mode.name.clone()));
            }
        }
        url::Url::parse(&self.catalog_url)
            .map_err(|err| ConfigError::InvalidCatalogUrl(format!("{}: {err}", self.catalog_url)))?;
        Ok(())
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(v) = file.results_per_page {
            self.results_per_page = v;
        }
        if let Some(v) = file.popularity_threshold {
            self.popularity_threshold = v;
        }
        if let Some(v) = file.catalog_url {
            self.catalog_url = v;
        }
        if let Some(v) = file.sort_modes {
            self.sort_modes = v;
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("APP__RESULTS_PER_PAGE") {
            match v.trim().parse::<u32>() {
                Ok(parsed) => self.results_per_page = parsed,
                Err(err) => warn!(value = %v, %err, "ignoring APP__RESULTS_PER_PAGE"),
            }
        }
        if let Some(v) = lookup("APP__POPULARITY_THRESHOLD") {
            match v.trim().parse::<u32>() {
                Ok(parsed) => self.popularity_threshold = parsed,
                Err(err) => warn!(value = %v, %err, "ignoring APP__POPULARITY_THRESHOLD"),
            }
        }
        if let Some(v) = lookup("APP__CATALOG_URL") {
            self.catalog_url = v;
        }
    }
}

/// Defaults, then the TOML file at `path` if present, then `APP__*` environment overrides.
pub fn load_config(path: &Path) -> SearchConfig {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

fn load_config_with_env(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> SearchConfig {
    let mut config = SearchConfig::default();

    match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<ConfigFile>(&raw) {
            Ok(file) => config.apply_file(file),
            Err(err) => warn!(path = %path.display(), %err, "ignoring malformed config file"),
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!(path = %path.display(), %err, "failed to read config file"),
    }

    config.apply_env(lookup);
    config
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
