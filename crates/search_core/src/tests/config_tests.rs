use super::{load_config_with_env, SearchConfig, DEFAULT_CATALOG_URL};
use crate::error::ConfigError;

use shared::domain::{SortDirection, SortMode};
use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

static NEXT_DIR: AtomicU64 = AtomicU64::new(0);

fn temp_config(contents: &str) -> (PathBuf, PathBuf) {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let n = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
    let root = env::temp_dir().join(format!("bucket_search_config_test_{suffix}_{n}"));
    fs::create_dir_all(&root).expect("temp root");
    let path = root.join("search.toml");
    fs::write(&path, contents).expect("write config");
    (root, path)
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn missing_file_yields_defaults() {
    let config = load_config_with_env(&env::temp_dir().join("does-not-exist.toml"), no_env);
    assert_eq!(config, SearchConfig::default());
    assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
    assert_eq!(config.results_per_page, 20);
    assert_eq!(config.popularity_threshold, 50);
    assert_eq!(config.sort_modes.len(), 3);
}

#[test]
fn file_values_override_defaults() {
    let (root, path) = temp_config(
        r#"
results_per_page = 10
popularity_threshold = 100

[[sort_modes]]
name = "name"
display_name = "Name"
default_direction = "ascending"
"#,
    );

    let config = load_config_with_env(&path, no_env);
    assert_eq!(config.results_per_page, 10);
    assert_eq!(config.popularity_threshold, 100);
    assert_eq!(
        config.sort_modes,
        vec![SortMode::new("name", "Name", SortDirection::Ascending)]
    );
    assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn malformed_file_is_ignored() {
    let (root, path) = temp_config("results_per_page = \"twenty\"");
    assert_eq!(load_config_with_env(&path, no_env), SearchConfig::default());
    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn env_overrides_file_and_skips_unparsable_values() {
    let (root, path) = temp_config("results_per_page = 10");
    let vars: HashMap<&str, &str> = HashMap::from([
        ("APP__RESULTS_PER_PAGE", "25"),
        ("APP__POPULARITY_THRESHOLD", "lots"),
        ("APP__CATALOG_URL", "http://127.0.0.1:9/buckets.json"),
    ]);

    let config = load_config_with_env(&path, |key| vars.get(key).map(|v| v.to_string()));
    assert_eq!(config.results_per_page, 25);
    assert_eq!(config.popularity_threshold, 50);
    assert_eq!(config.catalog_url, "http://127.0.0.1:9/buckets.json");

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn validate_rejects_broken_catalogs() {
    assert_eq!(SearchConfig::default().validate(), Ok(()));

    let empty = SearchConfig {
        sort_modes: Vec::new(),
        ..SearchConfig::default()
    };
    assert_eq!(empty.validate(), Err(ConfigError::EmptySortCatalog));

    let zero = SearchConfig {
        results_per_page: 0,
        ..SearchConfig::default()
    };
    assert_eq!(zero.validate(), Err(ConfigError::ZeroResultsPerPage));

    let mut duplicate = SearchConfig::default();
    duplicate.sort_modes.push(duplicate.sort_modes[0].clone());
    assert_eq!(
        duplicate.validate(),
        Err(ConfigError::DuplicateSortMode("relevance".into()))
    );

    let bad_url = SearchConfig {
        catalog_url: "not a url".into(),
        ..SearchConfig::default()
    };
    assert!(matches!(
        bad_url.validate(),
        Err(ConfigError::InvalidCatalogUrl(_))
    ));
}

#[test]
fn default_direction_falls_back_to_first_mode() {
    let config = SearchConfig::default();
    assert_eq!(config.default_direction(1), SortDirection::Ascending);
    assert_eq!(config.default_direction(2), SortDirection::Descending);
    assert_eq!(config.default_direction(99), SortDirection::Descending);
}
