use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("official catalog request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("official catalog at {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("official catalog at {location} is not a name-to-location object: {source}")]
    Decode {
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read official catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("sort mode catalog must contain at least one mode")]
    EmptySortCatalog,
    #[error("results per page must be greater than zero")]
    ZeroResultsPerPage,
    #[error("duplicate sort mode name: {0}")]
    DuplicateSortMode(String),
    #[error("catalog url is invalid: {0}")]
    InvalidCatalogUrl(String),
}
