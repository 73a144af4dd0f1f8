//! Official bucket catalog: fetched once, inverted to location -> name.

use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use crate::{
    classifier::{classify, Tier},
    error::RegistryError,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfficialRegistry {
    by_location: HashMap<String, String>,
}

impl OfficialRegistry {
    /// Inverts a name -> location catalog. When several names share a location,
    /// the alphabetically first name is kept.
    pub fn from_catalog(catalog: BTreeMap<String, String>) -> Self {
        let mut by_location = HashMap::with_capacity(catalog.len());
        for (name, location) in catalog {
            by_location.entry(location).or_insert(name);
        }
        Self { by_location }
    }

    pub fn official_name(&self, location: &str) -> Option<&str> {
        self.by_location.get(location).map(String::as_str)
    }

    pub fn is_official(&self, location: &str) -> bool {
        self.by_location.contains_key(location)
    }

    /// Unknown locations are community buckets.
    pub fn classify(&self, location: &str, stars: u32, popularity_threshold: u32) -> Tier {
        classify(self.is_official(location), stars, popularity_threshold)
    }

    pub fn len(&self) -> usize {
        self.by_location.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_location.is_empty()
    }
}

pub fn parse_catalog(location: &str, body: &[u8]) -> Result<OfficialRegistry, RegistryError> {
    let catalog: BTreeMap<String, String> =
        serde_json::from_slice(body).map_err(|source| RegistryError::Decode {
            location: location.to_string(),
            source,
        })?;
    Ok(OfficialRegistry::from_catalog(catalog))
}

#[async_trait]
pub trait RegistrySource: Send + Sync {
    fn location(&self) -> &str;
    async fn fetch(&self) -> Result<OfficialRegistry, RegistryError>;
}

pub struct HttpRegistrySource {
    http: Client,
    url: String,
}

impl HttpRegistrySource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RegistrySource for HttpRegistrySource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<OfficialRegistry, RegistryError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|source| RegistryError::Request {
                url: self.url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .await
            .map_err(|source| RegistryError::Request {
                url: self.url.clone(),
                source,
            })?;
        parse_catalog(&self.url, &body)
    }
}

pub struct FileRegistrySource {
    path: PathBuf,
    display: String,
}

impl FileRegistrySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

#[async_trait]
impl RegistrySource for FileRegistrySource {
    fn location(&self) -> &str {
        &self.display
    }

    async fn fetch(&self) -> Result<OfficialRegistry, RegistryError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| RegistryError::Io {
                path: self.display.clone(),
                source,
            })?;
        parse_catalog(&self.display, &body)
    }
}

/// Fetches the catalog, degrading to an empty registry on any failure.
pub async fn load_registry(source: &dyn RegistrySource) -> OfficialRegistry {
    match source.fetch().await {
        Ok(registry) => {
            info!(
                source = source.location(),
                entries = registry.len(),
                "loaded official bucket registry"
            );
            registry
        }
        Err(err) => {
            warn!(
                source = source.location(),
                error = %err,
                "official bucket registry unavailable; treating all buckets as community"
            );
            OfficialRegistry::default()
        }
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
