//! In-memory engine over a manifest dump: term filtering, sort, and paging.

use std::{cmp::Ordering, fs, path::Path};

use anyhow::{Context, Result};
use async_trait::async_trait;
use search_core::SearchEngine;
use shared::{
    domain::{Manifest, ResultsPage, SortDirection, SortMode},
    error::{EngineError, ErrorCode},
    protocol::{SearchOutcome, SearchRequest},
};

pub struct MemoryEngine {
    manifests: Vec<Manifest>,
    sort_modes: Vec<SortMode>,
}

impl MemoryEngine {
    pub fn new(manifests: Vec<Manifest>, sort_modes: Vec<SortMode>) -> Self {
        Self {
            manifests,
            sort_modes,
        }
    }

    pub fn from_file(path: &Path, sort_modes: Vec<SortMode>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifests from '{}'", path.display()))?;
        let manifests: Vec<Manifest> = serde_json::from_str(&raw)
            .with_context(|| format!("'{}' is not a JSON array of manifests", path.display()))?;
        Ok(Self::new(manifests, sort_modes))
    }
}

fn matches_terms(manifest: &Manifest, terms: &[String]) -> bool {
    let haystack = format!(
        "{} {}",
        manifest.name,
        manifest.description.as_deref().unwrap_or_default()
    )
    .to_lowercase();
    terms.iter().all(|term| haystack.contains(term.as_str()))
}

/// Ascending order for a sort mode; the file order stands in for relevance.
fn compare(mode: &SortMode, a: &Manifest, b: &Manifest) -> Ordering {
    match mode.name.as_str() {
        "name" => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        "newest" => a.metadata.committed.cmp(&b.metadata.committed),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl SearchEngine for MemoryEngine {
    async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        let Some(mode) = self.sort_modes.get(request.sort_index) else {
            return SearchOutcome::Failed(EngineError::new(
                ErrorCode::InvalidQuery,
                format!("unknown sort mode index {}", request.sort_index),
            ));
        };

        let terms: Vec<String> = request
            .query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let mut hits: Vec<&Manifest> = self
            .manifests
            .iter()
            .filter(|manifest| !request.official_only || manifest.metadata.official_repository)
            .filter(|manifest| matches_terms(manifest, &terms))
            .collect();

        if mode.name == "relevance" {
            if request.sort_direction == SortDirection::Ascending {
                hits.reverse();
            }
        } else {
            hits.sort_by(|a, b| match request.sort_direction {
                SortDirection::Ascending => compare(mode, a, b),
                SortDirection::Descending => compare(mode, b, a),
            });
        }

        let count = hits.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let results = hits
            .into_iter()
            .skip(offset)
            .take(request.results_per_page as usize)
            .cloned()
            .collect();

        SearchOutcome::Results(ResultsPage { results, count })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use shared::domain::{default_sort_modes, ManifestMetadata, RequestSeq};

    use super::*;

    fn manifest(name: &str, official: bool, day: u32) -> Manifest {
        Manifest {
            id: name.to_string(),
            name: name.to_string(),
            version: None,
            description: Some(format!("{name} tool")),
            homepage: None,
            license: None,
            metadata: ManifestMetadata {
                repository: "https://github.com/example/bucket".into(),
                official_repository: official,
                repository_stars: 0,
                file_path: None,
                committed: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).single(),
            },
        }
    }

    fn engine() -> MemoryEngine {
        MemoryEngine::new(
            vec![
                manifest("git", true, 3),
                manifest("gitui", false, 1),
                manifest("lazygit", false, 2),
                manifest("7zip", true, 4),
            ],
            default_sort_modes(),
        )
    }

    fn request(query: &str, sort_index: usize, direction: SortDirection) -> SearchRequest {
        SearchRequest {
            seq: RequestSeq(1),
            query: query.into(),
            page: 1,
            results_per_page: 2,
            sort_index,
            sort_direction: direction,
            official_only: false,
        }
    }

    fn names(outcome: SearchOutcome) -> (Vec<String>, u64) {
        match outcome {
            SearchOutcome::Results(page) => (
                page.results.into_iter().map(|m| m.name).collect(),
                page.count,
            ),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn filters_by_terms_and_pages() {
        let engine = engine();
        let (found, count) = names(
            engine
                .search(&request("GIT", 0, SortDirection::Descending))
                .await,
        );
        assert_eq!(count, 3);
        assert_eq!(found, vec!["git", "gitui"]);

        let mut second = request("git", 0, SortDirection::Descending);
        second.page = 2;
        let (found, _) = names(engine.search(&second).await);
        assert_eq!(found, vec!["lazygit"]);
    }

    #[tokio::test]
    async fn sorts_by_mode_and_direction() {
        let engine = engine();
        let (found, _) = names(engine.search(&request("git", 1, SortDirection::Ascending)).await);
        assert_eq!(found, vec!["git", "gitui"]);

        let (found, _) = names(engine.search(&request("", 2, SortDirection::Descending)).await);
        assert_eq!(found, vec!["7zip", "git"]);
    }

    #[tokio::test]
    async fn official_only_uses_engine_flag() {
        let mut req = request("", 1, SortDirection::Ascending);
        req.official_only = true;
        let (found, count) = names(engine().search(&req).await);
        assert_eq!(count, 2);
        assert_eq!(found, vec!["7zip", "git"]);
    }

    #[tokio::test]
    async fn unknown_sort_mode_fails() {
        let outcome = engine()
            .search(&request("", 9, SortDirection::Ascending))
            .await;
        assert!(matches!(outcome, SearchOutcome::Failed(_)));
    }
}
