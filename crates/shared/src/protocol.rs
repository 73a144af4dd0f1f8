use serde::{Deserialize, Serialize};

use crate::{
    domain::{RequestSeq, ResultsPage, SortDirection},
    error::EngineError,
};

/// One engine invocation, tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub seq: RequestSeq,
    pub query: String,
    pub page: u32,
    pub results_per_page: u32,
    pub sort_index: usize,
    pub sort_direction: SortDirection,
    pub official_only: bool,
}

impl SearchRequest {
    /// Zero-based offset of the first result on the requested page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.results_per_page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SearchOutcome {
    Results(ResultsPage),
    Failed(EngineError),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub seq: RequestSeq,
    pub outcome: SearchOutcome,
}

impl SearchResponse {
    pub fn new(seq: RequestSeq, outcome: SearchOutcome) -> Self {
        Self { seq, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Manifest, ManifestMetadata},
        error::ErrorCode,
    };

    fn request(page: u32) -> SearchRequest {
        SearchRequest {
            seq: RequestSeq(1),
            query: "git".into(),
            page,
            results_per_page: 20,
            sort_index: 0,
            sort_direction: SortDirection::Descending,
            official_only: false,
        }
    }

    #[test]
    fn offset_is_zero_based_per_page() {
        assert_eq!(request(1).offset(), 0);
        assert_eq!(request(3).offset(), 40);
    }

    #[test]
    fn outcome_is_tagged_on_the_wire() {
        let failed = SearchOutcome::Failed(EngineError::new(ErrorCode::Unavailable, "down"));
        let json = serde_json::to_value(&failed).expect("serialize");
        assert_eq!(json["type"], "failed");
        assert_eq!(json["payload"]["code"], "unavailable");

        let json = serde_json::to_value(SearchOutcome::Cancelled).expect("serialize");
        assert_eq!(json["type"], "cancelled");
    }

    #[test]
    fn manifest_tolerates_missing_optional_fields() {
        let raw = r#"{
            "id": "abc",
            "name": "7zip",
            "metadata": { "repository": "https://github.com/ScoopInstaller/Main" }
        }"#;
        let manifest: Manifest = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(
            manifest.metadata,
            ManifestMetadata {
                repository: "https://github.com/ScoopInstaller/Main".into(),
                ..ManifestMetadata::default()
            }
        );
        assert!(manifest.version.is_none());
    }
}
