use async_trait::async_trait;
use shared::protocol::{SearchOutcome, SearchRequest, SearchResponse};
use tracing::debug;

/// Result-producing backend driven by [`crate::SearchSessionController`] requests.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> SearchOutcome;
}

/// Runs `request` and tags the outcome with its sequence number.
pub async fn execute_search(engine: &dyn SearchEngine, request: &SearchRequest) -> SearchResponse {
    let outcome = engine.search(request).await;
    let kind = match &outcome {
        SearchOutcome::Results(_) => "results",
        SearchOutcome::Failed(_) => "failed",
        SearchOutcome::Cancelled => "cancelled",
    };
    debug!(
        seq = request.seq.0,
        query = %request.query,
        page = request.page,
        outcome = kind,
        "search completed"
    );
    SearchResponse::new(request.seq, outcome)
}
