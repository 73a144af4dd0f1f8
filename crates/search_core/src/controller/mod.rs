//! Controller layer: view state, URL synchronization, and command orchestration.
//!
//! [`SearchSessionController`] is the single writer of the search view. Every
//! handler applies its state and URL writes in one step and returns the
//! commands the runtime has to execute; nothing here blocks or performs I/O.

pub mod events;
pub mod orchestration;

use shared::{
    domain::{ResultsPage, SortDirection},
    protocol::{SearchOutcome, SearchRequest, SearchResponse},
};
use tracing::{debug, warn};

use crate::{
    clipboard::ClipboardRelay,
    config::SearchConfig,
    pagination::Pagination,
    registry::OfficialRegistry,
    sequencer::RequestSequencer,
    url_state::{
        write_official_only, write_page, write_query, write_sort, QueryParams, SearchViewState,
    },
    view::ResultView,
};

use self::events::{SessionCommand, SessionEvent};

pub struct SearchSessionController {
    config: SearchConfig,
    pagination: Pagination,
    params: QueryParams,
    state: SearchViewState,
    results: Option<ResultsPage>,
    registry: Option<OfficialRegistry>,
    clipboard: ClipboardRelay,
    sequencer: RequestSequencer,
    started: bool,
}

impl SearchSessionController {
    /// Restores the view from `params`. The params are kept as-is until the
    /// first state-changing event rewrites them.
    pub fn new(config: SearchConfig, params: QueryParams) -> Self {
        let state = SearchViewState::from_params(&params, &config);
        let pagination = Pagination::new(config.results_per_page);
        Self {
            config,
            pagination,
            params,
            state,
            results: None,
            registry: None,
            clipboard: ClipboardRelay::new(),
            sequencer: RequestSequencer::new(),
            started: false,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn state(&self) -> &SearchViewState {
        &self.state
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn into_params(self) -> QueryParams {
        self.params
    }

    pub fn canonical_params(&self) -> QueryParams {
        self.state.canonical_params(&self.config)
    }

    pub fn results(&self) -> Option<&ResultsPage> {
        self.results.as_ref()
    }

    pub fn results_count(&self) -> u64 {
        self.results.as_ref().map_or(0, |page| page.count)
    }

    pub fn page_count(&self) -> u64 {
        self.pagination.page_count(self.results_count())
    }

    pub fn registry(&self) -> Option<&OfficialRegistry> {
        self.registry.as_ref()
    }

    pub fn pending_copy(&self) -> Option<&str> {
        self.clipboard.pending()
    }

    /// Classified view of the held results; empty registry until it loads.
    pub fn result_views(&self) -> Vec<ResultView<'_>> {
        let empty = OfficialRegistry::default();
        let registry = self.registry.as_ref().unwrap_or(&empty);
        self.results
            .iter()
            .flat_map(|page| page.results.iter())
            .map(|manifest| ResultView::new(manifest, registry, self.config.popularity_threshold))
            .collect()
    }

    /// Requests the registry and the initial search; later calls are no-ops.
    pub fn start(&mut self) -> Vec<SessionCommand> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        vec![
            SessionCommand::FetchRegistry {
                catalog_url: self.config.catalog_url.clone(),
            },
            self.issue_search(),
        ]
    }

    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionCommand> {
        match event {
            SessionEvent::QueryEdited(text) => self.on_query_edit(text),
            SessionEvent::QuerySubmitted => self.on_query_submit(),
            SessionEvent::EngineResponded(response) => self.on_engine_results(response),
            SessionEvent::PageRequested(page) => self.on_page_change(page),
            SessionEvent::SortChanged { index, direction } => self.on_sort_change(index, direction),
            SessionEvent::OfficialOnlyChanged(value) => self.on_official_only_change(value),
            SessionEvent::CopyRequested(content) => self.on_result_copy_requested(content),
            SessionEvent::ContentCopied => self.on_content_copied(),
            SessionEvent::RegistryLoaded(registry) => self.on_registry_loaded(registry),
        }
    }

    /// Updates the draft only; the engine is not re-run until submission.
    pub fn on_query_edit(&mut self, text: impl Into<String>) -> Vec<SessionCommand> {
        let before = self.params.clone();
        self.state.draft_query = text.into();
        self.state.page = 1;
        write_query(&mut self.params, &self.state.draft_query);
        write_page(&mut self.params, self.state.page);
        self.url_change_since(&before).into_iter().collect()
    }

    pub fn on_query_submit(&mut self) -> Vec<SessionCommand> {
        self.state.committed_query = self.state.draft_query.clone();
        vec![self.issue_search()]
    }

    pub fn on_engine_results(&mut self, response: SearchResponse) -> Vec<SessionCommand> {
        if !self.sequencer.is_latest(response.seq) {
            debug!(
                seq = response.seq.0,
                latest = self.sequencer.latest().map(|seq| seq.0),
                "ignoring superseded search response"
            );
            return Vec::new();
        }

        self.results = match response.outcome {
            SearchOutcome::Results(page) => Some(page),
            SearchOutcome::Failed(err) => {
                warn!(seq = response.seq.0, error = %err, "search failed; showing no results");
                Some(ResultsPage::empty())
            }
            SearchOutcome::Cancelled => None,
        };
        Vec::new()
    }

    pub fn on_page_change(&mut self, new_page: u32) -> Vec<SessionCommand> {
        let Some(new_page) = self.pagination.accept(new_page, self.results_count()) else {
            debug!(
                requested = new_page,
                page_count = self.page_count(),
                "rejecting out-of-range page request"
            );
            return Vec::new();
        };
        if new_page == self.state.page {
            return vec![SessionCommand::ScrollToTop];
        }

        let before = self.params.clone();
        self.state.page = new_page;
        write_page(&mut self.params, new_page);

        let mut commands: Vec<_> = self.url_change_since(&before).into_iter().collect();
        commands.push(SessionCommand::ScrollToTop);
        commands.push(self.issue_search());
        commands
    }

    pub fn on_sort_change(
        &mut self,
        new_sort_index: usize,
        new_sort_direction: SortDirection,
    ) -> Vec<SessionCommand> {
        if self.config.sort_mode(new_sort_index).is_none() {
            debug!(index = new_sort_index, "ignoring unknown sort mode");
            return Vec::new();
        }
        if self.state.sort_index == new_sort_index && self.state.sort_direction == new_sort_direction
        {
            return Vec::new();
        }

        let before = self.params.clone();
        self.state.sort_index = new_sort_index;
        self.state.sort_direction = new_sort_direction;
        write_sort(
            &mut self.params,
            new_sort_index,
            new_sort_direction,
            &self.config,
        );

        let mut commands: Vec<_> = self.url_change_since(&before).into_iter().collect();
        commands.push(self.issue_search());
        commands
    }

    pub fn on_official_only_change(&mut self, new_value: bool) -> Vec<SessionCommand> {
        if self.state.official_only == new_value {
            return Vec::new();
        }

        let before = self.params.clone();
        self.state.official_only = new_value;
        write_official_only(&mut self.params, new_value);

        let mut commands: Vec<_> = self.url_change_since(&before).into_iter().collect();
        commands.push(self.issue_search());
        commands
    }

    pub fn on_result_copy_requested(&mut self, content: impl Into<String>) -> Vec<SessionCommand> {
        let content = content.into();
        self.clipboard.request_copy(content.clone());
        vec![SessionCommand::CopyToClipboard(content)]
    }

    pub fn on_content_copied(&mut self) -> Vec<SessionCommand> {
        if self.clipboard.notify_copied().is_none() {
            debug!("copy acknowledgement with nothing pending");
        }
        Vec::new()
    }

    /// Publishes the registry; only the first delivery is kept.
    pub fn on_registry_loaded(&mut self, registry: OfficialRegistry) -> Vec<SessionCommand> {
        if self.registry.is_some() {
            debug!("official registry already published; ignoring duplicate");
            return Vec::new();
        }
        debug!(entries = registry.len(), "official registry published");
        self.registry = Some(registry);
        Vec::new()
    }

    fn issue_search(&mut self) -> SessionCommand {
        let seq = self.sequencer.issue();
        self.results = None;
        SessionCommand::Search(SearchRequest {
            seq,
            query: self.state.committed_query.clone(),
            page: self.state.page,
            results_per_page: self.pagination.results_per_page(),
            sort_index: self.state.sort_index,
            sort_direction: self.state.sort_direction,
            official_only: self.state.official_only,
        })
    }

    fn url_change_since(&self, before: &QueryParams) -> Option<SessionCommand> {
        (self.params != *before).then(|| SessionCommand::ReplaceUrl(self.params.to_query_string()))
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
