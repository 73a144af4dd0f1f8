//! Inputs to and outputs from the search session controller.

use shared::{
    domain::SortDirection,
    protocol::{SearchRequest, SearchResponse},
};

use crate::registry::OfficialRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    QueryEdited(String),
    QuerySubmitted,
    EngineResponded(SearchResponse),
    PageRequested(u32),
    SortChanged {
        index: usize,
        direction: SortDirection,
    },
    OfficialOnlyChanged(bool),
    CopyRequested(String),
    ContentCopied,
    RegistryLoaded(OfficialRegistry),
}

/// Side effects the runtime must carry out after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Search(SearchRequest),
    FetchRegistry { catalog_url: String },
    /// Replace the current history entry's query string (no new entry).
    ReplaceUrl(String),
    ScrollToTop,
    CopyToClipboard(String),
}

impl SessionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search(_) => "search",
            Self::FetchRegistry { .. } => "fetch_registry",
            Self::ReplaceUrl(_) => "replace_url",
            Self::ScrollToTop => "scroll_to_top",
            Self::CopyToClipboard(_) => "copy_to_clipboard",
        }
    }
}
