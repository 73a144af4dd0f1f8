//! Search session core for the bucket search results page.
//!
//! Owns the canonical view state (query, page, sort, official-only filter),
//! keeps it mapped to a minimal URL query string, sequences engine requests so
//! the last one wins, and classifies results against the official bucket
//! registry.

pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod pagination;
pub mod registry;
pub mod sequencer;
pub mod url_state;
pub mod view;

pub use classifier::{classify, Tier};
pub use clipboard::ClipboardRelay;
pub use config::{load_config, SearchConfig};
pub use controller::{
    events::{SessionCommand, SessionEvent},
    orchestration::{dispatch_session_command, dispatch_session_commands, DispatchError},
    SearchSessionController,
};
pub use engine::{execute_search, SearchEngine};
pub use error::{ConfigError, RegistryError};
pub use pagination::Pagination;
pub use registry::{
    load_registry, FileRegistrySource, HttpRegistrySource, OfficialRegistry, RegistrySource,
};
pub use url_state::{QueryParams, SearchViewState};
pub use view::ResultView;
