//! URL query-parameter codec for the search view.
//!
//! The navigation location is modeled as an owned [`QueryParams`] value that
//! is handed to the controller and read back from it, never as ambient state.

use std::fmt;

use shared::domain::SortDirection;
use url::{form_urlencoded, Url};

use crate::config::SearchConfig;

pub const PARAM_QUERY: &str = "q";
pub const PARAM_PAGE: &str = "p";
pub const PARAM_SORT: &str = "s";
pub const PARAM_DIRECTION: &str = "d";
pub const PARAM_OFFICIAL_ONLY: &str = "o";

/// Ordered query-string pairs with `URLSearchParams`-like set/delete semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string; a leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn from_url(url: &Url) -> Self {
        url.query_pairs().into_owned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replaces the first `name` entry in place and drops any later duplicates,
    /// or appends when absent.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(key, _)| key == name) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(key, _)| {
                    let keep = key != name || index == first;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((name.to_string(), value)),
        }
    }

    pub fn delete(&mut self, name: &str) {
        self.pairs.retain(|(key, _)| key != name);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Returns `base` with its query replaced by these params (removed when empty).
    pub fn apply_to(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if self.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.to_query_string()));
        }
        url
    }

    /// Sets `name` when `keep` holds, otherwise deletes it.
    pub(crate) fn write(&mut self, name: &str, value: impl Into<String>, keep: bool) {
        if keep {
            self.set(name, value);
        } else {
            self.delete(name);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchViewState {
    pub draft_query: String,
    pub committed_query: String,
    pub page: u32,
    pub sort_index: usize,
    pub sort_direction: SortDirection,
    pub official_only: bool,
}

impl SearchViewState {
    /// Restores view state from URL params; malformed values fall back to defaults.
    pub fn from_params(params: &QueryParams, config: &SearchConfig) -> Self {
        let query = params.get(PARAM_QUERY).unwrap_or_default().to_string();
        let page = params
            .get(PARAM_PAGE)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        let sort_index = params
            .get(PARAM_SORT)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|index| *index < config.sort_modes.len())
            .unwrap_or(0);
        let sort_direction = params
            .get(PARAM_DIRECTION)
            .and_then(|raw| raw.trim().parse::<u8>().ok())
            .and_then(SortDirection::from_ordinal)
            .unwrap_or_else(|| config.default_direction(sort_index));
        let official_only = params.get(PARAM_OFFICIAL_ONLY) == Some("true");

        Self {
            draft_query: query.clone(),
            committed_query: query,
            page,
            sort_index,
            sort_direction,
            official_only,
        }
    }

    /// Minimal params that restore this state: default-valued entries are omitted.
    pub fn canonical_params(&self, config: &SearchConfig) -> QueryParams {
        let mut params = QueryParams::new();
        write_query(&mut params, &self.draft_query);
        write_page(&mut params, self.page);
        write_sort(&mut params, self.sort_index, self.sort_direction, config);
        write_official_only(&mut params, self.official_only);
        params
    }
}

pub(crate) fn write_query(params: &mut QueryParams, query: &str) {
    params.write(PARAM_QUERY, query, !query.is_empty());
}

pub(crate) fn write_page(params: &mut QueryParams, page: u32) {
    params.write(PARAM_PAGE, page.to_string(), page > 1);
}

pub(crate) fn write_sort(
    params: &mut QueryParams,
    sort_index: usize,
    direction: SortDirection,
    config: &SearchConfig,
) {
    params.write(PARAM_SORT, sort_index.to_string(), sort_index != 0);
    params.write(
        PARAM_DIRECTION,
        direction.ordinal().to_string(),
        direction != config.default_direction(sort_index),
    );
}

pub(crate) fn write_official_only(params: &mut QueryParams, official_only: bool) {
    params.write(PARAM_OFFICIAL_ONLY, official_only.to_string(), official_only);
}

#[cfg(test)]
#[path = "tests/url_state_tests.rs"]
mod tests;
