// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter state, its reducer, and the navigable location it is mirrored into.

use leadboard_core::{LeadboardError, StatusFilter};
use serde::{Deserialize, Serialize};

/// Query parameter carrying the search text.
pub const QUERY_PARAM: &str = "q";

/// Query parameter carrying the status filter.
pub const STATUS_PARAM: &str = "status";

/// The user's current search text and status selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub status: StatusFilter,
}

/// A committed filter change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// Search text after the debounce quiet period.
    SearchCommitted(String),
    /// Status chosen from the dropdown; applied immediately.
    StatusSelected(StatusFilter),
}

impl FilterState {
    pub fn new(query: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    /// Applies one event. Each event touches only its own field.
    pub fn reduce(self, event: FilterEvent) -> Self {
        match event {
            FilterEvent::SearchCommitted(query) => Self { query, ..self },
            FilterEvent::StatusSelected(status) => Self { status, ..self },
        }
    }

    /// Initial state from a location. Unknown status values fall back to `all`.
    pub fn from_location(location: &Location) -> Self {
        let query = location.get(QUERY_PARAM).unwrap_or_default().to_string();
        let status = location
            .get(STATUS_PARAM)
            .and_then(StatusFilter::parse)
            .unwrap_or_default();
        Self { query, status }
    }
}

/// A path plus ordered query parameters, e.g. `/leads?q=jo&status=Closed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    path: String,
    params: Vec<(String, String)>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Parses a relative href. Any fragment is discarded.
    pub fn parse(href: &str) -> Result<Self, LeadboardError> {
        let href = href.split('#').next().unwrap_or_default();
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        let params: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| LeadboardError::InvalidInput(format!("malformed query string: {e}")))?;
        Ok(Self {
            path: path.to_string(),
            params,
        })
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the first `key` in place and drops any repeats; appends when absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let mut found = false;
        self.params.retain_mut(|(k, v)| {
            if k.as_str() != key {
                return true;
            }
            if found {
                return false;
            }
            found = true;
            *v = value.clone();
            true
        });
        if !found {
            self.params.push((key.to_string(), value));
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }

    /// Mirrors `filter` into `q`/`status`, leaving every other parameter alone.
    ///
    /// Empty search text and the `all` status are expressed by omission.
    pub fn with_filter(&self, filter: &FilterState) -> Self {
        let mut next = self.clone();
        if filter.query.is_empty() {
            next.remove(QUERY_PARAM);
        } else {
            next.set(QUERY_PARAM, filter.query.clone());
        }
        match filter.status {
            StatusFilter::All => next.remove(STATUS_PARAM),
            StatusFilter::Only(status) => next.set(STATUS_PARAM, status.label()),
        }
        next
    }

    /// Renders `path?query`, omitting `?` when there are no parameters.
    pub fn href(&self) -> String {
        let query = serde_urlencoded::to_string(&self.params).unwrap_or_default();
        if query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{query}", self.path)
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.href())
    }
}
