// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter controller: reducer, debounce, location and request sequencing.
//!
//! The controller never performs I/O. Every applied change hands back a
//! [`FetchTicket`]; the caller runs the fetch and reports the result through
//! [`FilterController::complete`]. Only the newest ticket's result is kept,
//! so a slow response for an old filter can never overwrite a newer one.

use std::time::Duration;

use leadboard_core::StatusFilter;
use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::debounce::Debouncer;
use crate::fetcher::LeadsView;
use crate::filter::{FilterEvent, FilterState, Location};

/// A fetch the caller should run for `filter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub filter: FilterState,
}

/// What the leads page shows right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadsSnapshot {
    pub filter: FilterState,
    pub location: String,
    pub view: LeadsView,
    pub loading: bool,
}

#[derive(Debug)]
pub struct FilterController {
    state: FilterState,
    location: Location,
    debouncer: Debouncer<String>,
    issued: u64,
    loading: bool,
    view: LeadsView,
}

impl FilterController {
    /// Seeds state from `location`; text changes wait `quiet` before applying.
    pub fn new(location: Location, quiet: Duration) -> Self {
        let state = FilterState::from_location(&location);
        Self {
            state,
            location,
            debouncer: Debouncer::new(quiet),
            issued: 0,
            loading: false,
            view: LeadsView::default(),
        }
    }

    /// The initial fetch for the seeded state.
    pub fn start(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Records a keystroke. Nothing is applied until the quiet period passes.
    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.debouncer.push(text.into(), now);
    }

    /// Applies a status selection immediately.
    pub fn select_status(&mut self, status: StatusFilter) -> FetchTicket {
        self.apply(FilterEvent::StatusSelected(status))
    }

    /// Applies debounced search text if it is due.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<FetchTicket> {
        let text = self.debouncer.poll(now)?;
        Some(self.apply(FilterEvent::SearchCommitted(text)))
    }

    /// When pending search text becomes due, if any.
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Re-runs the current filter, e.g. after the data changed underneath.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Accepts a fetch result. Returns `false` when the ticket was superseded
    /// and the result was dropped.
    pub fn complete(&mut self, seq: u64, view: LeadsView) -> bool {
        if seq != self.issued {
            debug!(seq, latest = self.issued, "dropping stale leads response");
            return false;
        }
        self.view = view;
        self.loading = false;
        true
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> &LeadsView {
        &self.view
    }

    pub fn snapshot(&self) -> LeadsSnapshot {
        LeadsSnapshot {
            filter: self.state.clone(),
            location: self.location.href(),
            view: self.view.clone(),
            loading: self.loading,
        }
    }

    fn apply(&mut self, event: FilterEvent) -> FetchTicket {
        self.state = std::mem::take(&mut self.state).reduce(event);
        self.location = self.location.with_filter(&self.state);
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        debug!(
            seq = self.issued,
            query = %self.state.query,
            status = %self.state.status,
            "leads fetch issued"
        );
        FetchTicket {
            seq: self.issued,
            filter: self.state.clone(),
        }
    }
}
