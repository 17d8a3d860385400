// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Async driver for one open leads page.
//!
//! A [`FilterSession`] owns a [`FilterController`] on a single task. Inputs
//! arrive over an mpsc channel, fetches run as spawned tasks, and every state
//! change is published on a watch channel. The task stops when the
//! cancellation token fires or every input sender is dropped.

use std::time::Duration;

use leadboard_core::{AccountContext, LeadboardError, StatusFilter};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::controller::{FetchTicket, FilterController, LeadsSnapshot};
use crate::fetcher::{LeadsFetcher, LeadsView};
use crate::filter::Location;
use crate::invalidation::{Invalidation, ViewInvalidator, ViewKind};

const INPUT_BUFFER: usize = 32;

/// User interaction on the leads page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterInput {
    /// Raw search box contents after a keystroke.
    SearchText(String),
    /// Dropdown selection.
    StatusSelected(StatusFilter),
    /// Re-run the current filter.
    Refresh,
}

/// Handle to a running session task.
pub struct FilterSession {
    inputs: mpsc::Sender<FilterInput>,
    snapshots: watch::Receiver<LeadsSnapshot>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl FilterSession {
    /// Starts a session for `account` seeded from `location` and issues the
    /// initial fetch.
    pub fn spawn(
        fetcher: LeadsFetcher,
        account: AccountContext,
        location: Location,
        quiet: Duration,
        invalidator: &ViewInvalidator,
    ) -> Self {
        let mut controller = FilterController::new(location, quiet);
        let first = controller.start();
        let (snapshot_tx, snapshots) = watch::channel(controller.snapshot());
        let (inputs, input_rx) = mpsc::channel(INPUT_BUFFER);
        let cancel = CancellationToken::new();

        let driver = Driver {
            controller,
            fetcher,
            account,
            snapshot_tx,
            cancel: cancel.clone(),
        };
        let handle = tokio::spawn(driver.run(first, input_rx, invalidator.subscribe()));

        Self {
            inputs,
            snapshots,
            cancel,
            handle,
        }
    }

    /// Queues one input for the session.
    pub async fn send(&self, input: FilterInput) -> Result<(), LeadboardError> {
        self.inputs
            .send(input)
            .await
            .map_err(|_| LeadboardError::Internal("filter session has stopped".into()))
    }

    /// A receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<LeadsSnapshot> {
        self.snapshots.clone()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> LeadsSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            warn!(error = %e, "filter session task failed");
        }
    }
}

struct Driver {
    controller: FilterController,
    fetcher: LeadsFetcher,
    account: AccountContext,
    snapshot_tx: watch::Sender<LeadsSnapshot>,
    cancel: CancellationToken,
}

impl Driver {
    async fn run(
        mut self,
        first: FetchTicket,
        mut inputs: mpsc::Receiver<FilterInput>,
        mut invalidations: broadcast::Receiver<Invalidation>,
    ) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(u64, LeadsView)>();
        let mut invalidations_open = true;
        self.spawn_fetch(first, &done_tx);

        loop {
            let deadline = self.controller.debounce_deadline();
            tokio::select! {
                _ = self.cancel.cancelled() => break,

                input = inputs.recv() => match input {
                    Some(FilterInput::SearchText(text)) => {
                        self.controller.search_input(text, Instant::now());
                        continue;
                    }
                    Some(FilterInput::StatusSelected(status)) => {
                        let ticket = self.controller.select_status(status);
                        self.spawn_fetch(ticket, &done_tx);
                    }
                    Some(FilterInput::Refresh) => {
                        let ticket = self.controller.refresh();
                        self.spawn_fetch(ticket, &done_tx);
                    }
                    None => break,
                },

                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    match self.controller.poll_debounce(Instant::now()) {
                        Some(ticket) => self.spawn_fetch(ticket, &done_tx),
                        None => continue,
                    }
                }

                Some((seq, view)) = done_rx.recv() => {
                    if !self.controller.complete(seq, view) {
                        continue;
                    }
                }

                notice = invalidations.recv(), if invalidations_open => match notice {
                    Ok(notice) if notice.affects(&self.account.account_id, ViewKind::Leads) => {
                        debug!(account = %self.account.account_id, "leads view invalidated, re-fetching");
                        let ticket = self.controller.refresh();
                        self.spawn_fetch(ticket, &done_tx);
                    }
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(skipped, "invalidation notices lagged, re-fetching");
                        let ticket = self.controller.refresh();
                        self.spawn_fetch(ticket, &done_tx);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        invalidations_open = false;
                        continue;
                    }
                },
            }

            self.snapshot_tx.send_replace(self.controller.snapshot());
        }

        info!(account = %self.account.account_id, "filter session stopped");
    }

    fn spawn_fetch(&self, ticket: FetchTicket, done: &mpsc::UnboundedSender<(u64, LeadsView)>) {
        self.snapshot_tx.send_replace(self.controller.snapshot());
        let fetcher = self.fetcher.clone();
        let account = self.account.clone();
        let done = done.clone();
        tokio::spawn(async move {
            let view = LeadsView::from(fetcher.fetch(&account, &ticket.filter).await);
            // The session may already be gone; its result no longer matters.
            let _ = done.send((ticket.seq, view));
        });
    }
}
