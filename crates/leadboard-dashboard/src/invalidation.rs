// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! View invalidation after mutations.
//!
//! Each `(account, view)` pair has a generation counter. Mutations bump the
//! counters and broadcast a notice; caches compare generations, live
//! sessions listen for notices and re-fetch.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the notification channel. Slow listeners see `Lagged` and
/// should treat it as "everything changed".
const CHANNEL_CAPACITY: usize = 64;

/// A page whose data can go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Leads,
    Dashboard,
}

impl ViewKind {
    /// Route of the page showing this view.
    pub fn path(self) -> &'static str {
        match self {
            Self::Leads => "/leads",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// Broadcast when views of an account went stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalidation {
    pub account_id: String,
    pub views: Vec<ViewKind>,
}

impl Invalidation {
    pub fn affects(&self, account_id: &str, view: ViewKind) -> bool {
        self.account_id == account_id && self.views.contains(&view)
    }
}

/// Shared invalidation registry. Cheap to clone.
#[derive(Clone)]
pub struct ViewInvalidator {
    generations: Arc<DashMap<(String, ViewKind), u64>>,
    tx: broadcast::Sender<Invalidation>,
}

impl ViewInvalidator {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            generations: Arc::new(DashMap::new()),
            tx,
        }
    }

    /// Current generation of one view. Starts at 0.
    pub fn generation(&self, account_id: &str, view: ViewKind) -> u64 {
        self.generations
            .get(&(account_id.to_string(), view))
            .map(|g| *g)
            .unwrap_or(0)
    }

    /// Marks `views` stale for the account and notifies listeners.
    pub fn invalidate(&self, account_id: &str, views: &[ViewKind]) {
        for view in views {
            *self
                .generations
                .entry((account_id.to_string(), *view))
                .or_insert(0) += 1;
        }
        let paths: Vec<&str> = views.iter().map(|v| v.path()).collect();
        debug!(account = %account_id, views = ?paths, "views invalidated");
        // No receivers is fine: nobody is watching this account.
        let _ = self.tx.send(Invalidation {
            account_id: account_id.to_string(),
            views: views.to_vec(),
        });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Invalidation> {
        self.tx.subscribe()
    }
}

impl Default for ViewInvalidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_are_per_account_and_view() {
        let invalidator = ViewInvalidator::new();
        invalidator.invalidate("a", &[ViewKind::Leads, ViewKind::Dashboard]);
        invalidator.invalidate("a", &[ViewKind::Dashboard]);
        assert_eq!(invalidator.generation("a", ViewKind::Leads), 1);
        assert_eq!(invalidator.generation("a", ViewKind::Dashboard), 2);
        assert_eq!(invalidator.generation("b", ViewKind::Dashboard), 0);
    }

    #[tokio::test]
    async fn subscribers_receive_notices() {
        let invalidator = ViewInvalidator::new();
        let mut rx = invalidator.subscribe();
        invalidator.invalidate("a", &[ViewKind::Leads]);
        let notice = rx.recv().await.unwrap();
        assert!(notice.affects("a", ViewKind::Leads));
        assert!(!notice.affects("a", ViewKind::Dashboard));
        assert!(!notice.affects("b", ViewKind::Leads));
    }

    #[test]
    fn invalidate_without_subscribers_is_fine() {
        let invalidator = ViewInvalidator::new();
        invalidator.invalidate("a", &[ViewKind::Leads]);
        assert_eq!(invalidator.generation("a", ViewKind::Leads), 1);
    }

    #[test]
    fn view_paths() {
        assert_eq!(ViewKind::Leads.path(), "/leads");
        assert_eq!(ViewKind::Dashboard.path(), "/dashboard");
    }
}
