// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard summary loading and per-account memoization.
//!
//! The cache holds raw store rows, not rendered views, so relative
//! timestamps are recomputed on every read. An entry is valid while the
//! dashboard generation it was loaded under is still current. Loads with any
//! failed section are returned but never stored.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use leadboard_config::model::DashboardConfig;
use leadboard_core::{
    AccountContext, AggregateKind, AggregateRow, Event, Lead, LeadQuery, LeadStore,
    LeadboardError,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::invalidation::{ViewInvalidator, ViewKind};
use crate::views::{
    ActivityItem, FeedMode, LeadRow, SourceBar, StatCard, activity_feed, recent_leads,
    source_analytics, source_chart, stat_cards,
};

/// One independently loaded part of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    Unavailable { error: String },
}

impl<T> Section<T> {
    fn from_result<U>(result: &Result<U, String>, render: impl FnOnce(&U) -> T) -> Self {
        match result {
            Ok(rows) => Self::Ready(render(rows)),
            Err(error) => Self::Unavailable {
                error: error.clone(),
            },
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub stat_cards: Section<Vec<StatCard>>,
    pub source_chart: Section<Vec<SourceBar>>,
    pub activity: Section<Vec<ActivityItem>>,
    pub recent_leads: Section<Vec<LeadRow>>,
}

#[derive(Debug, Clone)]
struct DashboardData {
    by_status: Result<Vec<AggregateRow>, String>,
    by_source: Result<Vec<AggregateRow>, String>,
    events: Result<Vec<Event>, String>,
    recent: Result<Vec<Lead>, String>,
}

impl DashboardData {
    fn is_complete(&self) -> bool {
        self.by_status.is_ok()
            && self.by_source.is_ok()
            && self.events.is_ok()
            && self.recent.is_ok()
    }
}

struct CachedEntry {
    generation: u64,
    data: Arc<DashboardData>,
}

fn logged<T>(
    account: &AccountContext,
    section: &str,
    result: Result<T, LeadboardError>,
) -> Result<T, String> {
    result.map_err(|e| {
        error!(account = %account.account_id, section, error = %e, "dashboard section failed");
        e.to_string()
    })
}

/// Builds dashboard, activity and source pages for an account.
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn LeadStore>,
    invalidator: ViewInvalidator,
    config: DashboardConfig,
    cache: Arc<DashMap<String, CachedEntry>>,
}

impl DashboardService {
    pub fn new(
        store: Arc<dyn LeadStore>,
        invalidator: ViewInvalidator,
        config: DashboardConfig,
    ) -> Self {
        Self {
            store,
            invalidator,
            config,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// The dashboard page, served from cache while the account's dashboard
    /// view has not been invalidated.
    pub async fn summary(&self, account: &AccountContext, now: DateTime<Utc>) -> DashboardSummary {
        let data = self.load(account).await;
        let summary_limit = self.config.activity_summary_limit;
        DashboardSummary {
            stat_cards: Section::from_result(&data.by_status, |rows| stat_cards(rows)),
            source_chart: Section::from_result(&data.by_source, |rows| source_chart(rows)),
            activity: Section::from_result(&data.events, |events| {
                activity_feed(events, FeedMode::Summary(summary_limit), now)
            }),
            recent_leads: Section::from_result(&data.recent, |leads| {
                recent_leads(leads, self.config.recent_leads_limit)
            }),
        }
    }

    /// The full activity log. Never cached.
    pub async fn activity_page(
        &self,
        account: &AccountContext,
        now: DateTime<Utc>,
    ) -> Result<Vec<ActivityItem>, LeadboardError> {
        let events = self
            .store
            .query_events(account, FeedMode::FullPage.limit())
            .await?;
        Ok(activity_feed(&events, FeedMode::FullPage, now))
    }

    /// The source analytics card, `None` when the account has no leads.
    pub async fn sources(
        &self,
        account: &AccountContext,
    ) -> Result<Option<Vec<SourceBar>>, LeadboardError> {
        let rows = self
            .store
            .aggregate(account, AggregateKind::LeadsBySource)
            .await?;
        Ok(source_analytics(&rows))
    }

    async fn load(&self, account: &AccountContext) -> Arc<DashboardData> {
        let generation = self
            .invalidator
            .generation(&account.account_id, ViewKind::Dashboard);
        if let Some(entry) = self.cache.get(&account.account_id) {
            if entry.generation == generation {
                debug!(account = %account.account_id, generation, "dashboard cache hit");
                return Arc::clone(&entry.data);
            }
        }

        let recent_query = LeadQuery::recent(self.config.recent_leads_limit);
        let (by_status, by_source, events, recent) = tokio::join!(
            self.store.aggregate(account, AggregateKind::LeadsByStatus),
            self.store.aggregate(account, AggregateKind::LeadsBySource),
            self.store
                .query_events(account, Some(self.config.activity_summary_limit)),
            self.store.query_leads(account, &recent_query),
        );
        let data = Arc::new(DashboardData {
            by_status: logged(account, "leads_by_status", by_status),
            by_source: logged(account, "leads_by_source", by_source),
            events: logged(account, "activity", events),
            recent: logged(account, "recent_leads", recent),
        });

        if data.is_complete() {
            debug!(account = %account.account_id, generation, "dashboard cache filled");
            self.cache.insert(
                account.account_id.clone(),
                CachedEntry {
                    generation,
                    data: Arc::clone(&data),
                },
            );
        }
        data
    }
}
