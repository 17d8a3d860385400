// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the lead query for a filter state.

use std::sync::Arc;

use leadboard_core::{
    AccountContext, Lead, LeadStore, LeadboardError, SearchPrecedence, build_lead_query,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::filter::FilterState;

/// Fetches leads for a filter. Stateless; results are never cached.
#[derive(Clone)]
pub struct LeadsFetcher {
    store: Arc<dyn LeadStore>,
    precedence: SearchPrecedence,
}

impl LeadsFetcher {
    pub fn new(store: Arc<dyn LeadStore>, precedence: SearchPrecedence) -> Self {
        Self { store, precedence }
    }

    /// Builds the query for `filter` and runs it against the account's rows.
    pub async fn fetch(
        &self,
        account: &AccountContext,
        filter: &FilterState,
    ) -> Result<Vec<Lead>, LeadboardError> {
        let query = build_lead_query(&filter.query, &filter.status, self.precedence);
        match self.store.query_leads(account, &query).await {
            Ok(rows) => {
                debug!(
                    account = %account.account_id,
                    query = %filter.query,
                    status = %filter.status,
                    rows = rows.len(),
                    "leads fetched"
                );
                Ok(rows)
            }
            Err(e) => {
                error!(
                    account = %account.account_id,
                    query = %filter.query,
                    status = %filter.status,
                    error = %e,
                    "error fetching leads"
                );
                Err(e)
            }
        }
    }
}

/// What the leads table shows: rows, or the reason there are none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LeadsView {
    Loaded { rows: Vec<Lead> },
    Failed { error: String },
}

impl LeadsView {
    /// Rows to render. A failed fetch renders as an empty table.
    pub fn rows(&self) -> &[Lead] {
        match self {
            Self::Loaded { rows } => rows,
            Self::Failed { .. } => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl Default for LeadsView {
    fn default() -> Self {
        Self::Loaded { rows: Vec::new() }
    }
}

impl From<Result<Vec<Lead>, LeadboardError>> for LeadsView {
    fn from(result: Result<Vec<Lead>, LeadboardError>) -> Self {
        match result {
            Ok(rows) => Self::Loaded { rows },
            Err(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadboard_core::{LeadId, LeadStatus, Predicate, StatusFilter};
    use leadboard_test_utils::{MemoryStore, StoreOp, fixtures};
    use tracing_test::traced_test;

    async fn seeded() -> (MemoryStore, AccountContext) {
        let store = MemoryStore::new();
        let account = AccountContext::new("acct", "owner");
        for lead in fixtures::sample_leads() {
            store.insert_lead(&account, &lead).await.unwrap();
        }
        (store, account)
    }

    #[tokio::test]
    async fn fetch_passes_built_query_to_store() {
        let (store, account) = seeded().await;
        let fetcher = LeadsFetcher::new(Arc::new(store.clone()), SearchPrecedence::Legacy);

        let rows = fetcher
            .fetch(&account, &FilterState::new("", StatusFilter::Only(LeadStatus::NewLead)))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        let recorded = store.lead_queries().await;
        assert_eq!(recorded[0].1.predicate, Predicate::StatusEq(LeadStatus::NewLead));
    }

    #[tokio::test]
    #[traced_test]
    async fn failure_is_logged_and_returned() {
        let (store, account) = seeded().await;
        store.fail_on(StoreOp::QueryLeads).await;
        let fetcher = LeadsFetcher::new(Arc::new(store), SearchPrecedence::Legacy);

        let result = fetcher.fetch(&account, &FilterState::default()).await;
        assert!(result.is_err());
        assert!(logs_contain("error fetching leads"));

        let view = LeadsView::from(result);
        assert!(view.is_failed());
        assert!(view.rows().is_empty());
    }

    #[test]
    fn view_serializes_with_state_tag() {
        let view = LeadsView::Loaded {
            rows: vec![Lead {
                id: LeadId("l-1".into()),
                first_name: None,
                email: None,
                status: None,
                source: None,
                created_at: "2026-01-01T00:00:00.000Z".into(),
            }],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["state"], "loaded");
        assert_eq!(json["rows"][0]["id"], "l-1");

        let failed = serde_json::to_value(LeadsView::Failed { error: "boom".into() }).unwrap();
        assert_eq!(failed, serde_json::json!({"state": "failed", "error": "boom"}));
    }
}
