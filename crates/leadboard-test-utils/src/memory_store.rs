// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory lead store for deterministic testing.
//!
//! `MemoryStore` implements [`LeadStore`] over plain vectors, evaluating
//! queries with [`LeadQuery::apply`]. Individual operations can be made to
//! fail, and every lead query is recorded for later assertions.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use leadboard_core::{
    AccountContext, AdapterType, AggregateKind, AggregateRow, Event, EventId, HealthStatus, Lead,
    LeadId, LeadQuery, LeadStore, LeadUpdate, LeadboardError, NewEvent, NewLead, PluginAdapter,
};

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    QueryLeads,
    QueryEvents,
    Aggregate,
    UpdateLead,
    DeleteLead,
    InsertLead,
    AppendEvent,
}

#[derive(Default)]
struct State {
    leads: Vec<(String, Lead)>,
    events: Vec<(String, Event)>,
    failing: HashSet<StoreOp>,
    lead_queries: Vec<(AccountContext, LeadQuery)>,
    mutations: usize,
    query_latency: Option<Duration>,
}

/// Lead store backed by in-process vectors.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

/// Current UTC time in the store's timestamp format.
pub fn now_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call of `op` fail with a storage error.
    pub async fn fail_on(&self, op: StoreOp) {
        self.state.lock().await.failing.insert(op);
    }

    /// Clears all injected failures.
    pub async fn recover(&self) {
        self.state.lock().await.failing.clear();
    }

    /// Delays every lead query by `latency`.
    pub async fn set_query_latency(&self, latency: Duration) {
        self.state.lock().await.query_latency = Some(latency);
    }

    /// Lead queries received so far, oldest first.
    pub async fn lead_queries(&self) -> Vec<(AccountContext, LeadQuery)> {
        self.state.lock().await.lead_queries.clone()
    }

    /// Number of update/delete calls that reached the store.
    pub async fn mutation_count(&self) -> usize {
        self.state.lock().await.mutations
    }

    /// Every lead of `account`, in insertion order.
    pub async fn leads_of(&self, account: &AccountContext) -> Vec<Lead> {
        self.state
            .lock()
            .await
            .leads
            .iter()
            .filter(|(owner, _)| *owner == account.account_id)
            .map(|(_, lead)| lead.clone())
            .collect()
    }

    fn check(state: &State, op: StoreOp) -> Result<(), LeadboardError> {
        if state.failing.contains(&op) {
            return Err(LeadboardError::Storage {
                source: format!("injected failure for {op:?}").into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadboardError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LeadboardError> {
        Ok(())
    }
}

#[async_trait]
impl LeadStore for MemoryStore {
    async fn query_leads(
        &self,
        account: &AccountContext,
        query: &LeadQuery,
    ) -> Result<Vec<Lead>, LeadboardError> {
        let latency = {
            let mut state = self.state.lock().await;
            state.lead_queries.push((account.clone(), query.clone()));
            state.query_latency
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let state = self.state.lock().await;
        Self::check(&state, StoreOp::QueryLeads)?;
        Ok(query.apply(
            state
                .leads
                .iter()
                .filter(|(owner, _)| *owner == account.account_id)
                .map(|(_, lead)| lead),
        ))
    }

    async fn query_events(
        &self,
        account: &AccountContext,
        limit: Option<usize>,
    ) -> Result<Vec<Event>, LeadboardError> {
        let state = self.state.lock().await;
        Self::check(&state, StoreOp::QueryEvents)?;
        let mut events: Vec<Event> = state
            .events
            .iter()
            .filter(|(owner, _)| *owner == account.account_id)
            .map(|(_, event)| event.clone())
            .collect();
        events.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        if let Some(limit) = limit {
            events.truncate(limit);
        }
        Ok(events)
    }

    async fn aggregate(
        &self,
        account: &AccountContext,
        kind: AggregateKind,
    ) -> Result<Vec<AggregateRow>, LeadboardError> {
        let state = self.state.lock().await;
        Self::check(&state, StoreOp::Aggregate)?;

        let mut groups: BTreeMap<Option<String>, u64> = BTreeMap::new();
        for (_, lead) in state
            .leads
            .iter()
            .filter(|(owner, _)| *owner == account.account_id)
        {
            let key = match kind {
                AggregateKind::LeadsByStatus => lead.status.map(|s| s.label().to_string()),
                AggregateKind::LeadsBySource => lead.source.clone(),
            };
            *groups.entry(key).or_default() += 1;
        }

        let mut rows: Vec<AggregateRow> = groups
            .into_iter()
            .map(|(key, count)| AggregateRow { key, count })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        Ok(rows)
    }

    async fn update_lead(
        &self,
        account: &AccountContext,
        id: &LeadId,
        update: &LeadUpdate,
    ) -> Result<u64, LeadboardError> {
        let mut state = self.state.lock().await;
        state.mutations += 1;
        Self::check(&state, StoreOp::UpdateLead)?;
        let mut rows = 0;
        for (owner, lead) in state.leads.iter_mut() {
            if *owner == account.account_id && lead.id == *id {
                if let Some(status) = update.status {
                    lead.status = Some(status);
                }
                rows += 1;
            }
        }
        Ok(rows)
    }

    async fn delete_lead(
        &self,
        account: &AccountContext,
        id: &LeadId,
    ) -> Result<u64, LeadboardError> {
        let mut state = self.state.lock().await;
        state.mutations += 1;
        Self::check(&state, StoreOp::DeleteLead)?;
        let before = state.leads.len();
        state
            .leads
            .retain(|(owner, lead)| !(*owner == account.account_id && lead.id == *id));
        Ok((before - state.leads.len()) as u64)
    }

    async fn insert_lead(
        &self,
        account: &AccountContext,
        lead: &NewLead,
    ) -> Result<Lead, LeadboardError> {
        let mut state = self.state.lock().await;
        Self::check(&state, StoreOp::InsertLead)?;
        let stored = Lead {
            id: LeadId(uuid::Uuid::new_v4().to_string()),
            first_name: lead.first_name.clone(),
            email: lead.email.clone(),
            status: lead.status,
            source: lead.source.clone(),
            created_at: lead.created_at.clone().unwrap_or_else(now_timestamp),
        };
        state
            .leads
            .push((account.account_id.clone(), stored.clone()));
        Ok(stored)
    }

    async fn append_event(
        &self,
        account: &AccountContext,
        event: &NewEvent,
    ) -> Result<Event, LeadboardError> {
        let mut state = self.state.lock().await;
        Self::check(&state, StoreOp::AppendEvent)?;
        let stored = Event {
            id: EventId(uuid::Uuid::new_v4().to_string()),
            event_type: event.event_type.clone(),
            created_at: event.created_at.clone().unwrap_or_else(now_timestamp),
        };
        state
            .events
            .push((account.account_id.clone(), stored.clone()));
        Ok(stored)
    }
}
