// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data access layer over the `leads` and `events` record types.

use async_trait::async_trait;

use crate::error::LeadboardError;
use crate::query::LeadQuery;
use crate::traits::adapter::PluginAdapter;
use crate::types::{
    AccountContext, AggregateKind, AggregateRow, Event, Lead, LeadId, LeadUpdate, NewEvent,
    NewLead,
};

/// Row-level access to leads and events, scoped to one account per call.
///
/// Implementations must never return, update or delete rows belonging to an
/// account other than the one passed in.
#[async_trait]
pub trait LeadStore: PluginAdapter {
    /// Returns the leads matching `query`, newest first.
    async fn query_leads(
        &self,
        account: &AccountContext,
        query: &LeadQuery,
    ) -> Result<Vec<Lead>, LeadboardError>;

    /// Returns activity events newest first, optionally capped to `limit` rows.
    async fn query_events(
        &self,
        account: &AccountContext,
        limit: Option<usize>,
    ) -> Result<Vec<Event>, LeadboardError>;

    /// Runs a named read-only aggregate.
    async fn aggregate(
        &self,
        account: &AccountContext,
        kind: AggregateKind,
    ) -> Result<Vec<AggregateRow>, LeadboardError>;

    /// Applies `update` to one lead. Returns the number of rows changed
    /// (0 when the id is unknown to this account).
    async fn update_lead(
        &self,
        account: &AccountContext,
        id: &LeadId,
        update: &LeadUpdate,
    ) -> Result<u64, LeadboardError>;

    /// Deletes one lead. Returns the number of rows removed.
    async fn delete_lead(&self, account: &AccountContext, id: &LeadId)
    -> Result<u64, LeadboardError>;

    /// Creates a lead and returns the stored row.
    async fn insert_lead(
        &self,
        account: &AccountContext,
        lead: &NewLead,
    ) -> Result<Lead, LeadboardError>;

    /// Appends an activity event and returns the stored row.
    async fn append_event(
        &self,
        account: &AccountContext,
        event: &NewEvent,
    ) -> Result<Event, LeadboardError>;
}
