// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed test harness.
//!
//! `TestHarness` opens a store in a temp directory, registers one signed-in
//! account in the config and seeds whatever rows the builder was given.

use std::sync::Arc;

use leadboard_config::model::{AccountConfig, LeadboardConfig, StorageConfig};
use leadboard_core::{AccountContext, Event, Lead, LeadStore, LeadboardError, NewEvent, NewLead};
use leadboard_storage::SqliteStore;

/// Session token of the harness account.
pub const TEST_TOKEN: &str = "test-session-token";

/// Account id of the harness account.
pub const TEST_ACCOUNT: &str = "acct-test";

/// Builder for [`TestHarness`].
pub struct TestHarnessBuilder {
    leads: Vec<NewLead>,
    events: Vec<NewEvent>,
    config: LeadboardConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            leads: Vec::new(),
            events: Vec::new(),
            config: LeadboardConfig::default(),
        }
    }

    /// Leads to insert for the harness account.
    pub fn with_leads(mut self, leads: Vec<NewLead>) -> Self {
        self.leads = leads;
        self
    }

    /// Events to append for the harness account.
    pub fn with_events(mut self, events: Vec<NewEvent>) -> Self {
        self.events = events;
        self
    }

    /// Base configuration; storage and auth sections are overwritten.
    pub fn with_config(mut self, config: LeadboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Opens the database and seeds it.
    pub async fn build(self) -> Result<TestHarness, LeadboardError> {
        let temp_dir = tempfile::TempDir::new().map_err(LeadboardError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = self.config;
        config.storage = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        config.auth.accounts = vec![AccountConfig {
            token: TEST_TOKEN.to_string(),
            account_id: TEST_ACCOUNT.to_string(),
            user_id: "owner".to_string(),
            email: Some("owner@example.com".to_string()),
        }];

        let store = SqliteStore::new(config.storage.clone());
        store.initialize().await?;

        let account = AccountContext::new(TEST_ACCOUNT, "owner");
        let mut leads = Vec::with_capacity(self.leads.len());
        for lead in &self.leads {
            leads.push(store.insert_lead(&account, lead).await?);
        }
        let mut events = Vec::with_capacity(self.events.len());
        for event in &self.events {
            events.push(store.append_event(&account, event).await?);
        }

        Ok(TestHarness {
            store: Arc::new(store),
            account,
            config,
            leads,
            events,
            _temp_dir: temp_dir,
        })
    }
}

/// A seeded SQLite store plus the config that points at it.
pub struct TestHarness {
    pub store: Arc<SqliteStore>,
    pub account: AccountContext,
    pub config: LeadboardConfig,
    /// Seeded leads as stored, in insertion order.
    pub leads: Vec<Lead>,
    /// Seeded events as stored, in insertion order.
    pub events: Vec<Event>,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// The store as a trait object.
    pub fn lead_store(&self) -> Arc<dyn LeadStore> {
        self.store.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use leadboard_core::LeadQuery;

    #[tokio::test]
    async fn harness_seeds_rows_for_its_account() {
        let harness = TestHarness::builder()
            .with_leads(fixtures::sample_leads())
            .with_events(fixtures::sample_events())
            .build()
            .await
            .unwrap();

        let rows = harness
            .store
            .query_leads(&harness.account, &LeadQuery::all())
            .await
            .unwrap();
        assert_eq!(rows.len(), harness.leads.len());
        assert_eq!(harness.config.auth.accounts[0].account_id, TEST_ACCOUNT);
        assert!(std::path::Path::new(&harness.config.storage.database_path).exists());
    }
}
