// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`LeadStore`] trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use leadboard_config::model::StorageConfig;
use leadboard_core::{
    AccountContext, AdapterType, AggregateKind, AggregateRow, Event, HealthStatus, Lead, LeadId,
    LeadQuery, LeadStore, LeadUpdate, LeadboardError, NewEvent, NewLead, PluginAdapter,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed lead store.
///
/// The database is opened lazily by [`SqliteStore::initialize`]; every other
/// call fails with a storage error until then.
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a store for the configured database. Nothing is opened yet.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Opens the database and applies migrations.
    pub async fn initialize(&self) -> Result<(), LeadboardError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| LeadboardError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite lead store initialized");
        Ok(())
    }

    fn db(&self) -> Result<&Database, LeadboardError> {
        self.db.get().ok_or_else(|| LeadboardError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadboardError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("not initialized".into()));
        };
        let ping = db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("SELECT 1", [], |_| Ok(()))
            })
            .await
            .map_err(map_tr_err);
        match ping {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => {
                warn!(error = %e, "storage health check failed");
                Ok(HealthStatus::Unhealthy(e.to_string()))
            }
        }
    }

    async fn shutdown(&self) -> Result<(), LeadboardError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("lead store shut down");
        }
        Ok(())
    }
}

#[async_trait]
impl LeadStore for SqliteStore {
    async fn query_leads(
        &self,
        account: &AccountContext,
        query: &LeadQuery,
    ) -> Result<Vec<Lead>, LeadboardError> {
        queries::leads::query_leads(self.db()?, account, query).await
    }

    async fn query_events(
        &self,
        account: &AccountContext,
        limit: Option<usize>,
    ) -> Result<Vec<Event>, LeadboardError> {
        queries::events::query_events(self.db()?, account, limit).await
    }

    async fn aggregate(
        &self,
        account: &AccountContext,
        kind: AggregateKind,
    ) -> Result<Vec<AggregateRow>, LeadboardError> {
        queries::aggregates::aggregate(self.db()?, account, kind).await
    }

    async fn update_lead(
        &self,
        account: &AccountContext,
        id: &LeadId,
        update: &LeadUpdate,
    ) -> Result<u64, LeadboardError> {
        queries::leads::update_lead(self.db()?, account, id, update).await
    }

    async fn delete_lead(
        &self,
        account: &AccountContext,
        id: &LeadId,
    ) -> Result<u64, LeadboardError> {
        queries::leads::delete_lead(self.db()?, account, id).await
    }

    async fn insert_lead(
        &self,
        account: &AccountContext,
        lead: &NewLead,
    ) -> Result<Lead, LeadboardError> {
        queries::leads::insert_lead(self.db()?, account, lead).await
    }

    async fn append_event(
        &self,
        account: &AccountContext,
        event: &NewEvent,
    ) -> Result<Event, LeadboardError> {
        queries::events::append_event(self.db()?, account, event).await
    }
}
