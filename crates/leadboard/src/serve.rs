// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leadboard serve` command implementation.
//!
//! Opens the SQLite store, wires the page services and the auth gate into
//! the gateway router, and serves until SIGINT or SIGTERM.

use std::sync::Arc;

use leadboard_config::model::LeadboardConfig;
use leadboard_core::{HealthStatus, LeadStore, LeadboardError, PluginAdapter};
use leadboard_gateway::{AuthGate, GatewayState, StaticTokenAuth, build_router};
use leadboard_storage::SqliteStore;
use tracing::{info, warn};

use crate::shutdown;

/// Opens and migrates the configured store.
pub async fn open_store(config: &LeadboardConfig) -> Result<Arc<SqliteStore>, LeadboardError> {
    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;
    Ok(Arc::new(store))
}

/// Runs the `leadboard serve` command.
pub async fn run_serve(config: LeadboardConfig) -> Result<(), LeadboardError> {
    info!(name = %config.app.name, "starting leadboard serve");

    let store = open_store(&config).await?;
    let auth = StaticTokenAuth::from_config(&config.auth);
    if let HealthStatus::Degraded(reason) = auth.health_check().await? {
        warn!(%reason, "every page request will redirect to login");
    }
    info!(tokens = auth.len(), "static token auth initialized");

    let state = GatewayState::new(Arc::clone(&store) as Arc<dyn LeadStore>, &config);
    let gate = AuthGate {
        adapter: Arc::new(auth),
        session_cookie: config.auth.session_cookie.clone(),
        login_url: config.server.login_url.clone(),
    };
    let app = build_router(state, gate);

    let cancel = shutdown::install_signal_handler();
    let served = leadboard_gateway::serve(&config.server, app, cancel).await;

    if let Err(e) = store.shutdown().await {
        warn!(error = %e, "store shutdown failed");
    }
    served?;
    info!("leadboard serve shutdown complete");
    Ok(())
}
