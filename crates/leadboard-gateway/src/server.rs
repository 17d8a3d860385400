// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use leadboard_config::model::{LeadboardConfig, ServerConfig};
use leadboard_core::{LeadStore, LeadboardError};
use leadboard_dashboard::{DashboardService, LeadsFetcher, MutationHandlers, ViewInvalidator};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthGate, auth_middleware};
use crate::handlers;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: Instant,
    /// Store checked on every health request.
    pub store: Arc<dyn LeadStore>,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub fetcher: LeadsFetcher,
    pub mutations: MutationHandlers,
    pub dashboard: DashboardService,
    pub health: HealthState,
}

impl GatewayState {
    /// Wires the page services around one store and one invalidator.
    pub fn new(store: Arc<dyn LeadStore>, config: &LeadboardConfig) -> Self {
        let invalidator = ViewInvalidator::new();
        Self {
            fetcher: LeadsFetcher::new(Arc::clone(&store), config.leads.search_precedence),
            mutations: MutationHandlers::new(Arc::clone(&store), invalidator.clone()),
            dashboard: DashboardService::new(
                Arc::clone(&store),
                invalidator,
                config.dashboard.clone(),
            ),
            health: HealthState {
                start_time: Instant::now(),
                store,
            },
        }
    }
}

/// Builds the application router.
///
/// - GET /health (public)
/// - GET /dashboard, /leads, /activity, /sources (signed in)
/// - POST /actions/update-lead-status, /actions/delete-lead (signed in)
pub fn build_router(state: GatewayState, gate: AuthGate) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let page_routes = Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/leads", get(handlers::get_leads))
        .route("/activity", get(handlers::get_activity))
        .route("/sources", get(handlers::get_sources))
        .route(
            "/actions/update-lead-status",
            post(handlers::post_update_status),
        )
        .route("/actions/delete-lead", post(handlers::post_delete_lead))
        .route_layer(axum_middleware::from_fn_with_state(gate, auth_middleware))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(page_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds to the configured host:port and serves `app` until `shutdown` fires.
pub async fn serve(
    config: &ServerConfig,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), LeadboardError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LeadboardError::Gateway {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| LeadboardError::Gateway {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway stopped");
    Ok(())
}
