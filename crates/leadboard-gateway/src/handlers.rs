// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Page endpoints return the page model as JSON. Action endpoints accept
//! `application/x-www-form-urlencoded` bodies, as a submitted HTML form
//! would send them.

use axum::{
    Extension, Form, Json,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use leadboard_core::{AccountContext, HealthStatus, LeadboardError};
use leadboard_dashboard::{
    ActivityItem, DashboardSummary, FilterState, LeadRow, LeadsView, Location, MutationOutcome,
    SourceBar, ViewKind,
};
use serde::{Deserialize, Serialize};

use crate::server::GatewayState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A [`LeadboardError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub LeadboardError);

impl From<LeadboardError> for ApiError {
    fn from(e: LeadboardError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LeadboardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LeadboardError::Storage { .. }
            | LeadboardError::Auth(_)
            | LeadboardError::Gateway { .. } => StatusCode::BAD_GATEWAY,
            LeadboardError::Config(_) | LeadboardError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let status = match state.health.store.health_check().await {
        Ok(HealthStatus::Healthy) => "ok".to_string(),
        Ok(HealthStatus::Degraded(reason)) => format!("degraded: {reason}"),
        Ok(HealthStatus::Unhealthy(reason)) => format!("unhealthy: {reason}"),
        Err(e) => format!("unhealthy: {e}"),
    };
    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

/// GET /dashboard
pub async fn get_dashboard(
    State(state): State<GatewayState>,
    Extension(account): Extension<AccountContext>,
) -> Json<DashboardSummary> {
    Json(state.dashboard.summary(&account, Utc::now()).await)
}

/// Response body for GET /leads.
#[derive(Debug, Serialize)]
pub struct LeadsPageResponse {
    pub filter: FilterState,
    /// Canonical location for the applied filter.
    pub location: String,
    pub rows: Vec<LeadRow>,
    /// Set when the fetch failed; `rows` is empty then.
    pub error: Option<String>,
}

/// GET /leads?q=&status=
///
/// A failed fetch still renders the page, with an empty table and the error.
pub async fn get_leads(
    State(state): State<GatewayState>,
    Extension(account): Extension<AccountContext>,
    RawQuery(query): RawQuery,
) -> Result<Json<LeadsPageResponse>, ApiError> {
    let href = match query {
        Some(q) if !q.is_empty() => format!("{}?{q}", ViewKind::Leads.path()),
        _ => ViewKind::Leads.path().to_string(),
    };
    let location = Location::parse(&href)?;
    let filter = FilterState::from_location(&location);
    let view = LeadsView::from(state.fetcher.fetch(&account, &filter).await);

    let (rows, error) = match view {
        LeadsView::Loaded { rows } => (rows.iter().map(LeadRow::from).collect(), None),
        LeadsView::Failed { error } => (Vec::new(), Some(error)),
    };
    Ok(Json(LeadsPageResponse {
        location: location.with_filter(&filter).href(),
        filter,
        rows,
        error,
    }))
}

/// Response body for GET /activity.
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub events: Vec<ActivityItem>,
}

/// GET /activity
pub async fn get_activity(
    State(state): State<GatewayState>,
    Extension(account): Extension<AccountContext>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let events = state.dashboard.activity_page(&account, Utc::now()).await?;
    Ok(Json(ActivityResponse { events }))
}

/// Response body for GET /sources.
#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    /// `None` hides the card.
    pub sources: Option<Vec<SourceBar>>,
}

/// GET /sources
pub async fn get_sources(
    State(state): State<GatewayState>,
    Extension(account): Extension<AccountContext>,
) -> Result<Json<SourcesResponse>, ApiError> {
    let sources = state.dashboard.sources(&account).await?;
    Ok(Json(SourcesResponse { sources }))
}

/// Form body for POST /actions/update-lead-status.
#[derive(Debug, Default, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Form body for POST /actions/delete-lead.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub id: Option<String>,
}

/// POST /actions/update-lead-status
pub async fn post_update_status(
    State(state): State<GatewayState>,
    Extension(account): Extension<AccountContext>,
    Form(form): Form<StatusForm>,
) -> Result<Json<MutationOutcome>, ApiError> {
    let outcome = state
        .mutations
        .set_status(&account, form.id.as_deref(), form.status.as_deref())
        .await?;
    Ok(Json(outcome))
}

/// POST /actions/delete-lead
pub async fn post_delete_lead(
    State(state): State<GatewayState>,
    Extension(account): Extension<AccountContext>,
    Form(form): Form<DeleteForm>,
) -> Result<Json<MutationOutcome>, ApiError> {
    let outcome = state
        .mutations
        .delete_lead(&account, form.id.as_deref())
        .await?;
    Ok(Json(outcome))
}
