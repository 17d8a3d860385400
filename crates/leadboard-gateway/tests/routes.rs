// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use leadboard_core::LeadStore;
use leadboard_gateway::{AuthGate, GatewayState, StaticTokenAuth, build_router};
use leadboard_test_utils::{MemoryStore, StoreOp, TEST_TOKEN, TestHarness, fixtures};
use serde_json::Value;
use tower::ServiceExt;

fn router_for(store: Arc<dyn LeadStore>, harness: &TestHarness) -> Router {
    let state = GatewayState::new(store, &harness.config);
    let gate = AuthGate {
        adapter: Arc::new(StaticTokenAuth::from_config(&harness.config.auth)),
        session_cookie: harness.config.auth.session_cookie.clone(),
        login_url: harness.config.server.login_url.clone(),
    };
    build_router(state, gate)
}

async fn setup() -> (TestHarness, Router) {
    let harness = TestHarness::builder()
        .with_leads(fixtures::sample_leads())
        .with_events(fixtures::sample_events())
        .build()
        .await
        .unwrap();
    let router = router_for(harness.lead_store(), &harness);
    (harness, router)
}

fn authed(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
}

async fn json(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn form(uri: &str, body: &'static str) -> Request<Body> {
    authed("POST", uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let (_h, router) = setup().await;
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = json(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn anonymous_page_request_redirects_to_login() {
    let (h, router) = setup().await;
    let request = Request::get("/dashboard").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        h.config.server.login_url.as_str()
    );
}

#[tokio::test]
async fn unknown_token_redirects_to_login() {
    let (_h, router) = setup().await;
    let request = Request::get("/leads")
        .header(header::AUTHORIZATION, "Bearer not-a-session")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn session_cookie_is_accepted() {
    let (h, router) = setup().await;
    let request = Request::get("/sources")
        .header(
            header::COOKIE,
            format!("{}={TEST_TOKEN}", h.config.auth.session_cookie),
        )
        .body(Body::empty())
        .unwrap();
    let (status, body) = json(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sources"][0]["source"], "Instagram");
}

#[tokio::test]
async fn dashboard_returns_all_sections() {
    let (_h, router) = setup().await;
    let (status, body) = json(&router, authed("GET", "/dashboard").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stat_cards"]["state"], "ready");
    let counts: Vec<u64> = body["stat_cards"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["count"].as_u64().unwrap())
        .collect();
    assert_eq!(counts, vec![2, 1, 0, 1, 1]);
    assert_eq!(body["recent_leads"]["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["activity"]["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn leads_filter_and_canonical_location() {
    let (_h, router) = setup().await;
    let request = authed("GET", "/leads?status=New+Lead&q=&page=2")
        .body(Body::empty())
        .unwrap();
    let (status, body) = json(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "/leads?status=New+Lead&page=2");
    assert_eq!(body["filter"]["status"], "New Lead");
    let names: Vec<&str> = body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Joanna", "Priya"]);
    assert!(body["error"].is_null());
}

#[tokio::test]
async fn failed_lead_fetch_renders_empty_table() {
    let (h, _) = setup().await;
    let store = MemoryStore::new();
    store.fail_on(StoreOp::QueryLeads).await;
    let router = router_for(Arc::new(store), &h);

    let (status, body) = json(&router, authed("GET", "/leads").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["rows"].as_array().unwrap().is_empty());
    assert!(body["error"].as_str().unwrap().contains("storage error"));
}

#[tokio::test]
async fn update_status_action_changes_lead() {
    let (h, router) = setup().await;
    let priya = h
        .leads
        .iter()
        .find(|l| l.first_name.as_deref() == Some("Priya"))
        .unwrap();
    let body = format!("id={}&status=Trial+Booked", priya.id);
    let request = authed("POST", "/actions/update-lead-status")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    let (status, outcome) = json(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome, serde_json::json!({"outcome": "applied", "rows": 1}));

    let (_, page) = json(
        &router,
        authed("GET", "/leads?status=Trial+Booked").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(page["rows"][0]["name"], "Priya");
}

#[tokio::test]
async fn action_with_missing_fields_is_skipped() {
    let (_h, router) = setup().await;
    let (status, outcome) = json(&router, form("/actions/update-lead-status", "id=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome, serde_json::json!({"outcome": "skipped"}));

    let (status, outcome) = json(&router, form("/actions/delete-lead", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["outcome"], "skipped");
}

#[tokio::test]
async fn delete_unknown_id_is_noop() {
    let (_h, router) = setup().await;
    let (status, outcome) = json(&router, form("/actions/delete-lead", "id=ghost")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome, serde_json::json!({"outcome": "applied", "rows": 0}));
}

#[tokio::test]
async fn store_failure_on_action_is_bad_gateway() {
    let (h, _) = setup().await;
    let store = MemoryStore::new();
    store.fail_on(StoreOp::DeleteLead).await;
    let router = router_for(Arc::new(store), &h);

    let (status, body) = json(&router, form("/actions/delete-lead", "id=l-1")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("storage error"));
}

#[tokio::test]
async fn dashboard_reflects_delete_through_cache() {
    let (h, router) = setup().await;
    let (_, before) = json(&router, authed("GET", "/dashboard").body(Body::empty()).unwrap()).await;
    assert_eq!(before["stat_cards"]["data"][4]["count"], 1);

    let john = h
        .leads
        .iter()
        .find(|l| l.first_name.as_deref() == Some("John"))
        .unwrap();
    let request = authed("POST", "/actions/delete-lead")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("id={}", john.id)))
        .unwrap();
    let (status, _) = json(&router, request).await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = json(&router, authed("GET", "/dashboard").body(Body::empty()).unwrap()).await;
    assert_eq!(after["stat_cards"]["data"][4]["count"], 0);
}

#[tokio::test]
async fn activity_page_lists_everything() {
    let (_h, router) = setup().await;
    let (status, body) = json(&router, authed("GET", "/activity").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"].as_array().unwrap().len(), 12);
}
