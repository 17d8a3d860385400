// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end page flows against a real SQLite store.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use leadboard_core::{LeadStatus, SearchPrecedence, StatusFilter};
use leadboard_dashboard::{
    DashboardService, FilterController, FilterInput, FilterSession, LeadsFetcher, LeadsView,
    Location, MutationHandlers, MutationOutcome, ViewInvalidator,
};
use leadboard_test_utils::{TestHarness, fixtures};

async fn harness() -> TestHarness {
    TestHarness::builder()
        .with_leads(fixtures::sample_leads())
        .with_events(fixtures::sample_events())
        .build()
        .await
        .unwrap()
}

fn counts(summary: &leadboard_dashboard::DashboardSummary) -> Vec<u64> {
    summary
        .stat_cards
        .ready()
        .unwrap()
        .iter()
        .map(|c| c.count)
        .collect()
}

#[tokio::test]
async fn status_change_is_visible_on_dashboard_after_invalidation() {
    let h = harness().await;
    let invalidator = ViewInvalidator::new();
    let service = DashboardService::new(
        h.lead_store(),
        invalidator.clone(),
        h.config.dashboard.clone(),
    );
    let handlers = MutationHandlers::new(h.lead_store(), invalidator.clone());
    let now = Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap();

    assert_eq!(counts(&service.summary(&h.account, now).await), vec![2, 1, 0, 1, 1]);

    let priya = h
        .leads
        .iter()
        .find(|l| l.first_name.as_deref() == Some("Priya"))
        .unwrap();
    let outcome = handlers
        .set_status(&h.account, Some(priya.id.as_str()), Some("Trial Booked"))
        .await
        .unwrap();
    assert_eq!(outcome, MutationOutcome::Applied { rows: 1 });

    assert_eq!(counts(&service.summary(&h.account, now).await), vec![1, 1, 1, 1, 1]);
}

#[tokio::test]
async fn controller_fetches_against_sqlite() {
    let h = harness().await;
    let fetcher = LeadsFetcher::new(h.lead_store(), SearchPrecedence::Legacy);
    let mut controller = FilterController::new(
        Location::parse("/leads?q=jo&status=New+Lead").unwrap(),
        Duration::from_millis(300),
    );

    let ticket = controller.start();
    let view = LeadsView::from(fetcher.fetch(&h.account, &ticket.filter).await);
    assert!(controller.complete(ticket.seq, view));

    // Legacy precedence: Joanna matches status and name; John matches on email.
    let names: Vec<_> = controller
        .view()
        .rows()
        .iter()
        .filter_map(|l| l.first_name.clone())
        .collect();
    assert_eq!(names, vec!["John", "Joanna"]);
}

#[tokio::test]
async fn grouped_precedence_keeps_status_filter() {
    let h = harness().await;
    let fetcher = LeadsFetcher::new(h.lead_store(), SearchPrecedence::Grouped);
    let filter = leadboard_dashboard::FilterState::new("jo", StatusFilter::Only(LeadStatus::NewLead));
    let rows = fetcher.fetch(&h.account, &filter).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].first_name.as_deref(), Some("Joanna"));
}

#[tokio::test]
async fn session_refetches_after_delete() {
    let h = harness().await;
    let invalidator = ViewInvalidator::new();
    let handlers = MutationHandlers::new(h.lead_store(), invalidator.clone());
    let session = FilterSession::spawn(
        LeadsFetcher::new(h.lead_store(), SearchPrecedence::Legacy),
        h.account.clone(),
        Location::parse("/leads").unwrap(),
        Duration::from_millis(300),
        &invalidator,
    );

    let mut rx = session.subscribe();
    {
        let snap = rx.wait_for(|s| !s.loading && s.view.rows().len() == 5).await.unwrap();
        assert_eq!(snap.location, "/leads");
    }

    let marcus = h
        .leads
        .iter()
        .find(|l| l.first_name.as_deref() == Some("Marcus"))
        .unwrap();
    handlers
        .delete_lead(&h.account, Some(marcus.id.as_str()))
        .await
        .unwrap();

    let remaining = {
        let snap = rx.wait_for(|s| !s.loading && s.view.rows().len() == 4).await.unwrap();
        snap.view.rows().len()
    };
    assert_eq!(remaining, 4);

    session.send(FilterInput::Refresh).await.unwrap();
    session.shutdown().await;
}
