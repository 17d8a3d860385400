// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leadboard leads`, `stats` and `activity`: page models on the terminal.
//!
//! Each command builds the same model the gateway serves and prints it as a
//! plain table, or as JSON with `--json`.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use leadboard_config::model::LeadboardConfig;
use leadboard_core::{AccountContext, LeadStore, LeadboardError, StatusFilter};
use leadboard_dashboard::{
    ActivityItem, DashboardService, DashboardSummary, FeedMode, FilterState, LeadRow, LeadsFetcher,
    Section, ViewInvalidator, views,
};
use serde::Serialize;

fn to_json<T: Serialize>(value: &T) -> Result<String, LeadboardError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| LeadboardError::Internal(format!("failed to encode output: {e}")))
}

/// Parses a `--status` argument.
pub fn parse_status(raw: Option<&str>) -> Result<StatusFilter, LeadboardError> {
    match raw {
        None => Ok(StatusFilter::All),
        Some(value) => StatusFilter::parse(value).ok_or_else(|| {
            LeadboardError::InvalidInput(format!(
                "unknown status {value:?}; expected \"all\" or one of: New Lead, Nurturing, Trial Booked, Confirmed, Closed"
            ))
        }),
    }
}

pub fn render_lead_rows(rows: &[LeadRow]) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        out.push_str("no leads\n");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<12} {:<28} {:<13} {:<12} {}",
        "NAME", "EMAIL", "STATUS", "SOURCE", "ADDED"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<12} {:<28} {:<13} {:<12} {}",
            row.name,
            row.email.as_deref().unwrap_or("-"),
            row.status,
            row.source,
            row.date_added
        );
    }
    out
}

fn render_section<T>(out: &mut String, title: &str, section: &Section<T>, body: impl FnOnce(&mut String, &T)) {
    let _ = writeln!(out, "{title}");
    match section {
        Section::Ready(value) => body(out, value),
        Section::Unavailable { error } => {
            let _ = writeln!(out, "  unavailable: {error}");
        }
    }
    out.push('\n');
}

pub fn render_summary(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    render_section(&mut out, "Leads by status", &summary.stat_cards, |out, cards| {
        for card in cards {
            let _ = writeln!(out, "  {:<13} {}", card.status.label(), card.count);
        }
    });
    render_section(&mut out, "Leads by source", &summary.source_chart, |out, bars| {
        for bar in bars {
            let _ = writeln!(out, "  {:<13} {}", bar.source, bar.count);
        }
    });
    render_section(&mut out, "Recent activity", &summary.activity, |out, items| {
        render_activity_into(out, items);
    });
    render_section(&mut out, "Recent leads", &summary.recent_leads, |out, rows| {
        for row in rows {
            let _ = writeln!(out, "  {} ({}) {}", row.name, row.status, row.date_added);
        }
    });
    out
}

fn render_activity_into(out: &mut String, items: &[ActivityItem]) {
    if items.is_empty() {
        out.push_str("  no activity\n");
    }
    for item in items {
        let _ = writeln!(out, "  {:<12} {}", item.time_ago, item.event_type);
    }
}

pub fn render_activity(items: &[ActivityItem]) -> String {
    let mut out = String::new();
    render_activity_into(&mut out, items);
    out
}

/// `leadboard leads`
pub async fn run_leads(
    store: Arc<dyn LeadStore>,
    config: &LeadboardConfig,
    account: &AccountContext,
    filter: FilterState,
    json: bool,
) -> Result<String, LeadboardError> {
    let fetcher = LeadsFetcher::new(store, config.leads.search_precedence);
    let leads = fetcher.fetch(account, &filter).await?;
    let rows = views::lead_rows(&leads);
    if json { to_json(&rows) } else { Ok(render_lead_rows(&rows)) }
}

/// `leadboard stats`
pub async fn run_stats(
    store: Arc<dyn LeadStore>,
    config: &LeadboardConfig,
    account: &AccountContext,
    now: DateTime<Utc>,
    json: bool,
) -> Result<String, LeadboardError> {
    let service = DashboardService::new(store, ViewInvalidator::new(), config.dashboard.clone());
    let summary = service.summary(account, now).await;
    if json { to_json(&summary) } else { Ok(render_summary(&summary)) }
}

/// `leadboard activity`
pub async fn run_activity(
    store: Arc<dyn LeadStore>,
    config: &LeadboardConfig,
    account: &AccountContext,
    all: bool,
    now: DateTime<Utc>,
    json: bool,
) -> Result<String, LeadboardError> {
    let mode = if all {
        FeedMode::FullPage
    } else {
        FeedMode::Summary(config.dashboard.activity_summary_limit)
    };
    let events = store.query_events(account, mode.limit()).await?;
    let items = views::activity_feed(&events, mode, now);
    if json { to_json(&items) } else { Ok(render_activity(&items)) }
}
