// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leadboard seed`: demo rows for a fresh account.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use leadboard_core::{AccountContext, LeadStatus, LeadStore, LeadboardError, NewEvent, NewLead};
use tracing::info;

/// `(first name, email, status, source, hours ago)`
type DemoLead = (
    Option<&'static str>,
    &'static str,
    Option<LeadStatus>,
    Option<&'static str>,
    i64,
);

const DEMO_LEADS: &[DemoLead] = &[
    (Some("John"), "john@example.com", Some(LeadStatus::NewLead), Some("Instagram"), 1),
    (Some("Joanna"), "joanna@example.com", Some(LeadStatus::Nurturing), Some("Instagram"), 5),
    (Some("Priya"), "priya@example.com", Some(LeadStatus::TrialBooked), Some("Referral"), 20),
    (None, "anon@example.com", Some(LeadStatus::NewLead), None, 30),
    (Some("Marcus"), "marcus@example.com", Some(LeadStatus::Confirmed), Some("Website"), 48),
    (Some("Lena"), "lena@example.com", Some(LeadStatus::Closed), Some("Website"), 72),
    (Some("Omar"), "omar@example.com", None, Some("Facebook"), 96),
];

/// `(event type, minutes ago)`
const DEMO_EVENTS: &[(&str, i64)] = &[
    ("Welcome email sent", 2),
    ("Lead imported from Instagram", 14),
    ("Trial reminder sent", 75),
    ("Follow-up SMS sent", 300),
    ("Nurture sequence started", 1600),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub leads: usize,
    pub events: usize,
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Inserts the demo leads and events for `account`, dated relative to `now`.
pub async fn seed_demo(
    store: &dyn LeadStore,
    account: &AccountContext,
    now: DateTime<Utc>,
) -> Result<SeedSummary, LeadboardError> {
    for &(first_name, email, status, source, hours) in DEMO_LEADS {
        let lead = NewLead {
            first_name: first_name.map(str::to_string),
            email: Some(email.to_string()),
            status,
            source: source.map(str::to_string),
            created_at: Some(timestamp(now - Duration::hours(hours))),
        };
        store.insert_lead(account, &lead).await?;
    }
    for &(event_type, minutes) in DEMO_EVENTS {
        let event = NewEvent {
            event_type: event_type.to_string(),
            created_at: Some(timestamp(now - Duration::minutes(minutes))),
        };
        store.append_event(account, &event).await?;
    }

    let summary = SeedSummary {
        leads: DEMO_LEADS.len(),
        events: DEMO_EVENTS.len(),
    };
    info!(account = %account.account_id, leads = summary.leads, events = summary.events, "demo data seeded");
    Ok(summary)
}
