// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned rows shared by integration tests.

use leadboard_core::{LeadStatus, NewEvent, NewLead};

/// Builds a lead with an explicit creation time.
pub fn lead(
    first_name: Option<&str>,
    email: Option<&str>,
    status: Option<LeadStatus>,
    source: Option<&str>,
    created_at: &str,
) -> NewLead {
    NewLead {
        first_name: first_name.map(str::to_string),
        email: email.map(str::to_string),
        status,
        source: source.map(str::to_string),
        created_at: Some(created_at.to_string()),
    }
}

/// Builds an event with an explicit creation time.
pub fn event(event_type: &str, created_at: &str) -> NewEvent {
    NewEvent {
        event_type: event_type.to_string(),
        created_at: Some(created_at.to_string()),
    }
}

/// Five leads: two "New Lead", one each of Nurturing, Confirmed and Closed,
/// none Trial Booked. One lead has no source.
pub fn sample_leads() -> Vec<NewLead> {
    vec![
        lead(
            Some("John"),
            Some("john@example.com"),
            Some(LeadStatus::Closed),
            Some("Instagram"),
            "2026-03-05T09:00:00.000Z",
        ),
        lead(
            Some("Joanna"),
            Some("joanna@example.com"),
            Some(LeadStatus::NewLead),
            Some("Instagram"),
            "2026-03-04T09:00:00.000Z",
        ),
        lead(
            Some("Priya"),
            Some("priya@example.com"),
            Some(LeadStatus::NewLead),
            Some("Referral"),
            "2026-03-03T09:00:00.000Z",
        ),
        lead(
            None,
            Some("anon@example.com"),
            Some(LeadStatus::Nurturing),
            None,
            "2026-03-02T09:00:00.000Z",
        ),
        lead(
            Some("Marcus"),
            Some("marcus@example.com"),
            Some(LeadStatus::Confirmed),
            Some("Website"),
            "2026-03-01T09:00:00.000Z",
        ),
    ]
}

/// Twelve events, one hour apart, newest last.
pub fn sample_events() -> Vec<NewEvent> {
    (0..12)
        .map(|hour| {
            event(
                &format!("Automation step {hour}"),
                &format!("2026-03-05T{hour:02}:00:00.000Z"),
            )
        })
        .collect()
}
