// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presentation models for the dashboard and leads pages.
//!
//! Everything here is a pure function of store rows, so it can be tested
//! without a runtime and reused by the gateway and the CLI.

use chrono::{DateTime, Utc};
use leadboard_core::{AggregateRow, Event, EventId, Lead, LeadStatus};
use serde::Serialize;

/// Label used where a lead has no source or status.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Display name for a lead without a first name.
pub const NO_NAME_LABEL: &str = "No Name";

/// Visual grouping of a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatTone {
    Progress,
    Engagement,
    Lost,
    Neutral,
}

impl StatTone {
    fn for_status(status: LeadStatus) -> Self {
        match status {
            LeadStatus::TrialBooked | LeadStatus::Confirmed => Self::Progress,
            LeadStatus::Nurturing => Self::Engagement,
            LeadStatus::Closed => Self::Lost,
            LeadStatus::NewLead => Self::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub status: LeadStatus,
    pub count: u64,
    pub tone: StatTone,
}

/// One card per funnel stage, in funnel order. Statuses with no rows count
/// zero; null and unrecognised keys are dropped.
pub fn stat_cards(rows: &[AggregateRow]) -> Vec<StatCard> {
    LeadStatus::ALL
        .iter()
        .map(|&status| {
            let count = rows
                .iter()
                .filter(|row| row.key.as_deref() == Some(status.label()))
                .map(|row| row.count)
                .sum();
            StatCard {
                status,
                count,
                tone: StatTone::for_status(status),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceBar {
    pub source: String,
    pub count: u64,
}

/// Bars for the "leads by source" chart, in aggregate order.
pub fn source_chart(rows: &[AggregateRow]) -> Vec<SourceBar> {
    rows.iter()
        .map(|row| SourceBar {
            source: row.key.clone().unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            count: row.count,
        })
        .collect()
}

/// The source analytics card; hidden when there is nothing to show.
pub fn source_analytics(rows: &[AggregateRow]) -> Option<Vec<SourceBar>> {
    let bars = source_chart(rows);
    (!bars.is_empty()).then_some(bars)
}

/// How much of the activity log to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// Dashboard card: at most this many entries.
    Summary(usize),
    /// Dedicated activity page: everything.
    FullPage,
}

impl FeedMode {
    /// Row limit to request from the store.
    pub fn limit(self) -> Option<usize> {
        match self {
            Self::Summary(n) => Some(n),
            Self::FullPage => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub id: EventId,
    pub event_type: String,
    pub created_at: String,
    pub time_ago: String,
}

/// Activity entries with relative timestamps. `events` are expected newest
/// first, as the store returns them.
pub fn activity_feed(events: &[Event], mode: FeedMode, now: DateTime<Utc>) -> Vec<ActivityItem> {
    let take = mode.limit().unwrap_or(usize::MAX);
    events
        .iter()
        .take(take)
        .map(|event| ActivityItem {
            id: event.id.clone(),
            event_type: event.event_type.clone(),
            created_at: event.created_at.clone(),
            time_ago: time_ago(&event.created_at, now),
        })
        .collect()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Relative label such as `"4 min ago"`. Each unit is rounded from the one
/// below it; a day or more falls back to the calendar date. Unparseable
/// input is returned unchanged.
pub fn time_ago(created_at: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(created_at) else {
        return created_at.to_string();
    };
    let millis = (now - then).num_milliseconds().max(0) as f64;
    let seconds = (millis / 1000.0).round();
    let minutes = (seconds / 60.0).round();
    let hours = (minutes / 60.0).round();

    if seconds < 60.0 {
        format!("{} sec ago", seconds as i64)
    } else if minutes < 60.0 {
        format!("{} min ago", minutes as i64)
    } else if hours < 24.0 {
        format!("{} hr ago", hours as i64)
    } else {
        date_label(then)
    }
}

fn date_label(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// One row of the leads table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRow {
    /// Stable row identity.
    pub key: String,
    pub name: String,
    pub email: Option<String>,
    pub status: String,
    pub source: String,
    pub date_added: String,
    /// Statuses offered in the row's "move to" menu.
    pub transitions: Vec<LeadStatus>,
}

impl From<&Lead> for LeadRow {
    fn from(lead: &Lead) -> Self {
        let name = lead
            .first_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(NO_NAME_LABEL)
            .to_string();
        let source = lead
            .source
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_LABEL)
            .to_string();
        let date_added = parse_timestamp(&lead.created_at)
            .map(date_label)
            .unwrap_or_else(|| lead.created_at.clone());
        Self {
            key: lead.id.to_string(),
            name,
            email: lead.email.clone(),
            status: lead
                .status
                .map_or(UNKNOWN_LABEL, LeadStatus::label)
                .to_string(),
            source,
            date_added,
            transitions: LeadStatus::ALL
                .into_iter()
                .filter(|s| Some(*s) != lead.status)
                .collect(),
        }
    }
}

pub fn lead_rows(leads: &[Lead]) -> Vec<LeadRow> {
    leads.iter().map(LeadRow::from).collect()
}

/// The newest `limit` leads as table rows. `leads` must already be newest
/// first.
pub fn recent_leads(leads: &[Lead], limit: usize) -> Vec<LeadRow> {
    leads.iter().take(limit).map(LeadRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use leadboard_core::LeadId;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap()
    }

    fn ago(d: chrono::Duration) -> String {
        (now() - d).to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }

    #[test]
    fn stat_cards_cover_master_list() {
        let rows = vec![
            AggregateRow::new(Some("New Lead"), 2),
            AggregateRow::new(None, 4),
            AggregateRow::new(Some("Closed"), 1),
            AggregateRow::new(Some("Confirmed"), 1),
            AggregateRow::new(Some("Nurturing"), 1),
            AggregateRow::new(Some("Lost"), 9),
        ];
        let cards = stat_cards(&rows);
        let counts: Vec<(LeadStatus, u64)> = cards.iter().map(|c| (c.status, c.count)).collect();
        assert_eq!(
            counts,
            vec![
                (LeadStatus::NewLead, 2),
                (LeadStatus::Nurturing, 1),
                (LeadStatus::TrialBooked, 0),
                (LeadStatus::Confirmed, 1),
                (LeadStatus::Closed, 1),
            ]
        );
        assert_eq!(cards[2].tone, StatTone::Progress);
        assert_eq!(cards[4].tone, StatTone::Lost);
    }

    #[test]
    fn empty_aggregate_yields_zero_cards() {
        let cards = stat_cards(&[]);
        assert_eq!(cards.len(), 5);
        assert!(cards.iter().all(|c| c.count == 0));
    }

    #[test]
    fn source_chart_labels_null_as_unknown() {
        let rows = vec![
            AggregateRow::new(None, 3),
            AggregateRow::new(Some("Instagram"), 2),
        ];
        let bars = source_chart(&rows);
        assert_eq!(bars[0].source, "Unknown");
        assert_eq!(bars[0].count, 3);
        assert_eq!(bars[1].source, "Instagram");
    }

    #[test]
    fn source_analytics_hidden_when_empty() {
        assert!(source_analytics(&[]).is_none());
        assert_eq!(
            source_analytics(&[AggregateRow::new(Some("Website"), 1)])
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn time_ago_boundaries() {
        use chrono::Duration;
        assert_eq!(time_ago(&ago(Duration::seconds(5)), now()), "5 sec ago");
        assert_eq!(time_ago(&ago(Duration::milliseconds(59_400)), now()), "59 sec ago");
        assert_eq!(time_ago(&ago(Duration::seconds(60)), now()), "1 min ago");
        assert_eq!(time_ago(&ago(Duration::minutes(59)), now()), "59 min ago");
        assert_eq!(time_ago(&ago(Duration::minutes(90)), now()), "2 hr ago");
        assert_eq!(time_ago(&ago(Duration::hours(23)), now()), "23 hr ago");
        assert_eq!(time_ago(&ago(Duration::hours(30)), now()), "2026-03-04");
    }

    #[test]
    fn time_ago_rounds_from_previous_unit() {
        // 59 min 40 s rounds to 60 minutes, which is already an hour.
        let at = ago(chrono::Duration::seconds(59 * 60 + 40));
        assert_eq!(time_ago(&at, now()), "1 hr ago");
    }

    #[test]
    fn time_ago_passes_through_garbage() {
        assert_eq!(time_ago("yesterday", now()), "yesterday");
    }

    #[test]
    fn summary_feed_is_capped() {
        let events: Vec<Event> = (0..12)
            .map(|i| Event {
                id: EventId(format!("e-{i}")),
                event_type: "Automation step".into(),
                created_at: ago(chrono::Duration::minutes(i)),
            })
            .collect();
        assert_eq!(activity_feed(&events, FeedMode::Summary(10), now()).len(), 10);
        let full = activity_feed(&events, FeedMode::FullPage, now());
        assert_eq!(full.len(), 12);
        assert_eq!(full[0].time_ago, "0 sec ago");
        assert_eq!(full[3].time_ago, "3 min ago");
    }

    fn lead(first_name: Option<&str>, status: Option<LeadStatus>, source: Option<&str>) -> Lead {
        Lead {
            id: LeadId("l-1".into()),
            first_name: first_name.map(str::to_string),
            email: Some("a@example.com".into()),
            status,
            source: source.map(str::to_string),
            created_at: "2026-03-02T09:30:00.000Z".into(),
        }
    }

    #[test]
    fn lead_row_defaults() {
        let row = LeadRow::from(&lead(None, None, None));
        assert_eq!(row.key, "l-1");
        assert_eq!(row.name, "No Name");
        assert_eq!(row.status, "Unknown");
        assert_eq!(row.source, "Unknown");
        assert_eq!(row.date_added, "2026-03-02");
        assert_eq!(row.transitions.len(), 5);

        let blank = LeadRow::from(&lead(Some(""), None, Some("")));
        assert_eq!(blank.name, "No Name");
        assert_eq!(blank.source, "Unknown");
    }

    #[test]
    fn transitions_exclude_current_status() {
        let row = LeadRow::from(&lead(Some("Ana"), Some(LeadStatus::Confirmed), Some("Website")));
        assert_eq!(row.name, "Ana");
        assert_eq!(row.status, "Confirmed");
        assert_eq!(
            row.transitions,
            vec![
                LeadStatus::NewLead,
                LeadStatus::Nurturing,
                LeadStatus::TrialBooked,
                LeadStatus::Closed,
            ]
        );
    }

    #[test]
    fn recent_leads_takes_prefix() {
        let leads: Vec<Lead> = (0..8)
            .map(|i| {
                let mut l = lead(Some("x"), None, None);
                l.id = LeadId(format!("l-{i}"));
                l
            })
            .collect();
        let recent = recent_leads(&leads, 5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].key, "l-0");
    }
}
