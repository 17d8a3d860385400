// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the data access layer, the dashboard and the gateway.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Opaque, immutable lead identifier assigned at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub String);

impl LeadId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LeadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Activity log entry identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

/// The account every data access call is scoped to.
///
/// Resolved once per request from the signed-in user and threaded explicitly
/// into the store, so isolation does not depend on ambient backend state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountContext {
    pub account_id: String,
    pub user_id: String,
}

impl AccountContext {
    pub fn new(account_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Identity returned by the identity provider for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub account_id: String,
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn account(&self) -> AccountContext {
        AccountContext::new(self.account_id.clone(), self.user_id.clone())
    }
}

/// Funnel stage of a lead.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum LeadStatus {
    #[strum(serialize = "New Lead")]
    #[serde(rename = "New Lead")]
    NewLead,
    #[strum(serialize = "Nurturing")]
    Nurturing,
    #[strum(serialize = "Trial Booked")]
    #[serde(rename = "Trial Booked")]
    TrialBooked,
    #[strum(serialize = "Confirmed")]
    Confirmed,
    #[strum(serialize = "Closed")]
    Closed,
}

impl LeadStatus {
    /// Master funnel list, in display order.
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::NewLead,
        LeadStatus::Nurturing,
        LeadStatus::TrialBooked,
        LeadStatus::Confirmed,
        LeadStatus::Closed,
    ];

    /// The display label, e.g. `"Trial Booked"`.
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Parses a stored label, mapping anything outside the master list to `None`.
    pub fn parse_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

/// One sales prospect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub status: Option<LeadStatus>,
    pub source: Option<String>,
    /// RFC 3339 UTC timestamp; the sole sort key (newest first).
    pub created_at: String,
}

/// Fields accepted when creating a lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLead {
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub status: Option<LeadStatus>,
    pub source: Option<String>,
    /// Explicit creation time; the store stamps the current time when `None`.
    pub created_at: Option<String>,
}

/// Fields that may be changed on an existing lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadUpdate {
    pub status: Option<LeadStatus>,
}

/// One activity log entry. Append-only from this system's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: String,
    pub created_at: String,
}

/// Fields accepted when appending an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub event_type: String,
    pub created_at: Option<String>,
}

/// Named read-only aggregate queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AggregateKind {
    /// Lead counts grouped by status.
    #[strum(serialize = "leads_by_status")]
    LeadsByStatus,
    /// Lead counts grouped by source.
    #[strum(serialize = "leads_by_source")]
    LeadsBySource,
}

/// One `{key, count}` row of an aggregate. `key` is `None` for null group values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: Option<String>,
    pub count: u64,
}

impl AggregateRow {
    pub fn new(key: Option<&str>, count: u64) -> Self {
        Self {
            key: key.map(str::to_string),
            count,
        }
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Auth,
    Gateway,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_round_trip() {
        for status in LeadStatus::ALL {
            let label = status.to_string();
            assert_eq!(LeadStatus::parse_label(&label), Some(status));
        }
        assert_eq!(LeadStatus::NewLead.to_string(), "New Lead");
        assert_eq!(LeadStatus::TrialBooked.as_ref(), "Trial Booked");
    }

    #[test]
    fn unknown_status_label_is_none() {
        assert_eq!(LeadStatus::parse_label("Lost"), None);
        assert_eq!(LeadStatus::parse_label("new lead"), None);
        assert_eq!(LeadStatus::parse_label(""), None);
    }

    #[test]
    fn status_serializes_as_label() {
        let json = serde_json::to_string(&LeadStatus::TrialBooked).unwrap();
        assert_eq!(json, "\"Trial Booked\"");
        let parsed: LeadStatus = serde_json::from_str("\"New Lead\"").unwrap();
        assert_eq!(parsed, LeadStatus::NewLead);
    }

    #[test]
    fn lead_with_null_status_deserializes() {
        let json = r#"{
            "id": "l-1",
            "first_name": null,
            "email": "a@b.c",
            "status": null,
            "source": null,
            "created_at": "2026-01-01T00:00:00.000Z"
        }"#;
        let lead: Lead = serde_json::from_str(json).unwrap();
        assert_eq!(lead.id, LeadId("l-1".into()));
        assert!(lead.status.is_none());
    }

    #[test]
    fn identity_yields_account_context() {
        let identity = UserIdentity {
            user_id: "u-1".into(),
            account_id: "acct-1".into(),
            email: None,
        };
        assert_eq!(identity.account(), AccountContext::new("acct-1", "u-1"));
    }

    #[test]
    fn aggregate_kind_names() {
        assert_eq!(AggregateKind::LeadsByStatus.to_string(), "leads_by_status");
        assert_eq!(
            "leads_by_source".parse::<AggregateKind>().unwrap(),
            AggregateKind::LeadsBySource
        );
    }
}
