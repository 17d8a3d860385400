// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead query construction.
//!
//! Maps the user-facing `(search text, status filter)` pair onto a backend
//! predicate tree. The tree is evaluated in memory by [`Predicate::matches`]
//! and rendered to SQL by the storage crate, so both backends agree on the
//! exact same semantics.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::trace;

use crate::types::{Lead, LeadStatus};

/// The literal used in URLs and forms for "no status constraint".
pub const ALL_STATUSES: &str = "all";

/// Status constraint selected in the filter UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(LeadStatus),
}

impl StatusFilter {
    /// Parses `"all"` or one of the five status labels.
    pub fn parse(value: &str) -> Option<Self> {
        if value == ALL_STATUSES {
            return Some(Self::All);
        }
        LeadStatus::parse_label(value).map(Self::Only)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => ALL_STATUSES,
            Self::Only(status) => status.label(),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown status filter `{raw}`")))
    }
}

/// Text columns that support case-insensitive prefix search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    FirstName,
    Email,
}

impl TextField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::Email => "email",
        }
    }

    fn value<'a>(&self, lead: &'a Lead) -> Option<&'a str> {
        match self {
            Self::FirstName => lead.first_name.as_deref(),
            Self::Email => lead.email.as_deref(),
        }
    }
}

/// Backend filter predicate over lead rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Matches every row.
    True,
    /// `status = <status>`; null statuses never match.
    StatusEq(LeadStatus),
    /// `<field> ILIKE '<prefix>%'`; null fields never match.
    IPrefix { field: TextField, prefix: String },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    /// Evaluates the predicate against a single row.
    pub fn matches(&self, lead: &Lead) -> bool {
        match self {
            Predicate::True => true,
            Predicate::StatusEq(status) => lead.status == Some(*status),
            Predicate::IPrefix { field, prefix } => field
                .value(lead)
                .is_some_and(|value| starts_with_ignore_case(value, prefix)),
            Predicate::And(lhs, rhs) => lhs.matches(lead) && rhs.matches(lead),
            Predicate::Or(lhs, rhs) => lhs.matches(lead) || rhs.matches(lead),
        }
    }
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value.to_lowercase().starts_with(&prefix.to_lowercase())
}

/// How the status constraint combines with the search branches when both are set.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SearchPrecedence {
    /// `(status = S AND first_name ILIKE q%) OR email ILIKE q%`.
    ///
    /// Email matches ignore the status filter. This is the shipped behavior.
    #[default]
    Legacy,
    /// `status = S AND (first_name ILIKE q% OR email ILIKE q%)`.
    Grouped,
}

/// Row ordering. Leads are only ever listed newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    CreatedAtDesc,
}

/// A complete lead query: predicate, order and optional row cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadQuery {
    pub predicate: Predicate,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

impl LeadQuery {
    /// All rows, newest first.
    pub fn all() -> Self {
        Self {
            predicate: Predicate::True,
            order: SortOrder::CreatedAtDesc,
            limit: None,
        }
    }

    /// The `n` most recent rows.
    pub fn recent(n: usize) -> Self {
        Self {
            limit: Some(n),
            ..Self::all()
        }
    }

    /// Applies this query to in-memory rows: filter, sort newest first, cap.
    pub fn apply<'a, I>(&self, rows: I) -> Vec<Lead>
    where
        I: IntoIterator<Item = &'a Lead>,
    {
        let mut out: Vec<Lead> = rows
            .into_iter()
            .filter(|lead| self.predicate.matches(lead))
            .cloned()
            .collect();
        sort_newest_first(&mut out);
        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

/// Sorts by `created_at` descending, breaking ties by id descending.
pub fn sort_newest_first(leads: &mut [Lead]) {
    leads.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

fn search_branches(query: &str) -> Predicate {
    Predicate::IPrefix {
        field: TextField::FirstName,
        prefix: query.to_string(),
    }
    .or(Predicate::IPrefix {
        field: TextField::Email,
        prefix: query.to_string(),
    })
}

/// Builds the lead query for a search text and status filter.
///
/// Empty search text means no text constraint. Any other text, whitespace
/// included, is matched verbatim as a prefix.
pub fn build_lead_query(
    query: &str,
    status: &StatusFilter,
    precedence: SearchPrecedence,
) -> LeadQuery {
    let has_query = !query.is_empty();

    let predicate = match (has_query, status) {
        (true, StatusFilter::Only(status)) => match precedence {
            SearchPrecedence::Legacy => {
                let first_name = Predicate::IPrefix {
                    field: TextField::FirstName,
                    prefix: query.to_string(),
                };
                let email = Predicate::IPrefix {
                    field: TextField::Email,
                    prefix: query.to_string(),
                };
                Predicate::StatusEq(*status).and(first_name).or(email)
            }
            SearchPrecedence::Grouped => Predicate::StatusEq(*status).and(search_branches(query)),
        },
        (true, StatusFilter::All) => search_branches(query),
        (false, StatusFilter::Only(status)) => Predicate::StatusEq(*status),
        (false, StatusFilter::All) => Predicate::True,
    };

    trace!(query, status = %status, ?precedence, "built lead query");

    LeadQuery {
        predicate,
        order: SortOrder::CreatedAtDesc,
        limit: None,
    }
}
