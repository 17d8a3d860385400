// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Leadboard.
//!
//! This crate provides the error type, the lead and event domain types, the
//! lead query builder and the adapter traits every backend implements.

pub mod error;
pub mod query;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LeadboardError;
pub use query::{
    ALL_STATUSES, LeadQuery, Predicate, SearchPrecedence, SortOrder, StatusFilter, TextField,
    build_lead_query,
};
pub use types::{
    AccountContext, AdapterType, AggregateKind, AggregateRow, Event, EventId, HealthStatus, Lead,
    LeadId, LeadStatus, LeadUpdate, NewEvent, NewLead, UserIdentity,
};

pub use traits::{AuthAdapter, LeadStore, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leadboard_error_has_all_variants() {
        let _config = LeadboardError::Config("test".into());
        let _storage = LeadboardError::storage(std::io::Error::other("test"));
        let _auth = LeadboardError::Auth("test".into());
        let _gateway = LeadboardError::Gateway {
            message: "test".into(),
            source: None,
        };
        let _invalid = LeadboardError::InvalidInput("test".into());
        let _internal = LeadboardError::Internal("test".into());
    }

    #[test]
    fn storage_error_displays_source() {
        let err = LeadboardError::storage(std::io::Error::other("disk gone"));
        assert_eq!(err.to_string(), "storage error: disk gone");
    }

    #[test]
    fn adapter_type_round_trips() {
        use std::str::FromStr;

        for variant in [AdapterType::Storage, AdapterType::Auth, AdapterType::Gateway] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn health_status_variants() {
        assert_eq!(HealthStatus::Healthy, HealthStatus::Healthy);
        assert_ne!(HealthStatus::Degraded("slow".into()), HealthStatus::Healthy);
        assert_ne!(HealthStatus::Unhealthy("down".into()), HealthStatus::Healthy);
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_lead_store<T: LeadStore>() {}
        fn _assert_auth_adapter<T: AuthAdapter>() {}
    }
}
