// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Leadboard configuration system.

use leadboard_config::diagnostic::ConfigError;
use leadboard_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use leadboard_core::SearchPrecedence;

#[test]
fn full_config_deserializes() {
    let toml = r#"
[app]
name = "Studio Leads"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080
login_url = "https://id.example.com/login"

[storage]
database_path = "/tmp/leads.db"
wal_mode = false

[auth]
session_cookie = "sid"

[[auth.accounts]]
token = "tok-a"
account_id = "studio-a"
user_id = "alice"

[leads]
debounce_ms = 250
search_precedence = "grouped"

[dashboard]
recent_leads_limit = 8
activity_summary_limit = 20
"#;

    let config = load_and_validate_str(toml).expect("valid config");
    assert_eq!(config.app.name, "Studio Leads");
    assert_eq!(config.server.port, 8080);
    assert!(!config.storage.wal_mode);
    assert_eq!(config.auth.session_cookie, "sid");
    assert_eq!(config.auth.accounts[0].account_id, "studio-a");
    assert_eq!(config.leads.debounce_ms, 250);
    assert_eq!(config.leads.search_precedence, SearchPrecedence::Grouped);
    assert_eq!(config.dashboard.recent_leads_limit, 8);
    assert_eq!(config.dashboard.activity_summary_limit, 20);
}

#[test]
fn empty_config_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.app.name, "Leadboard");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.auth.session_cookie, "leadboard_session");
    assert_eq!(config.leads.debounce_ms, 300);
    assert!(config.storage.wal_mode);
}

#[test]
fn unknown_key_yields_suggestion() {
    let toml = r#"
[leads]
debounse_ms = 100
"#;
    let errors = load_and_validate_str(toml).expect_err("typo should be rejected");
    let found = errors.iter().any(|e| match e {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => key == "debounse_ms" && suggestion.as_deref() == Some("debounce_ms"),
        _ => false,
    });
    assert!(found, "expected unknown-key diagnostic, got {errors:?}");
}

#[test]
fn unknown_section_rejected() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn wrong_type_rejected() {
    let toml = r#"
[server]
port = "eighty"
"#;
    let errors = load_and_validate_str(toml).expect_err("string port should be rejected");
    assert!(!errors.is_empty());
}

#[test]
fn unknown_precedence_rejected() {
    let toml = r#"
[leads]
search_precedence = "sideways"
"#;
    assert!(load_and_validate_str(toml).is_err());
}

#[test]
fn validation_errors_surface_after_parse() {
    let toml = r#"
[leads]
debounce_ms = 0

[dashboard]
recent_leads_limit = 0
"#;
    let errors = load_and_validate_str(toml).expect_err("invalid values");
    assert_eq!(errors.len(), 2);
    assert!(
        errors
            .iter()
            .all(|e| matches!(e, ConfigError::Validation { .. }))
    );
}

#[test]
fn explicit_path_loads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leadboard.toml");
    std::fs::write(
        &path,
        r#"
[storage]
database_path = "/var/lib/leadboard/leads.db"
"#,
    )
    .unwrap();

    let config = load_and_validate_path(&path).expect("valid file");
    assert_eq!(config.storage.database_path, "/var/lib/leadboard/leads.db");
}

#[test]
fn explicit_path_unknown_key_points_into_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leadboard.toml");
    std::fs::write(&path, "[server]\nhots = \"0.0.0.0\"\n").unwrap();

    let errors = load_and_validate_path(&path).expect_err("typo should be rejected");
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "hots");
            assert_eq!(suggestion.as_deref(), Some("host"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
