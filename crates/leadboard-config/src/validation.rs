// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde attributes cannot express: non-empty paths,
//! bounded timings, unique session tokens.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::LeadboardConfig;

/// Longest accepted search debounce, in milliseconds.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &LeadboardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::validation("server.host must not be empty"));
    } else {
        let is_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_ip && !is_hostname {
            errors.push(ConfigError::validation(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    let login_url = config.server.login_url.as_str();
    if !(login_url.starts_with('/') || login_url.starts_with("http")) {
        errors.push(ConfigError::validation(format!(
            "server.login_url `{login_url}` must be an absolute path or an http(s) URL"
        )));
    }

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "app.log_level must be one of {}, got `{}`",
            LOG_LEVELS.join(", "),
            config.app.log_level
        )));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    if config.auth.session_cookie.trim().is_empty() {
        errors.push(ConfigError::validation(
            "auth.session_cookie must not be empty",
        ));
    }

    let mut seen_tokens = HashSet::new();
    for (index, account) in config.auth.accounts.iter().enumerate() {
        if account.token.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "auth.accounts[{index}].token must not be empty"
            )));
        } else if !seen_tokens.insert(account.token.as_str()) {
            errors.push(ConfigError::validation(format!(
                "auth.accounts[{index}].token duplicates an earlier entry"
            )));
        }
        if account.account_id.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "auth.accounts[{index}].account_id must not be empty"
            )));
        }
    }

    let debounce = config.leads.debounce_ms;
    if debounce == 0 || debounce > MAX_DEBOUNCE_MS {
        errors.push(ConfigError::validation(format!(
            "leads.debounce_ms must be between 1 and {MAX_DEBOUNCE_MS}, got {debounce}"
        )));
    }

    if config.dashboard.recent_leads_limit == 0 {
        errors.push(ConfigError::validation(
            "dashboard.recent_leads_limit must be greater than 0",
        ));
    }

    if config.dashboard.activity_summary_limit == 0 {
        errors.push(ConfigError::validation(
            "dashboard.activity_summary_limit must be greater than 0",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
