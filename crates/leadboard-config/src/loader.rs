// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./leadboard.toml` > `~/.config/leadboard/leadboard.toml` >
//! `/etc/leadboard/leadboard.toml` with environment variable overrides via `LEADBOARD_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LeadboardConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/leadboard/leadboard.toml";

/// Local configuration file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "leadboard.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/leadboard/leadboard.toml` (system-wide)
/// 3. `~/.config/leadboard/leadboard.toml` (user XDG config)
/// 4. `./leadboard.toml` (local directory)
/// 5. `LEADBOARD_*` environment variables
pub fn load_config() -> Result<LeadboardConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LeadboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadboardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LeadboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadboardConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LeadboardConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/leadboard/leadboard.toml`, when a config dir exists.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("leadboard").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `LEADBOARD_STORAGE_DATABASE_PATH` must map to
/// `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("LEADBOARD_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = ["app_", "server_", "storage_", "auth_", "leads_", "dashboard_"]
            .iter()
            .find(|section| key_str.starts_with(*section))
            .map(|section| {
                let name = section.trim_end_matches('_');
                format!("{name}.{}", &key_str[section.len()..])
            })
            .unwrap_or_else(|| key_str.clone());
        mapped.into()
    })
}
