// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Leadboard.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use leadboard_core::SearchPrecedence;
use serde::{Deserialize, Serialize};

/// Top-level Leadboard configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeadboardConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Identity provider settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Lead search and filter behavior.
    #[serde(default)]
    pub leads: LeadsConfig,

    /// Dashboard summary sizes.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name shown in page headers.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "Leadboard".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Where unauthenticated page requests are redirected.
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            login_url: default_login_url(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_login_url() -> String {
    "/auth/login".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("leadboard").join("leadboard.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("leadboard.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Identity provider configuration.
///
/// Session tokens are issued by the external login flow; this table maps each
/// token to the user and account it belongs to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    /// Known session tokens.
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie: default_session_cookie(),
            accounts: Vec::new(),
        }
    }
}

fn default_session_cookie() -> String {
    "leadboard_session".to_string()
}

/// One session token and the identity behind it.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    /// Opaque session token.
    pub token: String,

    /// Account whose rows this user may see.
    pub account_id: String,

    /// User identifier.
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Contact address, informational only.
    #[serde(default)]
    pub email: Option<String>,
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("token", &"[redacted]")
            .field("account_id", &self.account_id)
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .finish()
    }
}

fn default_user_id() -> String {
    "owner".to_string()
}

/// Lead search and filter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeadsConfig {
    /// Quiet period before search text is applied, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// How a status filter combines with search text.
    #[serde(default)]
    pub search_precedence: SearchPrecedence,
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            search_precedence: SearchPrecedence::default(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

/// Dashboard summary configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Number of leads in the "Recent Leads" card.
    #[serde(default = "default_recent_leads_limit")]
    pub recent_leads_limit: usize,

    /// Number of events in the dashboard activity card.
    #[serde(default = "default_activity_summary_limit")]
    pub activity_summary_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_leads_limit: default_recent_leads_limit(),
            activity_summary_limit: default_activity_summary_limit(),
        }
    }
}

fn default_recent_leads_limit() -> usize {
    5
}

fn default_activity_summary_limit() -> usize {
    10
}
