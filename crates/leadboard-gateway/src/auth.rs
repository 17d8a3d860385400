// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session authentication for the gateway.
//!
//! Credentials are read from (in order):
//! 1. `Authorization: Bearer <token>`
//! 2. the session cookie
//!
//! Requests without a signed-in user are redirected to the login page. The
//! resolved [`AccountContext`] is stored in the request extensions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use leadboard_config::model::AuthConfig;
use leadboard_core::{
    AdapterType, AuthAdapter, HealthStatus, LeadboardError, PluginAdapter, UserIdentity,
};

use crate::handlers::ErrorResponse;

/// Identity provider backed by the configured session tokens.
pub struct StaticTokenAuth {
    users: HashMap<String, UserIdentity>,
}

impl StaticTokenAuth {
    pub fn from_config(config: &AuthConfig) -> Self {
        let users = config
            .accounts
            .iter()
            .map(|account| {
                (
                    account.token.clone(),
                    UserIdentity {
                        user_id: account.user_id.clone(),
                        account_id: account.account_id.clone(),
                        email: account.email.clone(),
                    },
                )
            })
            .collect();
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl std::fmt::Debug for StaticTokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenAuth")
            .field("tokens", &self.users.len())
            .finish()
    }
}

#[async_trait]
impl PluginAdapter for StaticTokenAuth {
    fn name(&self) -> &str {
        "static-token"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Auth
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadboardError> {
        if self.users.is_empty() {
            Ok(HealthStatus::Degraded("no session tokens configured".into()))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }

    async fn shutdown(&self) -> Result<(), LeadboardError> {
        Ok(())
    }
}

#[async_trait]
impl AuthAdapter for StaticTokenAuth {
    async fn current_user(&self, credential: &str) -> Result<Option<UserIdentity>, LeadboardError> {
        Ok(self.users.get(credential).cloned())
    }
}

/// State for [`auth_middleware`].
#[derive(Clone)]
pub struct AuthGate {
    pub adapter: Arc<dyn AuthAdapter>,
    pub session_cookie: String,
    pub login_url: String,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("adapter", &self.adapter.name())
            .field("session_cookie", &self.session_cookie)
            .field("login_url", &self.login_url)
            .finish()
    }
}

/// Extracts the session credential from the request headers.
pub fn credential_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Resolves the signed-in user; redirects to the login page when there is none.
pub async fn auth_middleware(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(credential) = credential_from_headers(request.headers(), &gate.session_cookie) else {
        tracing::debug!(path = %request.uri().path(), "no session credential, redirecting to login");
        return Redirect::to(&gate.login_url).into_response();
    };

    match gate.adapter.current_user(&credential).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user.account());
            next.run(request).await
        }
        Ok(None) => {
            tracing::debug!(path = %request.uri().path(), "unknown session, redirecting to login");
            Redirect::to(&gate.login_url).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "identity provider failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "identity provider unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use leadboard_config::model::AccountConfig;

    fn config() -> AuthConfig {
        AuthConfig {
            session_cookie: "leadboard_session".into(),
            accounts: vec![AccountConfig {
                token: "tok-1".into(),
                account_id: "acct-1".into(),
                user_id: "u-1".into(),
                email: None,
            }],
        }
    }

    #[tokio::test]
    async fn static_tokens_resolve_users() {
        let auth = StaticTokenAuth::from_config(&config());
        let user = auth.current_user("tok-1").await.unwrap().unwrap();
        assert_eq!(user.account().account_id, "acct-1");
        assert!(auth.current_user("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_token_table_is_degraded() {
        let auth = StaticTokenAuth::from_config(&AuthConfig::default());
        assert!(auth.is_empty());
        assert!(matches!(
            auth.health_check().await.unwrap(),
            HealthStatus::Degraded(_)
        ));
    }

    #[test]
    fn bearer_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("leadboard_session=xyz"));
        assert_eq!(
            credential_from_headers(&headers, "leadboard_session").as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; leadboard_session=xyz; other=1"),
        );
        assert_eq!(
            credential_from_headers(&headers, "leadboard_session").as_deref(),
            Some("xyz")
        );
        assert!(credential_from_headers(&headers, "missing").is_none());
    }

    #[test]
    fn empty_credentials_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        headers.insert(header::COOKIE, HeaderValue::from_static("leadboard_session="));
        assert!(credential_from_headers(&headers, "leadboard_session").is_none());
    }

    #[test]
    fn debug_redacts_tokens() {
        let auth = StaticTokenAuth::from_config(&config());
        let out = format!("{auth:?}");
        assert!(!out.contains("tok-1"));
        assert!(out.contains("tokens: 1"));
    }
}
