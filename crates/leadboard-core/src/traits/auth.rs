// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity provider adapter.

use async_trait::async_trait;

use crate::error::LeadboardError;
use crate::traits::adapter::PluginAdapter;
use crate::types::UserIdentity;

/// Resolves the signed-in user from a session credential.
#[async_trait]
pub trait AuthAdapter: PluginAdapter {
    /// Returns the user the credential belongs to, or `None` when nobody is
    /// signed in. `Err` is reserved for provider failures.
    async fn current_user(&self, credential: &str) -> Result<Option<UserIdentity>, LeadboardError>;
}
