// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Form-style lead mutations.
//!
//! Inputs arrive as optional strings straight from a submitted form. Missing
//! or empty fields make the handler a no-op; values are used as submitted. Any call that reaches the store
//! invalidates the leads and dashboard views afterwards, whether or not the
//! store call succeeded.

use std::sync::Arc;

use leadboard_core::{AccountContext, LeadId, LeadStatus, LeadStore, LeadUpdate, LeadboardError};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::invalidation::{ViewInvalidator, ViewKind};

const INVALIDATED_VIEWS: [ViewKind; 2] = [ViewKind::Leads, ViewKind::Dashboard];

/// Result of a mutation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MutationOutcome {
    /// The store was called; `rows` is 0 when the id matched nothing.
    Applied { rows: u64 },
    /// Inputs were missing or invalid; the store was not called.
    Skipped,
}

#[derive(Clone)]
pub struct MutationHandlers {
    store: Arc<dyn LeadStore>,
    invalidator: ViewInvalidator,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl MutationHandlers {
    pub fn new(store: Arc<dyn LeadStore>, invalidator: ViewInvalidator) -> Self {
        Self { store, invalidator }
    }

    /// Moves a lead to another funnel stage.
    pub async fn set_status(
        &self,
        account: &AccountContext,
        id: Option<&str>,
        status: Option<&str>,
    ) -> Result<MutationOutcome, LeadboardError> {
        let (Some(id), Some(raw_status)) = (present(id), present(status)) else {
            return Ok(MutationOutcome::Skipped);
        };
        let Some(status) = LeadStatus::parse_label(raw_status) else {
            warn!(account = %account.account_id, id, status = raw_status, "rejecting unknown lead status");
            return Ok(MutationOutcome::Skipped);
        };

        let id = LeadId(id.to_string());
        let update = LeadUpdate {
            status: Some(status),
        };
        let result = self.store.update_lead(account, &id, &update).await;
        self.finish(account, "update_lead_status", &id, result)
    }

    /// Removes a lead.
    pub async fn delete_lead(
        &self,
        account: &AccountContext,
        id: Option<&str>,
    ) -> Result<MutationOutcome, LeadboardError> {
        let Some(id) = present(id) else {
            return Ok(MutationOutcome::Skipped);
        };
        let id = LeadId(id.to_string());
        let result = self.store.delete_lead(account, &id).await;
        self.finish(account, "delete_lead", &id, result)
    }

    fn finish(
        &self,
        account: &AccountContext,
        action: &str,
        id: &LeadId,
        result: Result<u64, LeadboardError>,
    ) -> Result<MutationOutcome, LeadboardError> {
        self.invalidator
            .invalidate(&account.account_id, &INVALIDATED_VIEWS);
        match result {
            Ok(rows) => {
                info!(account = %account.account_id, action, id = %id, rows, "lead mutation applied");
                Ok(MutationOutcome::Applied { rows })
            }
            Err(e) => {
                error!(account = %account.account_id, action, id = %id, error = %e, "lead mutation failed");
                Err(e)
            }
        }
    }
}
