// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Leadboard.

use thiserror::Error;

/// The primary error type used across all Leadboard adapter traits and core operations.
#[derive(Debug, Error)]
pub enum LeadboardError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Data access errors (database connection, query failure, row decoding).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Identity provider errors. Absence of a user is not an error.
    #[error("auth error: {0}")]
    Auth(String),

    /// HTTP surface errors (bind failure, server crash).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Caller supplied a value outside the accepted domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LeadboardError {
    /// Wraps any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            source: Box::new(err),
        }
    }
}
