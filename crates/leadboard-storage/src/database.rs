// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All statements are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional `Connection` instances for writes.

use std::path::Path;
use std::time::Duration;

use leadboard_core::LeadboardError;
use rusqlite::functions::FunctionFlags;
use tracing::{debug, info};

use crate::migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQL scalar that lowercases text with full Unicode case mapping.
///
/// SQLite's own `lower()` and `LIKE` only fold ASCII letters.
pub const LOWER_FN: &str = "lb_lower";

fn register_functions(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.create_scalar_function(
        LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )
}

/// Handle to the single SQLite connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and runs pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, LeadboardError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(LeadboardError::storage)?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(LeadboardError::storage)?;

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                let mode: String = conn.pragma_update_and_check(
                    None,
                    "journal_mode",
                    "WAL",
                    |row| row.get(0),
                )?;
                debug!(journal_mode = %mode, "journal mode set");
            }
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.busy_timeout(BUSY_TIMEOUT)?;
            register_functions(conn)
        })
        .await
        .map_err(map_tr_err)?;

        let db = Self { conn };
        db.migrate().await?;
        info!(path, wal_mode, "database opened");
        Ok(db)
    }

    /// Opens a private in-memory database with the schema applied.
    pub async fn open_in_memory() -> Result<Self, LeadboardError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(LeadboardError::storage)?;
        conn.call(|conn| register_functions(conn))
            .await
            .map_err(map_tr_err)?;
        let db = Self { conn };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<(), LeadboardError> {
        self.conn
            .call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(LeadboardError::storage)
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoints the WAL so the main database file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), LeadboardError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    /// Checkpoints and closes the connection.
    pub async fn close(self) -> Result<(), LeadboardError> {
        self.checkpoint().await?;
        self.conn.close().await.map_err(LeadboardError::storage)
    }
}

/// Converts a tokio-rusqlite error into the crate-wide error type.
pub(crate) fn map_tr_err(err: tokio_rusqlite::Error<rusqlite::Error>) -> LeadboardError {
    LeadboardError::storage(err)
}
