// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations using refinery.
//!
//! The SQL files under `migrations/` are compiled into the binary and applied
//! whenever a [`Database`](crate::Database) is opened.

use tracing::debug;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Runs all pending migrations against `conn`.
///
/// Refinery records applied versions in `refinery_schema_history`.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), refinery::Error> {
    let report = embedded::migrations::runner().run(conn)?;
    debug!(
        applied = report.applied_migrations().len(),
        "schema migrations complete"
    );
    Ok(())
}
