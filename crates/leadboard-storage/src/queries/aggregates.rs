// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named read-only aggregates over leads.

use leadboard_core::{AccountContext, AggregateKind, AggregateRow, LeadboardError};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Grouped column for an aggregate. Only fixed identifiers ever reach the SQL.
fn group_column(kind: AggregateKind) -> &'static str {
    match kind {
        AggregateKind::LeadsByStatus => "status",
        AggregateKind::LeadsBySource => "source",
    }
}

/// Counts the account's leads per group, largest group first.
pub async fn aggregate(
    db: &Database,
    account: &AccountContext,
    kind: AggregateKind,
) -> Result<Vec<AggregateRow>, LeadboardError> {
    let column = group_column(kind);
    let sql = format!(
        "SELECT {column}, COUNT(*) AS n FROM leads
         WHERE account_id = ?1
         GROUP BY {column}
         ORDER BY n DESC, {column} ASC"
    );
    let account_id = account.account_id.clone();
    db.connection()
        .call(move |conn| -> Result<Vec<AggregateRow>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![account_id], |row| {
                let count: i64 = row.get(1)?;
                Ok(AggregateRow {
                    key: row.get(0)?,
                    count: u64::try_from(count).unwrap_or(0),
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}
