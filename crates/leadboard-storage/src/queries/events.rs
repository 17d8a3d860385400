// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Activity log reads and appends.

use leadboard_core::{AccountContext, Event, EventId, LeadboardError, NewEvent};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

fn event_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: EventId(row.get(0)?),
        event_type: row.get(1)?,
        created_at: row.get(2)?,
    })
}

/// Returns the account's events newest first. `None` means no cap.
pub async fn query_events(
    db: &Database,
    account: &AccountContext,
    limit: Option<usize>,
) -> Result<Vec<Event>, LeadboardError> {
    let account_id = account.account_id.clone();
    // SQLite treats a negative LIMIT as unbounded.
    let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
    db.connection()
        .call(move |conn| -> Result<Vec<Event>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, event_type, created_at FROM events
                 WHERE account_id = ?1
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![account_id, limit], event_from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Appends one event and returns the stored row.
pub async fn append_event(
    db: &Database,
    account: &AccountContext,
    event: &NewEvent,
) -> Result<Event, LeadboardError> {
    let id = uuid::Uuid::new_v4().to_string();
    let account_id = account.account_id.clone();
    let event = event.clone();
    db.connection()
        .call(move |conn| -> Result<Event, rusqlite::Error> {
            conn.query_row(
                "INSERT INTO events (id, account_id, event_type, created_at)
                 VALUES (?1, ?2, ?3, COALESCE(?4, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')))
                 RETURNING id, event_type, created_at",
                params![id, account_id, event.event_type, event.created_at],
                event_from_row,
            )
        })
        .await
        .map_err(map_tr_err)
}
