// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead reads and mutations.

use leadboard_core::{
    AccountContext, Lead, LeadId, LeadQuery, LeadStatus, LeadUpdate, LeadboardError, NewLead,
    Predicate, SortOrder,
};
use rusqlite::params;
use rusqlite::types::Value;

use crate::database::{Database, LOWER_FN, map_tr_err};

const LEAD_COLUMNS: &str = "id, first_name, email, status, source, created_at";

/// Escapes `\`, `%` and `_` so a search prefix is matched literally by `LIKE ... ESCAPE '\'`.
pub fn escape_like(prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Renders a predicate tree to a parenthesized SQL condition, pushing bound
/// values onto `params` in placeholder order.
pub fn render_predicate(predicate: &Predicate, params: &mut Vec<Value>) -> String {
    match predicate {
        Predicate::True => "(1 = 1)".to_string(),
        Predicate::StatusEq(status) => {
            params.push(Value::Text(status.label().to_string()));
            "(status = ?)".to_string()
        }
        Predicate::IPrefix { field, prefix } => {
            params.push(Value::Text(format!("{}%", escape_like(prefix))));
            format!(
                "({LOWER_FN}({}) LIKE {LOWER_FN}(?) ESCAPE '\\')",
                field.column()
            )
        }
        Predicate::And(lhs, rhs) => {
            let lhs = render_predicate(lhs, params);
            let rhs = render_predicate(rhs, params);
            format!("({lhs} AND {rhs})")
        }
        Predicate::Or(lhs, rhs) => {
            let lhs = render_predicate(lhs, params);
            let rhs = render_predicate(rhs, params);
            format!("({lhs} OR {rhs})")
        }
    }
}

/// Builds the complete SELECT for `query`, scoped to `account_id`.
pub fn select_sql(account_id: &str, query: &LeadQuery) -> (String, Vec<Value>) {
    let mut params = vec![Value::Text(account_id.to_string())];
    let condition = render_predicate(&query.predicate, &mut params);
    let order = match query.order {
        SortOrder::CreatedAtDesc => "created_at DESC, id DESC",
    };
    let mut sql =
        format!("SELECT {LEAD_COLUMNS} FROM leads WHERE account_id = ? AND {condition} ORDER BY {order}");
    if let Some(limit) = query.limit {
        sql.push_str(" LIMIT ?");
        params.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
    }
    (sql, params)
}

fn lead_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Lead> {
    let status: Option<String> = row.get(3)?;
    Ok(Lead {
        id: LeadId(row.get(0)?),
        first_name: row.get(1)?,
        email: row.get(2)?,
        status: status.as_deref().and_then(LeadStatus::parse_label),
        source: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Returns the leads of one account matching `query`.
pub async fn query_leads(
    db: &Database,
    account: &AccountContext,
    query: &LeadQuery,
) -> Result<Vec<Lead>, LeadboardError> {
    let (sql, values) = select_sql(&account.account_id, query);
    db.connection()
        .call(move |conn| -> Result<Vec<Lead>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(values.iter()), lead_from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Inserts a lead with a fresh UUID and returns the stored row.
pub async fn insert_lead(
    db: &Database,
    account: &AccountContext,
    lead: &NewLead,
) -> Result<Lead, LeadboardError> {
    let id = uuid::Uuid::new_v4().to_string();
    let account_id = account.account_id.clone();
    let lead = lead.clone();
    db.connection()
        .call(move |conn| -> Result<Lead, rusqlite::Error> {
            conn.query_row(
                &format!(
                    "INSERT INTO leads (id, account_id, first_name, email, status, source, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, COALESCE(?7, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')))
                     RETURNING {LEAD_COLUMNS}"
                ),
                params![
                    id,
                    account_id,
                    lead.first_name,
                    lead.email,
                    lead.status.map(LeadStatus::label),
                    lead.source,
                    lead.created_at,
                ],
                lead_from_row,
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Applies `update` to one lead of the account. Returns rows changed.
pub async fn update_lead(
    db: &Database,
    account: &AccountContext,
    id: &LeadId,
    update: &LeadUpdate,
) -> Result<u64, LeadboardError> {
    let account_id = account.account_id.clone();
    let id = id.0.clone();
    let status = update.status.map(LeadStatus::label);
    db.connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "UPDATE leads SET status = COALESCE(?1, status) WHERE id = ?2 AND account_id = ?3",
                params![status, id, account_id],
            )
        })
        .await
        .map(|n| n as u64)
        .map_err(map_tr_err)
}

/// Deletes one lead of the account. Returns rows removed.
pub async fn delete_lead(
    db: &Database,
    account: &AccountContext,
    id: &LeadId,
) -> Result<u64, LeadboardError> {
    let account_id = account.account_id.clone();
    let id = id.0.clone();
    db.connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "DELETE FROM leads WHERE id = ?1 AND account_id = ?2",
                params![id, account_id],
            )
        })
        .await
        .map(|n| n as u64)
        .map_err(map_tr_err)
}
