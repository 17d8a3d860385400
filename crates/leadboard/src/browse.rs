// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leadboard browse`: the leads page on a terminal.
//!
//! Every input line is either a command or the new contents of the search
//! box. Search text goes through the same debounced filter session a page
//! would use, status changes fetch immediately, and each settled result is
//! printed as a table. Mutations invalidate the session, which re-fetches.
//!
//! Commands: `/status <label|all>`, `/set <id> <status>`, `/delete <id>`,
//! `/refresh`, `/quit`. An empty line clears the search.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use leadboard_config::model::LeadboardConfig;
use leadboard_core::{AccountContext, LeadStore, LeadboardError, StatusFilter};
use leadboard_dashboard::{
    FilterInput, FilterSession, FilterState, LeadsFetcher, LeadsSnapshot, LeadsView, Location,
    MutationHandlers, MutationOutcome, ViewInvalidator, views,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::report;

const LEADS_PATH: &str = "/leads";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Status(StatusFilter),
    SetStatus {
        id: Option<String>,
        status: Option<String>,
    },
    Delete {
        id: Option<String>,
    },
    Refresh,
    Quit,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Parses one line. Anything not starting with `/` is search text, kept verbatim.
pub fn parse_line(line: &str) -> Result<BrowseCommand, LeadboardError> {
    let Some(command) = line.strip_prefix('/') else {
        return Ok(BrowseCommand::Search(line.to_string()));
    };
    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "status" => Ok(BrowseCommand::Status(report::parse_status(Some(rest))?)),
        "set" => {
            let (id, status) = rest.split_once(' ').unwrap_or((rest, ""));
            Ok(BrowseCommand::SetStatus {
                id: non_empty(id),
                status: non_empty(status),
            })
        }
        "delete" => Ok(BrowseCommand::Delete { id: non_empty(rest) }),
        "refresh" => Ok(BrowseCommand::Refresh),
        "quit" | "exit" => Ok(BrowseCommand::Quit),
        other => Err(LeadboardError::InvalidInput(format!(
            "unknown command /{other}; expected /status, /set, /delete, /refresh or /quit"
        ))),
    }
}

fn write_err(e: std::io::Error) -> LeadboardError {
    LeadboardError::Internal(format!("failed to write output: {e}"))
}

fn print_snapshot<W: Write>(out: &mut W, snapshot: &LeadsSnapshot) -> Result<(), LeadboardError> {
    writeln!(out, "== {}", snapshot.location).map_err(write_err)?;
    if let LeadsView::Failed { error } = &snapshot.view {
        writeln!(out, "error: {error}").map_err(write_err)?;
    }
    let rows = views::lead_rows(snapshot.view.rows());
    write!(out, "{}", report::render_lead_rows(&rows)).map_err(write_err)
}

fn print_outcome<W: Write>(
    out: &mut W,
    outcome: Result<MutationOutcome, LeadboardError>,
) -> Result<(), LeadboardError> {
    let written = match outcome {
        Ok(MutationOutcome::Applied { rows }) => writeln!(out, "ok: {rows} row(s) changed"),
        Ok(MutationOutcome::Skipped) => writeln!(out, "skipped: missing or invalid input"),
        Err(e) => writeln!(out, "error: {e}"),
    };
    written.map_err(write_err)
}

/// Drives one filter session from `input` until EOF or `/quit`.
pub async fn run_browse<R, W>(
    store: Arc<dyn LeadStore>,
    config: &LeadboardConfig,
    account: AccountContext,
    initial: FilterState,
    input: R,
    out: &mut W,
) -> Result<(), LeadboardError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let invalidator = ViewInvalidator::new();
    let mutations = MutationHandlers::new(Arc::clone(&store), invalidator.clone());
    let fetcher = LeadsFetcher::new(store, config.leads.search_precedence);
    let location = Location::new(LEADS_PATH).with_filter(&initial);
    let quiet = Duration::from_millis(config.leads.debounce_ms);

    info!(account = %account.account_id, debounce_ms = config.leads.debounce_ms, "browse session started");
    let session = FilterSession::spawn(fetcher, account.clone(), location, quiet, &invalidator);
    let result = drive(&session, &mutations, &account, input, out).await;
    session.shutdown().await;
    result
}

async fn drive<R, W>(
    session: &FilterSession,
    mutations: &MutationHandlers,
    account: &AccountContext,
    input: R,
    out: &mut W,
) -> Result<(), LeadboardError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut snapshots = session.subscribe();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = line.map_err(|e| {
                    LeadboardError::Internal(format!("failed to read input: {e}"))
                })?;
                let Some(line) = line else { break };
                let command = match parse_line(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        writeln!(out, "error: {e}").map_err(write_err)?;
                        continue;
                    }
                };
                debug!(?command, "browse input");
                match command {
                    BrowseCommand::Quit => break,
                    BrowseCommand::Search(text) => session.send(FilterInput::SearchText(text)).await?,
                    BrowseCommand::Status(status) => session.send(FilterInput::StatusSelected(status)).await?,
                    BrowseCommand::Refresh => session.send(FilterInput::Refresh).await?,
                    BrowseCommand::SetStatus { id, status } => {
                        let outcome = mutations
                            .set_status(account, id.as_deref(), status.as_deref())
                            .await;
                        print_outcome(out, outcome)?;
                    }
                    BrowseCommand::Delete { id } => {
                        let outcome = mutations.delete_lead(account, id.as_deref()).await;
                        print_outcome(out, outcome)?;
                    }
                }
            }

            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if !snapshot.loading {
                    print_snapshot(out, &snapshot)?;
                }
            }
        }
    }
    Ok(())
}
