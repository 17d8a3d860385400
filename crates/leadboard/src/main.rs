// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Leadboard - lead management dashboard.
//!
//! This is the binary entry point: the HTTP server plus a handful of
//! terminal commands over the same store.

mod browse;
mod report;
mod seed;
mod serve;
mod shutdown;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use leadboard_config::model::LeadboardConfig;
use leadboard_core::{AccountContext, LeadboardError, PluginAdapter};
use leadboard_dashboard::FilterState;

/// Leadboard - lead management dashboard.
#[derive(Parser, Debug)]
#[command(name = "leadboard", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// List leads matching a search and status filter.
    Leads {
        #[arg(long)]
        account: String,
        /// Name or email prefix.
        #[arg(long, default_value = "")]
        q: String,
        /// "all" or one of the funnel statuses.
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Filter leads interactively: type to search, `/status`, `/set`, `/delete`, `/quit`.
    Browse {
        #[arg(long)]
        account: String,
        /// Initial search text.
        #[arg(long, default_value = "")]
        q: String,
        /// Initial status filter.
        #[arg(long)]
        status: Option<String>,
    },
    /// Show the dashboard summary.
    Stats {
        #[arg(long)]
        account: String,
        #[arg(long)]
        json: bool,
    },
    /// Show the activity log.
    Activity {
        #[arg(long)]
        account: String,
        /// Show every entry instead of the dashboard summary.
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// Insert demo leads and events for an account.
    Seed {
        #[arg(long)]
        account: String,
    },
    /// Validate the configuration and exit.
    CheckConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<LeadboardConfig, ExitCode> {
    let loaded = match path {
        Some(path) => leadboard_config::load_and_validate_path(path),
        None => leadboard_config::load_and_validate(),
    };
    loaded.map_err(|errors| {
        leadboard_config::render_errors(&errors);
        ExitCode::FAILURE
    })
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("leadboard={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn cli_account(account_id: String) -> AccountContext {
    AccountContext::new(account_id, "cli")
}

async fn run_command(command: Commands, config: LeadboardConfig) -> Result<(), LeadboardError> {
    let now = chrono::Utc::now();
    match command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::CheckConfig => {
            println!(
                "leadboard: config ok (server={}:{}, database={})",
                config.server.host, config.server.port, config.storage.database_path
            );
            Ok(())
        }
        Commands::Leads {
            account,
            q,
            status,
            json,
        } => {
            let filter = FilterState::new(q, report::parse_status(status.as_deref())?);
            let store = serve::open_store(&config).await?;
            let out =
                report::run_leads(store.clone(), &config, &cli_account(account), filter, json).await;
            store.shutdown().await?;
            print!("{}", out?);
            Ok(())
        }
        Commands::Browse { account, q, status } => {
            let filter = FilterState::new(q, report::parse_status(status.as_deref())?);
            let store = serve::open_store(&config).await?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut out = std::io::stdout();
            let result = browse::run_browse(
                store.clone(),
                &config,
                cli_account(account),
                filter,
                input,
                &mut out,
            )
            .await;
            store.shutdown().await?;
            result
        }
        Commands::Stats { account, json } => {
            let store = serve::open_store(&config).await?;
            let out = report::run_stats(store.clone(), &config, &cli_account(account), now, json).await;
            store.shutdown().await?;
            print!("{}", out?);
            Ok(())
        }
        Commands::Activity { account, all, json } => {
            let store = serve::open_store(&config).await?;
            let out =
                report::run_activity(store.clone(), &config, &cli_account(account), all, now, json)
                    .await;
            store.shutdown().await?;
            print!("{}", out?);
            Ok(())
        }
        Commands::Seed { account } => {
            let store = serve::open_store(&config).await?;
            let account = cli_account(account);
            let summary = seed::seed_demo(store.as_ref(), &account, now).await;
            store.shutdown().await?;
            let summary = summary?;
            println!(
                "leadboard: seeded {} leads and {} events for account {}",
                summary.leads, summary.events, account.account_id
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("leadboard: use --help for available commands");
        return ExitCode::SUCCESS;
    };

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(code) => return code,
    };
    init_tracing(&config.app.log_level);

    match run_command(command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_leads_arguments() {
        let cli = Cli::try_parse_from([
            "leadboard",
            "leads",
            "--account",
            "acct-1",
            "--q",
            "jo",
            "--status",
            "New Lead",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Leads {
                account, q, status, json,
            }) => {
                assert_eq!(account, "acct-1");
                assert_eq!(q, "jo");
                assert_eq!(status.as_deref(), Some("New Lead"));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["leadboard", "check-config", "--config", "/tmp/lb.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/lb.toml")));
        assert!(matches!(cli.command, Some(Commands::CheckConfig)));
    }

    #[test]
    fn parses_browse_arguments() {
        let cli = Cli::try_parse_from([
            "leadboard", "browse", "--account", "acct-1", "--status", "Closed",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Browse { account, q, status }) => {
                assert_eq!(account, "acct-1");
                assert!(q.is_empty());
                assert_eq!(status.as_deref(), Some("Closed"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn account_is_required() {
        assert!(Cli::try_parse_from(["leadboard", "stats"]).is_err());
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = leadboard_config::load_and_validate_str("").unwrap();
        assert_eq!(config.app.name, "Leadboard");
    }
}
