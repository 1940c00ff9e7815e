//! sessions-api - CLI tool for the sessions API
//!
//! Lists login sessions and runs the same confirm-then-mutate flow as the
//! web page: a prompt stands in for the dialog, stderr for the toasts.
//! Stdout only carries the session listing.

mod client;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use shared::{
    row_actions, ActionKind, MutationOutcome, Notifier, SessionId, SessionRow,
    SessionsApi, SessionsController, SessionsView, Toast, ViewConfig,
};
use tabled::{Table, Tabled};

use client::NativeApiClient;

#[derive(Parser)]
#[command(name = "sessions-api")]
#[command(about = "CLI tool for listing and managing login sessions", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "SESSIONS_SERVER", default_value = "http://localhost:3000")]
    server: String,

    /// Auth token (for authenticated endpoints)
    #[arg(short, long, env = "SESSIONS_TOKEN")]
    token: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Session management
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// List all sessions
    List,
    /// Permanently delete a session record
    Delete {
        /// Session ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Log out an active session
    Disconnect {
        /// Session ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Prints toasts to stderr as they arrive
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        eprintln!("{} {}", toast.title.bold(), toast.description);
    }
}

#[derive(Tabled)]
struct SessionTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Session")]
    browser: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last connected")]
    last_connected: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<SessionRow> for SessionTableRow {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id.to_string(),
            browser: row.browser,
            platform: row.platform,
            status: row.status.to_string(),
            last_connected: row.last_connected,
            created: row.created,
        }
    }
}

fn print_sessions(view: &SessionsView, format: OutputFormat) -> Result<()> {
    let Some(sessions) = view.sessions() else {
        println!("Sessions not loaded");
        return Ok(());
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(sessions)?),
        _ if sessions.is_empty() => println!("No sessions found"),
        OutputFormat::Table => {
            let rows: Vec<SessionTableRow> = view.rows().into_iter().map(Into::into).collect();
            println!("{}", Table::new(rows));
        }
        OutputFormat::Pretty => {
            println!("{} {} session(s):", "Found".bold(), sessions.len());
            for row in view.rows() {
                let dot = if row.active { "●".green() } else { "●".red() };
                println!("\n  {} {} {}", dot, row.browser.bold(), row.status);
                println!("    ID: {}", row.id);
                println!("    Platform: {}", row.platform.cyan());
                println!("    Last connected: {}", row.last_connected);
                println!("    Created: {}", row.created);
            }
        }
    }
    Ok(())
}

fn ask_terminal(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Select, confirm and run one destructive action, re-prompting after a
/// failure the way the dialog stays open for a retry.
///
/// `ask` is never called with `yes`. Declining after a failed attempt is
/// still an error.
async fn run_action<A, N>(
    controller: &SessionsController<A, N>,
    kind: ActionKind,
    id: SessionId,
    yes: bool,
    format: OutputFormat,
    mut ask: impl FnMut(&str) -> Result<bool>,
) -> Result<()>
where
    A: SessionsApi,
    N: Notifier,
{
    if !controller.mount().await {
        tracing::warn!("Session list unavailable; continuing with {}", id);
    }

    let view = controller.snapshot();
    match view.session(&id) {
        Some(session) => {
            if !row_actions(session, view.config()).contains(&kind) {
                bail!("{} is not available for session {}", kind.label(), id);
            }
            eprintln!(
                "{} {} on {}",
                "→".blue(),
                session.browser.bold(),
                session.platform()
            );
        }
        None => tracing::warn!("Session {} is not in the current list", id),
    }

    controller.select(kind, id);

    let mut prompt = format!("{}? {}", kind.dialog_title(), kind.dialog_description());
    let mut last_failure = None;
    loop {
        let confirmed = yes || ask(prompt.as_str())?;

        if !confirmed {
            controller.cancel(kind);
            eprintln!("{}", "Cancelled".dimmed());
            return match last_failure {
                Some(outcome) => bail!("{} did not succeed: {:?}", kind.label(), outcome),
                None => Ok(()),
            };
        }

        match controller.confirm(kind).await {
            Some(MutationOutcome::Succeeded) => {
                return print_sessions(&controller.snapshot(), format);
            }
            Some(outcome) if yes => bail!("{} did not succeed: {:?}", kind.label(), outcome),
            Some(outcome) => {
                last_failure = Some(outcome);
                prompt = "Try again?".to_string();
            }
            None => bail!("No {} pending", kind.label().to_lowercase()),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = NativeApiClient::new(&cli.server, cli.token.as_deref())?;
    let controller = SessionsController::new(client, TerminalNotifier, ViewConfig::default());

    match cli.command {
        Commands::Sessions { action } => match action {
            SessionAction::List => {
                if !controller.mount().await {
                    bail!("Failed to load sessions from {}", cli.server);
                }
                print_sessions(&controller.snapshot(), cli.format)?;
            }
            SessionAction::Delete { id, yes } => {
                let kind = ActionKind::Delete;
                run_action(&controller, kind, id.into(), yes, cli.format, ask_terminal).await?;
            }
            SessionAction::Disconnect { id, yes } => {
                let kind = ActionKind::Disconnect;
                run_action(&controller, kind, id.into(), yes, cli.format, ask_terminal).await?;
            }
        },
    }

    Ok(())
}
