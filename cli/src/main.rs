//! `todo`: command-line front end for a remote todo list.
//!
//! Every invocation loads the collection, applies at most one change and
//! prints the resulting list.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use todo_sync::{render, Config, Locale, Outcome, ReqwestTransport, Strings, TodoClient, TodoSyncStore};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "View and edit a remote todo list")]
struct Cli {
    /// Base URL of the todo service [env: TODO_API_URL]
    #[arg(long)]
    base_url: Option<String>,

    /// Label language, `en` or `ja` [env: TODO_LANG]
    #[arg(long)]
    lang: Option<Locale>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all todos (default)
    List,

    /// Add a todo
    Add {
        /// Title words, joined with spaces
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Flip a todo between done and not done
    Toggle { id: String },

    /// Delete a todo
    Rm { id: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    setup_logging();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(locale) = cli.lang {
        config.locale = locale;
    }
    let strings = Strings::for_locale(config.locale);

    let transport = ReqwestTransport::new();
    let mut store = TodoSyncStore::new(TodoClient::new(&config.base_url));

    let mut outcome = store.load(&transport).await;
    if outcome == Outcome::Applied {
        outcome = match cli.command.unwrap_or(Command::List) {
            Command::List => outcome,
            Command::Add { title } => {
                store.set_draft(title.join(" "));
                store.submit(&transport).await
            }
            Command::Toggle { id } => store.toggle_completion(&transport, &id).await,
            Command::Rm { id } => store.remove(&transport, &id).await,
        };
    }

    print!("{}", render(&store, &strings));

    Ok(ExitCode::from(exit_status(outcome, &config.base_url)))
}

/// Maps an outcome to the process exit status, logging anything but success.
fn exit_status(outcome: Outcome, base_url: &str) -> u8 {
    match outcome {
        Outcome::Applied => 0,
        Outcome::Rejected => {
            warn!("nothing to do");
            2
        }
        Outcome::Failed => {
            warn!(%base_url, "request to the todo service failed");
            1
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
