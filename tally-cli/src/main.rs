//! Tally CLI - personal finance in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{account, advice, auth, categories, mode, status, tx};

/// Tally - personal finance in your terminal
#[derive(Parser)]
#[command(name = "tally", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show balances and activity summary
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage bank accounts
    Account {
        #[command(subcommand)]
        command: account::AccountCommands,
    },

    /// Record and inspect transactions
    Tx {
        #[command(subcommand)]
        command: tx::TxCommands,
    },

    /// List transaction categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the AI advisor for an analysis of your finances
    Advice,

    /// Show or toggle demo/formal mode
    Mode {
        #[command(subcommand)]
        command: Option<mode::ModeCommands>,
    },

    /// Sign in (demo identity or remote account)
    Login {
        /// Email address
        email: Option<String>,
    },

    /// Create a remote account and sign in
    Register {
        /// Email address
        email: Option<String>,
    },

    /// Sign out of the current session
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Status { json } => status::run(json).await,
        Commands::Account { command } => account::run(command).await,
        Commands::Tx { command } => tx::run(command).await,
        Commands::Categories { json } => categories::run(json).await,
        Commands::Advice => advice::run().await,
        Commands::Mode { command } => mode::run(command).await,
        Commands::Login { email } => auth::login(email).await,
        Commands::Register { email } => auth::register(email).await,
        Commands::Logout => auth::logout().await,
    }
}
