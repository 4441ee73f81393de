//! Mode command - demo/formal switch

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_context;

#[derive(Subcommand)]
pub enum ModeCommands {
    /// Show the current mode
    Show,
    /// Switch between demo and formal mode
    Toggle,
}

pub async fn run(command: Option<ModeCommands>) -> Result<()> {
    let mut ctx = get_context().await?;

    match command {
        Some(ModeCommands::Toggle) => {
            ctx.store.toggle_mode()?;
            if ctx.store.is_demo_mode() {
                println!("Switched to {} mode", "demo".yellow());
            } else {
                println!("Switched to {} mode", "formal".green());
                println!("Sign in with 'tally login' to sync with the remote backend.");
            }
        }
        Some(ModeCommands::Show) | None => {
            if ctx.store.is_demo_mode() {
                println!("Mode is {}", "demo".yellow());
            } else {
                println!("Mode is {}", "formal".green());
            }
        }
    }

    Ok(())
}
