//! Account commands

use anyhow::Result;
use clap::Subcommand;
use dialoguer::Confirm;
use rust_decimal::Decimal;
use tally_core::{AccountKind, AccountPatch, NewAccount};

use super::get_context;
use crate::output;

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Add a new account
    Add {
        /// Display name
        name: String,
        /// Account kind (checking, savings, credit-card, investment)
        kind: AccountKind,
        /// Opening balance
        #[arg(default_value = "0")]
        balance: Decimal,
    },

    /// Update an account's name or kind
    Update {
        /// Account id
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New account kind
        #[arg(long)]
        kind: Option<AccountKind>,
    },

    /// Delete an account and all of its transactions
    Rm {
        /// Account id
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// List accounts
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: AccountCommands) -> Result<()> {
    let mut ctx = get_context().await?;

    match command {
        AccountCommands::Add { name, kind, balance } => {
            let id = ctx.store.add_account(NewAccount {
                name: name.clone(),
                kind,
                balance,
            });
            output::success(&format!("Added account {} ({})", name, id));
        }

        AccountCommands::Update { id, name, kind } => {
            if ctx.store.state().account(&id).is_none() {
                anyhow::bail!("No account with id {}", id);
            }
            if name.is_none() && kind.is_none() {
                output::info("Nothing to update");
                return Ok(());
            }
            ctx.store.update_account(&id, AccountPatch { name, kind });
            output::success("Account updated");
        }

        AccountCommands::Rm { id, force } => {
            let name = match ctx.store.state().account(&id) {
                Some(account) => account.name.clone(),
                None => anyhow::bail!("No account with id {}", id),
            };

            if !force {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete '{}' and all of its transactions?", name))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    output::info("Aborted");
                    return Ok(());
                }
            }

            ctx.store.delete_account(&id);
            output::success(&format!("Deleted account {}", name));
        }

        AccountCommands::Ls { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(ctx.store.accounts())?);
                return Ok(());
            }
            let mut table = output::create_table();
            table.set_header(vec!["Id", "Name", "Kind", "Balance", "Updated"]);
            for account in ctx.store.accounts() {
                table.add_row(vec![
                    account.id.clone(),
                    account.name.clone(),
                    account.kind.to_string(),
                    output::format_amount(account.balance),
                    account.last_updated.format("%Y-%m-%d").to_string(),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
