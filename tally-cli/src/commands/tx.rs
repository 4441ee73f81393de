//! Transaction commands

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use rust_decimal::Decimal;
use tally_core::{FlowKind, NewTransaction};

use super::get_context;
use crate::output;

#[derive(Subcommand)]
pub enum TxCommands {
    /// Record a transaction
    Add {
        /// Positive amount
        amount: Decimal,
        /// Account id
        #[arg(long)]
        account: String,
        /// Category id
        #[arg(long)]
        category: String,
        /// Direction (income or expense)
        #[arg(long, default_value = "expense")]
        kind: FlowKind,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a transaction, reversing its balance effect
    Rm {
        /// Transaction id
        id: String,
    },

    /// List transactions, newest first
    Ls {
        /// Only show transactions for this account id
        #[arg(long)]
        account: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: TxCommands) -> Result<()> {
    let mut ctx = get_context().await?;

    match command {
        TxCommands::Add {
            amount,
            account,
            category,
            kind,
            date,
            description,
        } => {
            // The store trusts its callers on references; this is the
            // boundary that checks them.
            if amount <= Decimal::ZERO {
                anyhow::bail!("Amount must be positive");
            }
            if ctx.store.state().account(&account).is_none() {
                anyhow::bail!("No account with id {}", account);
            }
            match ctx.store.state().category(&category) {
                Some(cat) if !cat.allows(kind) => {
                    anyhow::bail!(
                        "Category '{}' cannot be used for {} transactions",
                        cat.name,
                        kind
                    );
                }
                Some(_) => {}
                None => anyhow::bail!("No category with id {}", category),
            }

            let id = ctx.store.add_transaction(NewTransaction {
                account_id: account,
                category_id: category,
                amount,
                date: date.unwrap_or_else(|| Utc::now().date_naive()),
                description,
                kind,
            });
            output::success(&format!("Recorded transaction {}", id));
        }

        TxCommands::Rm { id } => {
            if ctx.store.state().transaction(&id).is_none() {
                anyhow::bail!("No transaction with id {}", id);
            }
            ctx.store.delete_transaction(&id);
            output::success("Transaction deleted");
        }

        TxCommands::Ls { account, json } => {
            let transactions: Vec<_> = ctx
                .store
                .transactions()
                .iter()
                .filter(|t| account.as_deref().map_or(true, |a| t.account_id == a))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&transactions)?);
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec![
                "Id",
                "Date",
                "Account",
                "Category",
                "Kind",
                "Amount",
                "Description",
            ]);
            for tx in transactions {
                let account_name = ctx
                    .store
                    .state()
                    .account(&tx.account_id)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| tx.account_id.clone());
                let category_name = ctx
                    .store
                    .state()
                    .category(&tx.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| tx.category_id.clone());
                table.add_row(vec![
                    tx.id.clone(),
                    tx.date.to_string(),
                    account_name,
                    category_name,
                    tx.kind.to_string(),
                    tx.amount.to_string(),
                    tx.description.clone(),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
