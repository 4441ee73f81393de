//! Status command - balances and activity summary

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_core::FlowKind;

use super::get_context;
use crate::output;

#[derive(Serialize)]
struct StatusSummary {
    net_balance: Decimal,
    income: Decimal,
    expense: Decimal,
    account_count: usize,
    transaction_count: usize,
    demo_mode: bool,
    user: Option<String>,
}

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context().await?;
    let store = &ctx.store;

    let net_balance: Decimal = store.accounts().iter().map(|a| a.balance).sum();
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for tx in store.transactions() {
        match tx.kind {
            FlowKind::Income => income += tx.amount,
            FlowKind::Expense => expense += tx.amount,
        }
    }

    if json {
        let summary = StatusSummary {
            net_balance,
            income,
            expense,
            account_count: store.accounts().len(),
            transaction_count: store.transactions().len(),
            demo_mode: store.is_demo_mode(),
            user: store.user().map(|u| u.email.clone()),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Financial Overview".bold());
    println!();

    if store.is_demo_mode() {
        println!("Mode: {}", "demo".yellow());
    } else {
        println!("Mode: {}", "formal".green());
    }
    match store.user() {
        Some(user) => println!("Signed in as {} <{}>", user.display_name, user.email),
        None => println!("Not signed in"),
    }
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["Account", "Kind", "Balance"]);
    for account in store.accounts() {
        table.add_row(vec![
            account.name.clone(),
            account.kind.to_string(),
            output::format_amount(account.balance),
        ]);
    }
    println!("{table}");
    println!();

    println!("Net balance: {}", output::format_amount(net_balance));
    println!("Income: {}  Spending: {}", income, expense);
    println!("Transactions: {}", store.transactions().len());

    Ok(())
}
