//! Built-in demo dataset
//!
//! Seeds the store on first run and whenever the persisted snapshot
//! cannot be used. Ids are fixed so demo sessions are reproducible.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{Account, AccountKind, AppState, Category, FlowKind, Transaction};

/// The fixed default category set, ids "1" through "10".
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("1", "Salary", "fa-money-bill-wave", "bg-green-500", FlowKind::Income),
        Category::new("2", "Bonus", "fa-gift", "bg-emerald-500", FlowKind::Income),
        Category::new("3", "Investment Income", "fa-chart-line", "bg-teal-500", FlowKind::Income),
        Category::new("4", "Dining", "fa-utensils", "bg-orange-500", FlowKind::Expense),
        Category::new("5", "Transport", "fa-bus", "bg-blue-500", FlowKind::Expense),
        Category::new("6", "Shopping", "fa-shopping-bag", "bg-pink-500", FlowKind::Expense),
        Category::new("7", "Entertainment", "fa-gamepad", "bg-purple-500", FlowKind::Expense),
        Category::new("8", "Housing", "fa-home", "bg-indigo-500", FlowKind::Expense),
        Category::new("9", "Medical", "fa-heartbeat", "bg-red-500", FlowKind::Expense),
        Category::new("10", "Education", "fa-book", "bg-cyan-500", FlowKind::Expense),
    ]
}

/// Demo accounts: a checking account, a savings account and a credit card.
pub fn demo_accounts() -> Vec<Account> {
    vec![
        Account::new(
            "acc1",
            "Primary Checking",
            AccountKind::Checking,
            Decimal::new(125_000, 0),
        ),
        Account::new(
            "acc2",
            "High-Yield Savings",
            AccountKind::Savings,
            Decimal::new(50_000, 0),
        ),
        Account::new(
            "acc3",
            "Rewards Credit Card",
            AccountKind::CreditCard,
            Decimal::new(-12_500, 0),
        ),
    ]
}

/// Demo transactions across the seed accounts.
pub fn demo_transactions() -> Vec<Transaction> {
    vec![
        tx("t1", "acc1", "1", 65_000, 2024, 3, 1, "March salary", FlowKind::Income),
        tx("t2", "acc1", "4", 150, 2024, 3, 2, "Lunch", FlowKind::Expense),
        tx("t3", "acc3", "6", 2_500, 2024, 3, 3, "Clothing", FlowKind::Expense),
        tx("t4", "acc2", "3", 1_200, 2024, 3, 5, "Dividend payout", FlowKind::Income),
        tx("t5", "acc1", "5", 1_280, 2024, 3, 5, "Commuter pass", FlowKind::Expense),
    ]
}

/// The full fallback state: demo mode, nobody signed in.
pub fn demo_state() -> AppState {
    AppState {
        accounts: demo_accounts(),
        transactions: demo_transactions(),
        categories: default_categories(),
        is_demo_mode: true,
        user: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn tx(
    id: &str,
    account_id: &str,
    category_id: &str,
    amount: i64,
    year: i32,
    month: u32,
    day: u32,
    description: &str,
    kind: FlowKind,
) -> Transaction {
    Transaction::new(
        id,
        account_id,
        category_id,
        Decimal::new(amount, 0),
        NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        description,
        kind,
    )
}
