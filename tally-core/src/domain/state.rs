//! Application state snapshot

use serde::{Deserialize, Serialize};

use super::{Account, Category, Transaction, UserProfile};

/// The full application state.
///
/// Serialized as one document to local durable storage after every
/// mutation; the transaction collection is kept newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub is_demo_mode: bool,
    pub user: Option<UserProfile>,
}

impl AppState {
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }
}
