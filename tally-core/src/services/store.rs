//! State store - canonical application state and its mutation rules
//!
//! Owns the account/transaction/category collections and the
//! session/mode flags. Every mutation preserves the balance invariant,
//! persists the full snapshot to local durable storage, and - in formal
//! mode with a signed-in user - queues a best-effort write to the
//! remote mirror.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{
    Account, AccountKind, AccountPatch, AppState, Category, FlowKind, Transaction, UserProfile,
};
use crate::ports::{AuthEvent, DocumentStore, SnapshotStore, UserDocument};
use crate::seed;
use crate::services::mirror::{MirrorHandle, MirrorJob};

/// Fields for a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub kind: AccountKind,
    /// Opening balance; may be any signed amount.
    pub balance: Decimal,
}

/// Fields for a new transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub kind: FlowKind,
}

/// The canonical state owner.
///
/// All reads go through accessor queries and all writes through the
/// named operations below; there is exactly one logical writer at a
/// time, so operations run to completion without interleaving.
pub struct StateStore {
    state: AppState,
    snapshots: Arc<dyn SnapshotStore>,
    remote: Option<Arc<dyn DocumentStore>>,
    mirror: Option<MirrorHandle>,
}

impl StateStore {
    /// Open the store over local durable storage.
    ///
    /// Adopts the persisted snapshot when one parses; otherwise falls
    /// back to the built-in demo dataset. A parse failure is logged and
    /// never fatal. Without a configured remote backend the mode flag
    /// is forced back to demo, whatever was persisted.
    pub fn open(
        snapshots: Arc<dyn SnapshotStore>,
        remote: Option<Arc<dyn DocumentStore>>,
        mirror: Option<MirrorHandle>,
    ) -> Self {
        let mut state = match snapshots.load() {
            Ok(Some(state)) => state,
            Ok(None) => seed::demo_state(),
            Err(e) => {
                warn!("failed to load local snapshot, starting from demo data: {e}");
                seed::demo_state()
            }
        };
        if remote.is_none() {
            state.is_demo_mode = true;
        }

        Self {
            state,
            snapshots,
            remote,
            mirror,
        }
    }

    // === Accessors ===

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn accounts(&self) -> &[Account] {
        &self.state.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    pub fn is_demo_mode(&self) -> bool {
        self.state.is_demo_mode
    }

    pub fn remote_configured(&self) -> bool {
        self.remote.is_some()
    }

    // === Accounts ===

    /// Add an account and return its id.
    pub fn add_account(&mut self, fields: NewAccount) -> String {
        let id = new_id();
        self.state
            .accounts
            .push(Account::new(id.clone(), fields.name, fields.kind, fields.balance));
        self.commit();
        id
    }

    /// Merge the given fields into the matching account. No-op when the
    /// id matches nothing.
    pub fn update_account(&mut self, id: &str, patch: AccountPatch) {
        let Some(account) = self.state.accounts.iter_mut().find(|a| a.id == id) else {
            return;
        };
        if let Some(name) = patch.name {
            account.name = name;
        }
        if let Some(kind) = patch.kind {
            account.kind = kind;
        }
        self.commit();
    }

    /// Delete an account together with every transaction referencing
    /// it. Both removals land in one commit, so callers never observe
    /// transactions pointing at a deleted account.
    pub fn delete_account(&mut self, id: &str) {
        let before = self.state.accounts.len();
        self.state.accounts.retain(|a| a.id != id);
        if self.state.accounts.len() == before {
            return;
        }
        self.state.transactions.retain(|t| t.account_id != id);
        self.commit();
    }

    // === Transactions ===

    /// Add a transaction, adjusting the referenced account's balance by
    /// the signed amount. Reference validity is the caller's job; an
    /// unknown account simply receives no balance update.
    ///
    /// The new record is prepended, keeping the collection newest-first.
    pub fn add_transaction(&mut self, fields: NewTransaction) -> String {
        let id = new_id();
        let tx = Transaction::new(
            id.clone(),
            fields.account_id,
            fields.category_id,
            fields.amount,
            fields.date,
            fields.description,
            fields.kind,
        );

        if let Some(account) = self.state.accounts.iter_mut().find(|a| a.id == tx.account_id) {
            account.balance += tx.signed_amount();
        }
        self.state.transactions.insert(0, tx);
        self.commit();
        id
    }

    /// Delete a transaction, reversing its balance effect first. No-op
    /// for an unknown id. Tolerates the referenced account being gone
    /// already: the reversal is skipped, there is nothing to update.
    pub fn delete_transaction(&mut self, id: &str) {
        let Some(pos) = self.state.transactions.iter().position(|t| t.id == id) else {
            return;
        };
        let tx = self.state.transactions.remove(pos);

        if let Some(account) = self.state.accounts.iter_mut().find(|a| a.id == tx.account_id) {
            account.balance -= tx.signed_amount();
        }
        self.commit();
    }

    // === Session / mode ===

    /// Flip between demo and formal mode.
    ///
    /// Entering formal mode requires a configured remote backend;
    /// otherwise the toggle is rejected and state is unchanged. Either
    /// direction clears the current user, who must authenticate again.
    pub fn toggle_mode(&mut self) -> Result<()> {
        let entering_formal = self.state.is_demo_mode;
        if entering_formal && self.remote.is_none() {
            return Err(Error::config(
                "No remote backend is configured; formal mode is unavailable",
            ));
        }
        self.state.is_demo_mode = !self.state.is_demo_mode;
        self.state.user = None;
        self.commit();
        Ok(())
    }

    /// Set or clear the authenticated-user descriptor.
    pub fn set_user(&mut self, user: Option<UserProfile>) {
        self.state.user = user;
        self.commit();
    }

    /// Demo-mode login: install a local pseudo-user. No-op in formal
    /// mode, where the auth provider owns the session.
    pub fn sign_in_demo(&mut self, email: &str) {
        if !self.state.is_demo_mode {
            return;
        }
        self.state.user = Some(UserProfile::demo(email));
        self.commit();
    }

    // === Auth reconciliation ===

    /// Process one authentication-state change.
    ///
    /// Signed-in: adopt the descriptor, force formal mode, and load the
    /// user's remote document if one exists - its accounts and
    /// transactions replace the local ones, categories are kept.
    /// Signed-out: clear the user unless the store is in demo mode.
    ///
    /// Events run through this single consumer, so snapshot adoption is
    /// ordered deterministically against local mutations; whichever
    /// write is observed last wins.
    pub async fn handle_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::Changed(Some(user)) => {
                let user_id = user.id.clone();
                self.state.user = Some(user);
                self.state.is_demo_mode = false;
                self.commit();

                if let Some(remote) = self.remote.clone() {
                    match remote.fetch(&user_id).await {
                        Ok(Some(document)) => {
                            self.state.accounts = document.accounts;
                            self.state.transactions = document.transactions;
                            self.commit();
                        }
                        Ok(None) => {}
                        Err(e) => warn!("failed to load remote user document: {e}"),
                    }
                }
            }
            AuthEvent::Changed(None) => {
                if !self.state.is_demo_mode {
                    self.state.user = None;
                    self.commit();
                }
            }
        }
    }

    // === Persistence ===

    /// Persist the full snapshot locally and, when formal mode has a
    /// signed-in user, queue a remote mirror write. Neither failure
    /// rolls back the mutation that triggered it.
    fn commit(&mut self) {
        if let Err(e) = self.snapshots.save(&self.state) {
            warn!("failed to persist local snapshot: {e}");
        }
        self.queue_mirror();
    }

    fn queue_mirror(&self) {
        if self.state.is_demo_mode {
            return;
        }
        let (Some(user), Some(mirror)) = (&self.state.user, &self.mirror) else {
            return;
        };
        mirror.enqueue(MirrorJob {
            user_id: user.id.clone(),
            document: UserDocument {
                accounts: self.state.accounts.clone(),
                transactions: self.state.transactions.clone(),
                updated_at: Utc::now(),
            },
        });
    }
}

/// Opaque unique id for new records.
fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryDocumentStore, MemorySnapshotStore};

    fn demo_store() -> (StateStore, Arc<MemorySnapshotStore>) {
        let snapshots = Arc::new(MemorySnapshotStore::new());
        let store = StateStore::open(snapshots.clone(), None, None);
        (store, snapshots)
    }

    fn expense(account: &str, category: &str, amount: i64) -> NewTransaction {
        NewTransaction {
            account_id: account.to_string(),
            category_id: category.to_string(),
            amount: Decimal::new(amount, 0),
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            description: "test".to_string(),
            kind: FlowKind::Expense,
        }
    }

    #[test]
    fn test_opens_with_demo_dataset_when_empty() {
        let (store, _) = demo_store();
        assert_eq!(store.accounts().len(), 3);
        assert_eq!(store.transactions().len(), 5);
        assert_eq!(store.categories().len(), 10);
        assert!(store.is_demo_mode());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_add_account_assigns_unique_ids() {
        let (mut store, snapshots) = demo_store();
        let a = store.add_account(NewAccount {
            name: "One".to_string(),
            kind: AccountKind::Checking,
            balance: Decimal::ZERO,
        });
        let b = store.add_account(NewAccount {
            name: "Two".to_string(),
            kind: AccountKind::Savings,
            balance: Decimal::new(-10, 0),
        });

        assert_ne!(a, b);
        assert_eq!(store.accounts().len(), 5);
        // Every mutation rewrites the snapshot.
        assert_eq!(snapshots.saved().unwrap().accounts.len(), 5);
    }

    #[test]
    fn test_update_account_merges_fields() {
        let (mut store, _) = demo_store();
        store.update_account(
            "acc1",
            AccountPatch {
                name: Some("Renamed".to_string()),
                kind: None,
            },
        );

        let account = store.state().account("acc1").unwrap();
        assert_eq!(account.name, "Renamed");
        assert_eq!(account.kind, AccountKind::Checking);
        assert_eq!(account.balance, Decimal::new(125_000, 0));
    }

    #[test]
    fn test_update_unknown_account_is_noop() {
        let (mut store, snapshots) = demo_store();
        store.update_account(
            "ghost",
            AccountPatch {
                name: Some("x".to_string()),
                kind: None,
            },
        );
        assert!(snapshots.saved().is_none());
    }

    #[test]
    fn test_delete_unknown_transaction_is_noop() {
        let (mut store, _) = demo_store();
        store.delete_transaction("ghost");
        assert_eq!(store.transactions().len(), 5);
    }

    #[test]
    fn test_delete_transaction_with_missing_account_skips_reversal() {
        let (mut store, _) = demo_store();
        // The store trusts callers on references, so a dangling account
        // id goes in untouched.
        let id = store.add_transaction(expense("ghost", "4", 500));
        let balances: Vec<Decimal> = store.accounts().iter().map(|a| a.balance).collect();

        store.delete_transaction(&id);
        let after: Vec<Decimal> = store.accounts().iter().map(|a| a.balance).collect();
        assert_eq!(balances, after);
        assert!(store.state().transaction(&id).is_none());
    }

    #[test]
    fn test_toggle_without_backend_is_rejected() {
        let (mut store, snapshots) = demo_store();
        let result = store.toggle_mode();
        assert!(matches!(result, Err(Error::Config(_))));
        assert!(store.is_demo_mode());
        assert!(snapshots.saved().is_none());
    }

    #[test]
    fn test_toggle_clears_user() {
        let snapshots = Arc::new(MemorySnapshotStore::new());
        let remote: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let mut store = StateStore::open(snapshots, Some(remote), None);

        store.sign_in_demo("alice@example.com");
        assert!(store.user().is_some());

        store.toggle_mode().unwrap();
        assert!(!store.is_demo_mode());
        assert!(store.user().is_none());

        store.toggle_mode().unwrap();
        assert!(store.is_demo_mode());
    }

    #[test]
    fn test_sign_in_demo_only_in_demo_mode() {
        let snapshots = Arc::new(MemorySnapshotStore::new());
        let remote: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let mut store = StateStore::open(snapshots, Some(remote), None);

        store.toggle_mode().unwrap();
        store.sign_in_demo("alice@example.com");
        assert!(store.user().is_none());
    }

    #[tokio::test]
    async fn test_signed_out_keeps_demo_user() {
        let (mut store, _) = demo_store();
        store.sign_in_demo("alice@example.com");

        store.handle_event(AuthEvent::Changed(None)).await;
        assert!(store.user().is_some());
    }
}
