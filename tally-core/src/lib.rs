//! Tally Core - state and sync logic for personal finance tracking
//!
//! This crate implements the core logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (Account, Transaction, Category, ...)
//! - **ports**: Trait definitions for external collaborators
//!   (SnapshotStore, DocumentStore, AuthProvider, Advisor)
//! - **services**: State ownership, remote mirroring, advice orchestration
//! - **adapters**: Concrete implementations (JSON file, remote backend,
//!   Gemini, in-memory stores)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod seed;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::warn;

use adapters::gemini::GeminiClient;
use adapters::json_snapshot::JsonSnapshotStore;
use adapters::remote::RemoteClient;
use config::Config;
use ports::{Advisor, AuthEvent, DocumentStore};
use services::{mirror, AdviceService, StateStore};

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{
    Account, AccountKind, AccountPatch, AppState, Category, FlowKind, Transaction, UserProfile,
};
pub use services::{NewAccount, NewTransaction};

/// Main context for tally operations
///
/// This is the primary entry point: it wires configuration, adapters
/// and services together. Must be created inside a Tokio runtime - the
/// remote mirror consumer is spawned here.
pub struct TallyContext {
    pub config: Config,
    pub store: StateStore,
    pub advice: AdviceService,
    pub auth: Option<Arc<RemoteClient>>,
    events: UnboundedReceiver<AuthEvent>,
    _mirror_task: Option<JoinHandle<()>>,
}

impl TallyContext {
    /// Create a new tally context rooted at the given directory.
    pub fn new(tally_dir: &Path) -> Result<Self> {
        let config = Config::load(tally_dir)?;

        let (events_tx, events) = mpsc::unbounded_channel();

        // A rejected remote configuration disables formal mode rather
        // than failing startup.
        let remote_client = match &config.remote {
            Some(remote_config) => match RemoteClient::new(remote_config, events_tx) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    warn!("remote backend configuration rejected, running demo-only: {e}");
                    None
                }
            },
            None => None,
        };

        let remote_store: Option<Arc<dyn DocumentStore>> = remote_client
            .clone()
            .map(|client| client as Arc<dyn DocumentStore>);

        let (mirror_handle, mirror_task) = match &remote_store {
            Some(remote) => {
                let (handle, task) = mirror::spawn(Arc::clone(remote));
                (Some(handle), Some(task))
            }
            None => (None, None),
        };

        let snapshots = Arc::new(JsonSnapshotStore::new(tally_dir.join("state.json")));
        let store = StateStore::open(snapshots, remote_store, mirror_handle);

        let advisor: Option<Arc<dyn Advisor>> = match &config.advice {
            Some(advice_config) => match GeminiClient::new(advice_config) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    warn!("advice client unavailable: {e}");
                    None
                }
            },
            None => None,
        };
        let advice = AdviceService::new(advisor);

        Ok(Self {
            config,
            store,
            advice,
            auth: remote_client,
            events,
            _mirror_task: mirror_task,
        })
    }

    /// Apply any queued authentication-state changes to the store.
    ///
    /// This is the single-consumer pass that keeps reconciliation
    /// ordered against local mutations.
    pub async fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.store.handle_event(event).await;
        }
    }
}
