//! In-memory adapters
//!
//! Back the test suites and offline development; no file or network IO.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::result::{Error, Result};
use crate::domain::AppState;
use crate::ports::{DocumentStore, SnapshotStore, UserDocument};

/// Snapshot store holding at most one snapshot in memory.
#[derive(Default)]
pub struct MemorySnapshotStore {
    snapshot: Mutex<Option<AppState>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last snapshot written, if any.
    pub fn saved(&self) -> Option<AppState> {
        self.snapshot.lock().ok().and_then(|guard| guard.clone())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<AppState>> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|_| Error::Snapshot("snapshot lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| Error::Snapshot("snapshot lock poisoned".to_string()))?;
        *guard = Some(state.clone());
        Ok(())
    }
}

/// Document store holding per-user documents in memory.
///
/// `set_fail_writes` / `set_fail_reads` simulate an unreachable
/// backend.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<String, UserDocument>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the document for a user.
    pub fn insert(&self, user_id: impl Into<String>, document: UserDocument) {
        if let Ok(mut guard) = self.documents.lock() {
            guard.insert(user_id.into(), document);
        }
    }

    /// The current document for a user, if any.
    pub fn document(&self, user_id: &str) -> Option<UserDocument> {
        self.documents
            .lock()
            .ok()
            .and_then(|guard| guard.get(user_id).cloned())
    }

    /// Number of successful upserts so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn fetch(&self, user_id: &str) -> Result<Option<UserDocument>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::remote("simulated read failure"));
        }
        Ok(self.document(user_id))
    }

    async fn upsert(&self, user_id: &str, document: &UserDocument) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::remote("simulated write failure"));
        }
        let mut guard = self
            .documents
            .lock()
            .map_err(|_| Error::remote("document lock poisoned"))?;
        guard.insert(user_id.to_string(), document.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
