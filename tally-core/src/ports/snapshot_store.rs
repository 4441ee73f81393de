//! Local durable storage port

use crate::domain::result::Result;
use crate::domain::AppState;

/// Local durable storage for the application-state snapshot.
///
/// One logical key holds the whole serialized state. It is read once at
/// startup and rewritten after every mutation; the last write wins.
pub trait SnapshotStore: Send + Sync {
    /// Load the previously persisted snapshot, if any.
    fn load(&self) -> Result<Option<AppState>>;

    /// Persist the full snapshot, replacing any previous one.
    fn save(&self, state: &AppState) -> Result<()>;
}
