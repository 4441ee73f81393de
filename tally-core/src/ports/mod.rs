//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external collaborators. The core
//! depends only on these traits, not on concrete implementations.

mod advisor;
mod auth;
mod document_store;
mod snapshot_store;

pub use advisor::Advisor;
pub use auth::{AuthEvent, AuthProvider};
pub use document_store::{DocumentStore, UserDocument};
pub use snapshot_store::SnapshotStore;
