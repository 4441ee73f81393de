//! Authentication provider port

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::UserProfile;

/// Authentication-state change delivered to the store's event consumer.
///
/// Changes are queued and handled by a single consumer, so adopting a
/// remote snapshot is ordered deterministically against local
/// mutations instead of racing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// The provider's current user changed: signed in (`Some`) or out
    /// (`None`).
    Changed(Option<UserProfile>),
}

/// Authentication collaborator keyed by email/password.
///
/// The provider is the sole source of truth for whether a formal-mode
/// session is active; every change it observes arrives as an
/// [`AuthEvent`] on the channel it was constructed with.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile>;

    async fn sign_up(&self, email: &str, password: &str, display_name: &str)
        -> Result<UserProfile>;

    async fn sign_out(&self) -> Result<()>;
}
