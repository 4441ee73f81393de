//! Remote document store port

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::{Account, Transaction};

/// The per-user document mirrored to the remote store in formal mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub updated_at: DateTime<Utc>,
}

/// Remote per-user document storage.
///
/// Writes are merge-upserts: fields not included in the payload are
/// left untouched on the server. Reads are point lookups by user id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Look up the document for a user; `None` when it does not exist.
    async fn fetch(&self, user_id: &str) -> Result<Option<UserDocument>>;

    /// Merge-upsert the document for a user.
    async fn upsert(&self, user_id: &str, document: &UserDocument) -> Result<()>;
}
