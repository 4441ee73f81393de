//! Generative-advice port

use async_trait::async_trait;

use crate::domain::result::Result;

/// Free-text financial advice backed by a generative model.
///
/// A read-only, on-demand query; it never touches stored state.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn advise(&self, prompt: &str) -> Result<String>;
}
