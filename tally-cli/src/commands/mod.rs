//! CLI command implementations

pub mod account;
pub mod advice;
pub mod auth;
pub mod categories;
pub mod mode;
pub mod status;
pub mod tx;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tally_core::TallyContext;

/// Get the tally directory from environment or default
pub fn get_tally_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TALLY_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .map(|home| home.join(".tally"))
            .unwrap_or_else(|| PathBuf::from(".tally"))
    }
}

/// Get or create the tally context, applying any pending auth events
/// before the command runs.
pub async fn get_context() -> Result<TallyContext> {
    let tally_dir = get_tally_dir();

    std::fs::create_dir_all(&tally_dir)
        .with_context(|| format!("Failed to create tally directory: {:?}", tally_dir))?;

    let mut ctx = TallyContext::new(&tally_dir).context("Failed to initialize tally context")?;
    ctx.drain_events().await;
    Ok(ctx)
}
