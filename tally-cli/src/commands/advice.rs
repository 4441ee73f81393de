//! Advice command - AI analysis of the current books

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn run() -> Result<()> {
    let ctx = get_context().await?;

    output::info("Asking the advisor...");
    let advice = ctx.advice.advise(ctx.store.state()).await;

    println!();
    println!("{advice}");
    Ok(())
}
