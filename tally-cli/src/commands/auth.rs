//! Auth commands - login, register, logout

use anyhow::Result;
use dialoguer::{Input, Password};
use tally_core::ports::AuthProvider;

use super::get_context;
use crate::output;

pub async fn login(email: Option<String>) -> Result<()> {
    let mut ctx = get_context().await?;

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    if ctx.store.is_demo_mode() {
        ctx.store.sign_in_demo(&email);
        output::success(&format!("Signed in to the demo ledger as {}", email));
        return Ok(());
    }

    let Some(auth) = ctx.auth.clone() else {
        anyhow::bail!("No remote backend is configured; only demo-mode login is available");
    };

    let password = Password::new().with_prompt("Password").interact()?;
    let profile = auth.sign_in(&email, &password).await?;
    ctx.drain_events().await;

    output::success(&format!(
        "Signed in as {} <{}>",
        profile.display_name, profile.email
    ));
    Ok(())
}

pub async fn register(email: Option<String>) -> Result<()> {
    let mut ctx = get_context().await?;

    if ctx.store.is_demo_mode() {
        anyhow::bail!("Registration needs formal mode; switch with 'tally mode toggle'");
    }
    let Some(auth) = ctx.auth.clone() else {
        anyhow::bail!("No remote backend is configured");
    };

    let email: String = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let suggested = email.split('@').next().unwrap_or("").to_string();
    let display_name: String = Input::new()
        .with_prompt("Display name")
        .default(suggested)
        .interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let profile = auth.sign_up(&email, &password, &display_name).await?;
    ctx.drain_events().await;

    output::success(&format!("Welcome, {}!", profile.display_name));
    Ok(())
}

pub async fn logout() -> Result<()> {
    let mut ctx = get_context().await?;

    if !ctx.store.is_demo_mode() {
        if let Some(auth) = ctx.auth.clone() {
            if let Err(e) = auth.sign_out().await {
                output::warning(&format!("Remote sign-out failed: {}", e));
            }
            ctx.drain_events().await;
        }
    }

    // Demo identities and any leftover descriptor are cleared locally.
    ctx.store.set_user(None);
    output::success("Signed out");
    Ok(())
}
