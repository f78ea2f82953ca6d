//! Root admin seeding.

use crate::state::AppState;
use anyhow::{Context, Result};

/// Ensure the root admin from `ROOT_ADMIN_EMAIL`/`ROOT_ADMIN_PASSWORD` exists.
/// Idempotent: an existing account with that email is left untouched.
pub async fn ensure_root_admin(state: &AppState) -> Result<()> {
    let (email, password) = match (
        state.config.root_admin_email.as_deref(),
        state.config.root_admin_password.as_deref(),
    ) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            tracing::info!("Root admin env vars not set, skipping seed");
            return Ok(());
        }
    };

    let hash =
        bcrypt::hash(password, bcrypt::DEFAULT_COST).context("Failed to hash root admin password")?;

    match state
        .repos
        .admins
        .create_if_absent("Root Admin", email, &hash)
        .await
        .context("Failed to seed root admin")?
    {
        Some(admin) => tracing::info!(admin_id = %admin.id, "Root admin created"),
        None => tracing::debug!("Root admin already present"),
    }

    Ok(())
}
