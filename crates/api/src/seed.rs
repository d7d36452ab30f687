//! Startup seeding of the super-admin account.

use playrental_core::roles::ROLE_SUPER_ADMIN;
use playrental_db::models::user::CreateUser;
use playrental_db::repositories::UserRepo;
use playrental_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Ensure the configured super-admin account exists.
///
/// Runs once at startup. Skipped (with a log line) when `SUPER_ADMIN_EMAIL`
/// or `SUPER_ADMIN_PASSWORD` is unset, and a no-op when the account already
/// exists -- an existing row is never touched, so rotating the env password
/// does not rewrite a live account.
pub async fn ensure_super_admin(pool: &DbPool, config: &ServerConfig) -> AppResult<()> {
    let (Some(email), Some(password)) =
        (&config.super_admin_email, &config.super_admin_password)
    else {
        tracing::info!("SUPER_ADMIN_EMAIL/SUPER_ADMIN_PASSWORD not set, skipping admin seed");
        return Ok(());
    };

    // 1. Already seeded?
    if UserRepo::find_by_email(pool, email).await?.is_some() {
        tracing::debug!(email, "Super admin account already exists");
        return Ok(());
    }

    // 2. Create the account with a hashed password and no pending verification.
    let hashed = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        name: "Super Admin".to_string(),
        email: email.clone(),
        password_hash: hashed,
        role: ROLE_SUPER_ADMIN.to_string(),
        verification_token: None,
    };
    let user = UserRepo::create(pool, &input).await?;

    // 3. The seeded account logs in without an email round-trip.
    UserRepo::mark_email_verified(pool, user.id).await?;

    tracing::info!(email, user_id = user.id, "Seeded super admin account");
    Ok(())
}
