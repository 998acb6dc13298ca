//! Password hashing and the bootstrap admin account.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use tracing::info;

use crate::db::{DbPool, UserRole, VerificationStatus};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Create the default admin user if no user with the configured email exists.
/// Runs at every startup.
pub async fn ensure_admin_user(db: &DbPool, email: &str, password: &str) -> Result<()> {
    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(db)
        .await?;

    if existing.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(password)
        .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {}", e))?;
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, role, verification_status, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(email)
    .bind(&password_hash)
    .bind(UserRole::Admin)
    .bind(VerificationStatus::Verified)
    .bind(&now)
    .execute(db)
    .await?;

    info!("Created default admin user {}", email);
    Ok(())
}
