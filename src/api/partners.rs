//! Partner onboarding endpoints.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{CreatePartnerRequest, User, UserResponse, UserRole, VerificationStatus};
use crate::AppState;

use super::auth::hash_password;
use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_email, validate_password, validate_person_name, validate_phone};

/// Validate a CreatePartnerRequest
fn validate_create_request(req: &CreatePartnerRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_email(&req.email) {
        errors.add("email", &e);
    }

    if let Err(e) = validate_password(&req.password) {
        errors.add("password", &e);
    }

    if let Err(e) = validate_person_name(&req.first_name) {
        errors.add("first_name", &e);
    }

    if let Err(e) = validate_person_name(&req.last_name) {
        errors.add("last_name", &e);
    }

    if let Err(e) = validate_phone(&req.phone_number) {
        errors.add("phone_number", &e);
    }

    errors.finish()
}

/// Create a partner account. Role is forced to PARTNER and verification
/// starts out PENDING regardless of the payload.
pub async fn create_partner(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePartnerRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    validate_create_request(&req)?;

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::internal("Failed to process credentials")
    })?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let mut tx = state.db.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, first_name, last_name, phone_number,
                           role, verification_status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.email)
    .bind(&password_hash)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.phone_number)
    .bind(UserRole::Partner)
    .bind(VerificationStatus::Pending)
    .bind(&now)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            ApiError::conflict("A user with this email already exists")
        } else {
            tracing::error!("Failed to create partner: {}", e);
            ApiError::database("Failed to create partner")
        }
    })?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(partner_id = %user.id, "Partner account created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
