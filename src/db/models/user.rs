//! User models and partner onboarding DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Renter,
    Partner,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Renter => "RENTER",
            UserRole::Partner => "PARTNER",
            UserRole::Admin => "ADMIN",
        }
    }
}

/// Approval state of a partner account. Only meaningful for PARTNER users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "PENDING",
            VerificationStatus::Verified => "VERIFIED",
            VerificationStatus::Rejected => "REJECTED",
        }
    }

    /// Legal moves when strict transitions are enabled: PENDING is the only
    /// state with outgoing edges; same-state writes are always allowed.
    pub fn can_transition_to(self, next: VerificationStatus) -> bool {
        self == next
            || matches!(
                (self, next),
                (VerificationStatus::Pending, VerificationStatus::Verified)
                    | (VerificationStatus::Pending, VerificationStatus::Rejected)
            )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub dl_scan_url: Option<String>,
    pub verification_status: VerificationStatus,
    pub stripe_customer_id: Option<String>,
    pub created_at: String,
}

/// User record as returned by the API: everything but the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub dl_scan_url: Option<String>,
    pub verification_status: VerificationStatus,
    pub stripe_customer_id: Option<String>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            role: user.role,
            dl_scan_url: user.dl_scan_url,
            verification_status: user.verification_status,
            stripe_customer_id: user.stripe_customer_id,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePartnerRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVerificationRequest {
    pub status: VerificationStatus,
}
