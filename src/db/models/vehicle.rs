//! Vehicle listing models and DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::common::{parse_json_object, parse_string_list};

/// Lifecycle state of a listing, gating its visibility to renters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Draft,
    PendingApproval,
    Active,
    Inactive,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Draft => "DRAFT",
            VehicleStatus::PendingApproval => "PENDING_APPROVAL",
            VehicleStatus::Active => "ACTIVE",
            VehicleStatus::Inactive => "INACTIVE",
        }
    }

    /// Legal moves when strict transitions are enabled. Listings go
    /// DRAFT -> PENDING_APPROVAL -> ACTIVE/INACTIVE, and can be toggled
    /// between ACTIVE and INACTIVE after review.
    pub fn can_transition_to(self, next: VehicleStatus) -> bool {
        self == next
            || matches!(
                (self, next),
                (VehicleStatus::Draft, VehicleStatus::PendingApproval)
                    | (VehicleStatus::PendingApproval, VehicleStatus::Active)
                    | (VehicleStatus::PendingApproval, VehicleStatus::Inactive)
                    | (VehicleStatus::Active, VehicleStatus::Inactive)
                    | (VehicleStatus::Inactive, VehicleStatus::Active)
            )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: String,
    pub partner_id: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub vin: String,
    pub license_plate: String,
    pub base_price_per_day: f64,
    pub location: Option<String>,
    pub description: Option<String>,
    /// JSON string array
    pub photo_urls: Option<String>,
    /// JSON object
    pub features: Option<String>,
    pub ownership_docs_url: Option<String>,
    pub status: VehicleStatus,
    pub created_at: String,
}

/// Vehicle record as returned by the API, with JSON columns decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleResponse {
    pub id: String,
    pub partner_id: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub vin: String,
    pub license_plate: String,
    pub base_price_per_day: f64,
    pub location: Option<String>,
    pub description: Option<String>,
    pub photo_urls: Vec<String>,
    pub features: Option<Value>,
    pub ownership_docs_url: Option<String>,
    pub status: VehicleStatus,
    pub created_at: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            photo_urls: parse_string_list(vehicle.photo_urls.as_deref()),
            features: parse_json_object(vehicle.features.as_deref()),
            id: vehicle.id,
            partner_id: vehicle.partner_id,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            vin: vehicle.vin,
            license_plate: vehicle.license_plate,
            base_price_per_day: vehicle.base_price_per_day,
            location: vehicle.location,
            description: vehicle.description,
            ownership_docs_url: vehicle.ownership_docs_url,
            status: vehicle.status,
            created_at: vehicle.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub make: String,
    pub model: String,
    pub year: i64,
    pub vin: String,
    pub license_plate: String,
    pub base_price_per_day: f64,
    pub location: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    pub features: Option<Value>,
    pub description: Option<String>,
    pub ownership_docs_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVehicleStatusRequest {
    pub status: VehicleStatus,
}

/// Approval-queue row: vehicle joined with partner identity.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PendingVehicle {
    pub id: String,
    pub partner_id: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub vin: String,
    pub license_plate: String,
    pub base_price_per_day: f64,
    pub status: VehicleStatus,
    pub created_at: String,
    pub partner_email: String,
    pub partner_first_name: Option<String>,
    pub partner_last_name: Option<String>,
}
