//! Vehicle listing endpoints for partners.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    serialize_json_object, serialize_string_list, CreateVehicleRequest, User, Vehicle,
    VehicleResponse, VehicleStatus,
};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{
    validate_description, validate_features, validate_license_plate, validate_location,
    validate_make, validate_model, validate_photo_urls, validate_price, validate_url,
    validate_uuid, validate_vin, validate_year,
};

/// Validate a CreateVehicleRequest
fn validate_create_request(req: &CreateVehicleRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_make(&req.make) {
        errors.add("make", &e);
    }

    if let Err(e) = validate_model(&req.model) {
        errors.add("model", &e);
    }

    if let Err(e) = validate_year(req.year) {
        errors.add("year", &e);
    }

    if let Err(e) = validate_vin(&req.vin) {
        errors.add("vin", &e);
    }

    if let Err(e) = validate_license_plate(&req.license_plate) {
        errors.add("license_plate", &e);
    }

    if let Err(e) = validate_price(req.base_price_per_day) {
        errors.add("base_price_per_day", &e);
    }

    if let Err(e) = validate_location(&req.location) {
        errors.add("location", &e);
    }

    if let Err(e) = validate_photo_urls(&req.photo_urls) {
        errors.add("photo_urls", &e);
    }

    if let Err(e) = validate_features(&req.features) {
        errors.add("features", &e);
    }

    if let Err(e) = validate_description(&req.description) {
        errors.add("description", &e);
    }

    if let Err(e) = validate_url(&req.ownership_docs_url, "ownership_docs_url") {
        errors.add("ownership_docs_url", &e);
    }

    errors.finish()
}

/// Create a vehicle listing under a partner. Status is forced to DRAFT.
pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    Path(partner_id): Path<String>,
    Json(req): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<VehicleResponse>), ApiError> {
    if let Err(e) = validate_uuid(&partner_id, "partner_id") {
        return Err(ApiError::validation_field("partner_id", e));
    }

    validate_create_request(&req)?;

    let mut tx = state.db.begin().await?;

    let partner = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&partner_id)
        .fetch_optional(&mut *tx)
        .await?;

    if partner.is_none() {
        return Err(ApiError::not_found("Partner not found"));
    }

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();
    let photo_urls = serialize_string_list(req.photo_urls.as_deref().unwrap_or(&[]));
    let features = serialize_json_object(req.features.as_ref());

    sqlx::query(
        r#"
        INSERT INTO vehicles (id, partner_id, make, model, year, vin, license_plate,
                              base_price_per_day, location, description, photo_urls,
                              features, ownership_docs_url, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&partner_id)
    .bind(&req.make)
    .bind(&req.model)
    .bind(req.year)
    .bind(&req.vin)
    .bind(&req.license_plate)
    .bind(req.base_price_per_day)
    .bind(&req.location)
    .bind(&req.description)
    .bind(&photo_urls)
    .bind(&features)
    .bind(&req.ownership_docs_url)
    .bind(VehicleStatus::Draft)
    .bind(&now)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        let msg = e.to_string();
        if msg.contains("vehicles.vin") {
            ApiError::conflict("A vehicle with this VIN already exists")
        } else if msg.contains("vehicles.license_plate") {
            ApiError::conflict("A vehicle with this license plate already exists")
        } else if msg.contains("UNIQUE constraint failed") {
            ApiError::conflict("A vehicle with this identifier already exists")
        } else {
            tracing::error!("Failed to create vehicle: {}", e);
            ApiError::database("Failed to create vehicle")
        }
    })?;

    let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = ?")
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(vehicle_id = %vehicle.id, partner_id = %partner_id, "Vehicle listing created");

    Ok((StatusCode::CREATED, Json(VehicleResponse::from(vehicle))))
}

/// List all vehicles for a partner. An unknown partner id yields an empty
/// list, not a 404.
pub async fn list_partner_vehicles(
    State(state): State<Arc<AppState>>,
    Path(partner_id): Path<String>,
) -> Result<Json<Vec<VehicleResponse>>, ApiError> {
    if let Err(e) = validate_uuid(&partner_id, "partner_id") {
        return Err(ApiError::validation_field("partner_id", e));
    }

    let vehicles = sqlx::query_as::<_, Vehicle>(
        "SELECT * FROM vehicles WHERE partner_id = ? ORDER BY created_at DESC",
    )
    .bind(&partner_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(
        vehicles.into_iter().map(VehicleResponse::from).collect(),
    ))
}
