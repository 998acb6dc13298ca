//! Availability slot endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::SecondsFormat;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{Availability, AvailabilityStatus, CreateAvailabilityRequest, Vehicle};
use crate::AppState;

use super::error::ApiError;
use super::validation::{parse_timestamp, validate_uuid};

/// Create an availability slot on a vehicle. Status defaults to AVAILABLE.
///
/// Timestamps are normalized to whole-second UTC before storage so that
/// string comparison in SQL is chronological comparison.
pub async fn create_slot(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<String>,
    Json(req): Json<CreateAvailabilityRequest>,
) -> Result<(StatusCode, Json<Availability>), ApiError> {
    if let Err(e) = validate_uuid(&vehicle_id, "vehicle_id") {
        return Err(ApiError::validation_field("vehicle_id", e));
    }

    let start = parse_timestamp(&req.start_time, "start_time")
        .map_err(|e| ApiError::validation_field("start_time", e))?;
    let end = parse_timestamp(&req.end_time, "end_time")
        .map_err(|e| ApiError::validation_field("end_time", e))?;

    if start >= end {
        return Err(ApiError::validation_field(
            "end_time",
            "end_time must be after start_time",
        ));
    }

    let start_time = start.to_rfc3339_opts(SecondsFormat::Secs, true);
    let end_time = end.to_rfc3339_opts(SecondsFormat::Secs, true);
    let status = req.status.unwrap_or(AvailabilityStatus::Available);

    let mut tx = state.db.begin().await?;

    let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = ?")
        .bind(&vehicle_id)
        .fetch_optional(&mut *tx)
        .await?;

    if vehicle.is_none() {
        return Err(ApiError::not_found("Vehicle not found"));
    }

    if state.config.workflow.reject_overlapping_slots {
        let (overlapping,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM availability WHERE vehicle_id = ? AND start_time < ? AND end_time > ?",
        )
        .bind(&vehicle_id)
        .bind(&end_time)
        .bind(&start_time)
        .fetch_one(&mut *tx)
        .await?;

        if overlapping > 0 {
            return Err(ApiError::conflict(
                "Slot overlaps an existing availability window for this vehicle",
            ));
        }
    }

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO availability (id, vehicle_id, start_time, end_time, status)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&vehicle_id)
    .bind(&start_time)
    .bind(&end_time)
    .bind(status)
    .execute(&mut *tx)
    .await?;

    let slot = sqlx::query_as::<_, Availability>("SELECT * FROM availability WHERE id = ?")
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(slot_id = %slot.id, vehicle_id = %vehicle_id, "Availability slot created");

    Ok((StatusCode::CREATED, Json(slot)))
}

/// List all slots for a vehicle, earliest first. An unknown vehicle id
/// yields an empty list, not a 404.
pub async fn list_slots(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<Vec<Availability>>, ApiError> {
    if let Err(e) = validate_uuid(&vehicle_id, "vehicle_id") {
        return Err(ApiError::validation_field("vehicle_id", e));
    }

    let slots = sqlx::query_as::<_, Availability>(
        "SELECT * FROM availability WHERE vehicle_id = ? ORDER BY start_time ASC",
    )
    .bind(&vehicle_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(slots))
}
