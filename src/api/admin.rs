//! Admin endpoints: dashboard overview, approval queues, and the
//! verification/approval status updates.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::{
    PendingVehicle, UpdateVehicleStatusRequest, UpdateVerificationRequest, User, UserResponse,
    UserRole, Vehicle, VehicleResponse, VehicleStatus, VerificationStatus,
};
use crate::AppState;

use super::error::ApiError;
use super::validation::validate_uuid;

/// Marketplace-wide counts for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub total_users: i64,
    pub total_vehicles: i64,
    pub active_vehicles: i64,
    pub pending_renters: i64,
    pub pending_partners: i64,
    pub pending_vehicles: i64,
}

/// Get marketplace-wide counts.
///
/// Each count is a separate query: the result is a dashboard view of the
/// row set at call time, not a transactional snapshot.
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let (total_users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db)
        .await?;

    let (total_vehicles,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
        .fetch_one(&state.db)
        .await?;

    let (active_vehicles,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE status = ?")
            .bind(VehicleStatus::Active)
            .fetch_one(&state.db)
            .await?;

    let (pending_renters,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = ? AND verification_status = ?")
            .bind(UserRole::Renter)
            .bind(VerificationStatus::Pending)
            .fetch_one(&state.db)
            .await?;

    let (pending_partners,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = ? AND verification_status = ?")
            .bind(UserRole::Partner)
            .bind(VerificationStatus::Pending)
            .fetch_one(&state.db)
            .await?;

    let (pending_vehicles,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE status IN (?, ?)")
            .bind(VehicleStatus::Draft)
            .bind(VehicleStatus::PendingApproval)
            .fetch_one(&state.db)
            .await?;

    Ok(Json(OverviewResponse {
        total_users,
        total_vehicles,
        active_vehicles,
        pending_renters,
        pending_partners,
        pending_vehicles,
    }))
}

/// List partners awaiting verification, newest id first
pub async fn pending_partners(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE role = ? AND verification_status = ? ORDER BY id DESC",
    )
    .bind(UserRole::Partner)
    .bind(VerificationStatus::Pending)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// List vehicles awaiting approval (DRAFT or PENDING_APPROVAL), joined with
/// partner identity, newest manufacture year first
pub async fn pending_vehicles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PendingVehicle>>, ApiError> {
    let vehicles = sqlx::query_as::<_, PendingVehicle>(
        r#"
        SELECT v.id, v.partner_id, v.make, v.model, v.year, v.vin, v.license_plate,
               v.base_price_per_day, v.status, v.created_at,
               u.email AS partner_email,
               u.first_name AS partner_first_name,
               u.last_name AS partner_last_name
        FROM vehicles v
        JOIN users u ON u.id = v.partner_id
        WHERE v.status IN (?, ?)
        ORDER BY v.year DESC
        "#,
    )
    .bind(VehicleStatus::Draft)
    .bind(VehicleStatus::PendingApproval)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(vehicles))
}

/// Update a partner's verification status. The target must exist and be a
/// PARTNER; in permissive mode any target status is written unconditionally.
pub async fn update_partner_verification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateVerificationRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    if let Err(e) = validate_uuid(&id, "partner_id") {
        return Err(ApiError::validation_field("partner_id", e));
    }

    let mut tx = state.db.begin().await?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_optional(&mut *tx)
        .await?;

    let user = match user {
        Some(u) if u.role == UserRole::Partner => u,
        _ => return Err(ApiError::not_found("Partner not found")),
    };

    if state.config.workflow.strict_transitions
        && !user.verification_status.can_transition_to(req.status)
    {
        return Err(ApiError::conflict(format!(
            "Cannot change verification status from {} to {}",
            user.verification_status.as_str(),
            req.status.as_str()
        )));
    }

    sqlx::query("UPDATE users SET verification_status = ? WHERE id = ?")
        .bind(req.status)
        .bind(&id)
        .execute(&mut *tx)
        .await?;

    let updated = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(partner_id = %id, status = req.status.as_str(), "Partner verification updated");

    Ok(Json(UserResponse::from(updated)))
}

/// Update a vehicle's lifecycle status. In permissive mode any target
/// status is written unconditionally.
pub async fn update_vehicle_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateVehicleStatusRequest>,
) -> Result<Json<VehicleResponse>, ApiError> {
    if let Err(e) = validate_uuid(&id, "vehicle_id") {
        return Err(ApiError::validation_field("vehicle_id", e));
    }

    let mut tx = state.db.begin().await?;

    let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = ?")
        .bind(&id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle not found"))?;

    if state.config.workflow.strict_transitions && !vehicle.status.can_transition_to(req.status) {
        return Err(ApiError::conflict(format!(
            "Cannot change vehicle status from {} to {}",
            vehicle.status.as_str(),
            req.status.as_str()
        )));
    }

    sqlx::query("UPDATE vehicles SET status = ? WHERE id = ?")
        .bind(req.status)
        .bind(&id)
        .execute(&mut *tx)
        .await?;

    let updated = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = ?")
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(vehicle_id = %id, status = req.status.as_str(), "Vehicle status updated");

    Ok(Json(VehicleResponse::from(updated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ErrorCode;
    use crate::config::Config;
    use crate::db::{self, CreatePartnerRequest, CreateVehicleRequest};

    const MISSING_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    async fn state_with(strict: bool) -> Arc<AppState> {
        let pool = db::connect_memory().await.unwrap();
        let mut config = Config::default();
        config.workflow.strict_transitions = strict;
        Arc::new(AppState::new(config, pool))
    }

    async fn seed_partner(state: &Arc<AppState>, email: &str) -> UserResponse {
        let (_, Json(user)) = super::super::partners::create_partner(
            State(state.clone()),
            Json(CreatePartnerRequest {
                email: email.to_string(),
                password: "secret1".to_string(),
                first_name: Some("Ada".to_string()),
                last_name: None,
                phone_number: None,
            }),
        )
        .await
        .unwrap();
        user
    }

    async fn seed_vehicle(
        state: &Arc<AppState>,
        partner_id: &str,
        vin: &str,
        plate: &str,
        year: i64,
    ) -> VehicleResponse {
        let (_, Json(vehicle)) = super::super::vehicles::create_vehicle(
            State(state.clone()),
            Path(partner_id.to_string()),
            Json(CreateVehicleRequest {
                make: "Toyota".to_string(),
                model: "Corolla".to_string(),
                year,
                vin: vin.to_string(),
                license_plate: plate.to_string(),
                base_price_per_day: 42.0,
                location: None,
                photo_urls: None,
                features: None,
                description: None,
                ownership_docs_url: None,
            }),
        )
        .await
        .unwrap();
        vehicle
    }

    async fn seed_renter(state: &Arc<AppState>, email: &str) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, verification_status, created_at)
            VALUES (?, ?, 'x', ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(email)
        .bind(UserRole::Renter)
        .bind(VerificationStatus::Pending)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&state.db)
        .await
        .unwrap();
        id
    }

    async fn set_verification(state: &Arc<AppState>, id: &str, status: VerificationStatus) {
        sqlx::query("UPDATE users SET verification_status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&state.db)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_verification_unknown_id_is_not_found() {
        let state = state_with(false).await;

        let err = update_partner_verification(
            State(state.clone()),
            Path(MISSING_ID.to_string()),
            Json(UpdateVerificationRequest {
                status: VerificationStatus::Verified,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_update_verification_renter_is_not_found() {
        let state = state_with(false).await;
        let renter_id = seed_renter(&state, "r@b.com").await;

        let err = update_partner_verification(
            State(state.clone()),
            Path(renter_id.clone()),
            Json(UpdateVerificationRequest {
                status: VerificationStatus::Verified,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotFound);

        // No write happened
        let row: User = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(&renter_id)
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(row.verification_status, VerificationStatus::Pending);
    }

    #[tokio::test]
    async fn test_permissive_mode_overwrites_any_pair() {
        let state = state_with(false).await;
        let partner = seed_partner(&state, "a@b.com").await;

        let all = [
            VerificationStatus::Pending,
            VerificationStatus::Verified,
            VerificationStatus::Rejected,
        ];

        for current in all {
            for target in all {
                set_verification(&state, &partner.id, current).await;

                let Json(updated) = update_partner_verification(
                    State(state.clone()),
                    Path(partner.id.clone()),
                    Json(UpdateVerificationRequest { status: target }),
                )
                .await
                .unwrap();

                assert_eq!(updated.verification_status, target);
            }
        }
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_illegal_verification_moves() {
        let state = state_with(true).await;
        let partner = seed_partner(&state, "a@b.com").await;

        set_verification(&state, &partner.id, VerificationStatus::Verified).await;

        let err = update_partner_verification(
            State(state.clone()),
            Path(partner.id.clone()),
            Json(UpdateVerificationRequest {
                status: VerificationStatus::Pending,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);

        // State is unchanged
        let row: User = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(&partner.id)
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(row.verification_status, VerificationStatus::Verified);
    }

    #[tokio::test]
    async fn test_update_vehicle_status_unknown_id_is_not_found() {
        let state = state_with(false).await;

        let err = update_vehicle_status(
            State(state.clone()),
            Path(MISSING_ID.to_string()),
            Json(UpdateVehicleStatusRequest {
                status: VehicleStatus::Active,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_strict_mode_vehicle_transitions() {
        let state = state_with(true).await;
        let partner = seed_partner(&state, "a@b.com").await;
        let vehicle = seed_vehicle(&state, &partner.id, "1HGCM82633A004352", "AB-123-CD", 2021).await;

        // DRAFT -> ACTIVE skips review
        let err = update_vehicle_status(
            State(state.clone()),
            Path(vehicle.id.clone()),
            Json(UpdateVehicleStatusRequest {
                status: VehicleStatus::Active,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);

        // DRAFT -> PENDING_APPROVAL -> ACTIVE is the legal path
        update_vehicle_status(
            State(state.clone()),
            Path(vehicle.id.clone()),
            Json(UpdateVehicleStatusRequest {
                status: VehicleStatus::PendingApproval,
            }),
        )
        .await
        .unwrap();
        let Json(updated) = update_vehicle_status(
            State(state.clone()),
            Path(vehicle.id.clone()),
            Json(UpdateVehicleStatusRequest {
                status: VehicleStatus::Active,
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, VehicleStatus::Active);
    }

    #[tokio::test]
    async fn test_pending_partners_queue() {
        let state = state_with(false).await;
        let verified = seed_partner(&state, "verified@b.com").await;
        let pending = seed_partner(&state, "pending@b.com").await;
        seed_renter(&state, "renter@b.com").await;

        update_partner_verification(
            State(state.clone()),
            Path(verified.id.clone()),
            Json(UpdateVerificationRequest {
                status: VerificationStatus::Verified,
            }),
        )
        .await
        .unwrap();

        let Json(queue) = pending_partners(State(state.clone())).await.unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, pending.id);
    }

    #[tokio::test]
    async fn test_pending_vehicles_queue_and_order() {
        let state = state_with(false).await;
        let partner = seed_partner(&state, "a@b.com").await;
        let old = seed_vehicle(&state, &partner.id, "1HGCM82633A004352", "AB-123-CD", 2018).await;
        let new = seed_vehicle(&state, &partner.id, "WDBRF40J13F381273", "EF-456-GH", 2024).await;
        let active = seed_vehicle(&state, &partner.id, "JH4KA7561PC008269", "IJ-789-KL", 2022).await;

        update_vehicle_status(
            State(state.clone()),
            Path(active.id.clone()),
            Json(UpdateVehicleStatusRequest {
                status: VehicleStatus::Active,
            }),
        )
        .await
        .unwrap();

        let Json(queue) = pending_vehicles(State(state.clone())).await.unwrap();

        assert_eq!(queue.len(), 2);
        // Newest manufacture year first
        assert_eq!(queue[0].id, new.id);
        assert_eq!(queue[1].id, old.id);
        // Partner identity is populated
        assert_eq!(queue[0].partner_email, "a@b.com");
        assert_eq!(queue[0].partner_first_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_overview_counts() {
        let state = state_with(false).await;
        let partner = seed_partner(&state, "a@b.com").await;
        seed_partner(&state, "b@b.com").await;
        seed_renter(&state, "renter@b.com").await;

        seed_vehicle(&state, &partner.id, "1HGCM82633A004352", "AB-123-CD", 2021).await;
        let approved =
            seed_vehicle(&state, &partner.id, "WDBRF40J13F381273", "EF-456-GH", 2022).await;
        update_vehicle_status(
            State(state.clone()),
            Path(approved.id.clone()),
            Json(UpdateVehicleStatusRequest {
                status: VehicleStatus::Active,
            }),
        )
        .await
        .unwrap();

        let Json(overview) = get_overview(State(state.clone())).await.unwrap();

        assert_eq!(overview.total_users, 3);
        assert_eq!(overview.total_vehicles, 2);
        assert_eq!(overview.active_vehicles, 1);
        assert_eq!(overview.pending_renters, 1);
        assert_eq!(overview.pending_partners, 2);
        assert_eq!(overview.pending_vehicles, 1);
    }

    #[tokio::test]
    async fn test_updated_record_is_returned() {
        let state = state_with(false).await;
        let partner = seed_partner(&state, "a@b.com").await;
        let vehicle = seed_vehicle(&state, &partner.id, "1HGCM82633A004352", "AB-123-CD", 2021).await;

        let Json(updated) = update_vehicle_status(
            State(state.clone()),
            Path(vehicle.id.clone()),
            Json(UpdateVehicleStatusRequest {
                status: VehicleStatus::Inactive,
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.id, vehicle.id);
        assert_eq!(updated.status, VehicleStatus::Inactive);

        // Sanity: handler result matches the stored row
        let row: Vehicle = sqlx::query_as("SELECT * FROM vehicles WHERE id = ?")
            .bind(&vehicle.id)
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(row.status, VehicleStatus::Inactive);
    }
}
