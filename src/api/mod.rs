mod admin;
pub mod auth;
mod availability;
mod error;
mod partners;
mod validation;
mod vehicles;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // The React client is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Partners
        .route("/partners", post(partners::create_partner))
        .route("/partners/:partner_id/vehicles", post(vehicles::create_vehicle))
        .route("/partners/:partner_id/vehicles", get(vehicles::list_partner_vehicles))
        // Availability
        .route("/vehicles/:vehicle_id/availability", post(availability::create_slot))
        .route("/vehicles/:vehicle_id/availability", get(availability::list_slots))
        // Admin
        .route("/admin/overview", get(admin::get_overview))
        .route("/admin/partners/pending", get(admin::pending_partners))
        .route("/admin/vehicles/pending", get(admin::pending_vehicles))
        .route("/admin/partners/:id/verification", patch(admin::update_partner_verification))
        .route("/admin/vehicles/:id/status", patch(admin::update_vehicle_status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
