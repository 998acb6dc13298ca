//! Availability slot models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    Available,
    Booked,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "AVAILABLE",
            AvailabilityStatus::Booked => "BOOKED",
        }
    }
}

/// A bookable time window on a vehicle. Timestamps are RFC 3339 strings
/// normalized to whole-second UTC, so string order is chronological order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Availability {
    pub id: String,
    pub vehicle_id: String,
    pub start_time: String,
    pub end_time: String,
    pub status: AvailabilityStatus,
}

#[derive(Debug, Deserialize)]
pub struct CreateAvailabilityRequest {
    pub start_time: String,
    pub end_time: String,
    pub status: Option<AvailabilityStatus>,
}
