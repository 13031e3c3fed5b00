//! Booking API paths and auth request/response bodies.

use serde::{Deserialize, Serialize};

use booking_core::TokenPair;

// ============================================================================
// Paths
// ============================================================================

pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";
pub const REFRESH: &str = "/auth/refresh";
pub const LOGOUT: &str = "/auth/logout";
pub const PROFILE: &str = "/auth/profile";

pub const FACILITIES: &str = "/facilities";
pub const BOOKINGS: &str = "/facilities/bookings";
pub const MY_BOOKINGS: &str = "/facilities/bookings/my";

pub fn facility(id: u64) -> String {
    format!("{}/{}", FACILITIES, id)
}

pub fn daily_availability(id: u64) -> String {
    format!("{}/{}/availability/daily", FACILITIES, id)
}

pub fn monthly_availability(id: u64) -> String {
    format!("{}/{}/availability/monthly", FACILITIES, id)
}

pub fn booking(id: u64) -> String {
    format!("{}/{}", BOOKINGS, id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for the refresh endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response from the refresh endpoint; the pair sits under `data`.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub data: TokenPair,
}
