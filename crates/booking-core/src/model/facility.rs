//! Facility and availability models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational status of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityStatus {
    Active,
    Inactive,
    Maintenance,
}

impl fmt::Display for FacilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FacilityStatus::Active => "active",
            FacilityStatus::Inactive => "inactive",
            FacilityStatus::Maintenance => "maintenance",
        })
    }
}

/// A facility as listed by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub status: FacilityStatus,
}

/// A facility with its booking capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityDetail {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub max_capacity: u32,
    pub status: FacilityStatus,
}

/// One bookable hour on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub hour: u8,
    pub start_time: String,
    pub end_time: String,
    pub available: bool,
    #[serde(default)]
    pub current_bookings: u32,
    #[serde(default)]
    pub max_capacity: u32,
}

/// Whether a day of the month still has free slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAvailability {
    pub date: NaiveDate,
    pub is_fully_booked: bool,
}

/// Envelope of the daily availability endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAvailability {
    #[serde(default)]
    pub time_slots: Option<Vec<TimeSlot>>,
}
