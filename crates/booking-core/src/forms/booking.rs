//! Booking creation form.

use chrono::NaiveDate;
use serde::Serialize;

use super::{Validate, ValidationErrors, is_date_shaped};

/// A request to book one hour of a facility.
///
/// `start_hour` is `None` until the user picks a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub facility_id: u64,
    pub booking_date: String,
    pub start_hour: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookingForm {
    pub fn new(facility_id: u64, booking_date: impl Into<String>, start_hour: Option<u8>) -> Self {
        Self {
            facility_id,
            booking_date: booking_date.into(),
            start_hour,
            notes: None,
        }
    }

    /// Attach free-text notes; blank notes are dropped.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = (!notes.trim().is_empty()).then_some(notes);
        self
    }
}

impl Validate for BookingForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(self.facility_id > 0, "facilityId", "Facility ID is required.");

        let well_formed = is_date_shaped(&self.booking_date)
            && NaiveDate::parse_from_str(&self.booking_date, "%Y-%m-%d").is_ok();
        errors.check(well_formed, "bookingDate", "Invalid date format");

        errors.check(
            self.start_hour.is_some_and(|hour| hour < 24),
            "startHour",
            "Please select a time slot",
        );
        errors.into_result()
    }
}
