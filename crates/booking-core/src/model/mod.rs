//! Response models of the booking API.
//!
//! Field names follow the camelCase wire format through serde renames.

mod booking;
mod facility;
mod profile;

pub use booking::{Booking, BookingQuery, BookingStatus, BookingsPage, SortDirection};
pub use facility::{DailyAvailability, Facility, FacilityDetail, FacilityStatus, MonthlyAvailability, TimeSlot};
pub use profile::UserProfile;
