//! Core traits for talking to the booking API.

mod transport;

pub use transport::{TokenRefresher, Transport};
