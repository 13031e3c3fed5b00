//! booking-http - HTTP access to the facility-booking API.
//!
//! [`HttpTransport`] sends single requests with reqwest. [`Gateway`] wraps
//! it with bearer-token injection and a one-shot silent refresh.
//! [`BookingClient`] is the typed API most callers want.
//!
//! ```no_run
//! use std::sync::Arc;
//! use booking_core::{LoginForm, MemoryCredentialStore};
//! use booking_http::{BookingClient, ClientConfig};
//!
//! # async fn example() -> Result<(), booking_core::Error> {
//! let client = BookingClient::connect(
//!     &ClientConfig::default(),
//!     Arc::new(MemoryCredentialStore::new()),
//! )
//! .await?;
//!
//! client.login(&LoginForm::new("alice@example.com", "secret")).await?;
//! for facility in client.facilities("court").await? {
//!     println!("{}: {}", facility.id, facility.name);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod config;
pub mod endpoints;
mod gateway;

pub use api::BookingClient;
pub use client::HttpTransport;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use gateway::Gateway;
