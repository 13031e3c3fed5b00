//! Subcommand implementations.

pub mod auth;
pub mod bookings;
pub mod facilities;
pub mod profile;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use booking_core::error::AuthError;
use booking_core::{Error, SessionState};
use booking_http::{BookingClient, ClientConfig};

use crate::cli::GlobalArgs;
use crate::session::FileCredentialStore;

/// Connect to the API with the stored session.
pub async fn connect(global: &GlobalArgs) -> Result<BookingClient> {
    let store = FileCredentialStore::open_default()?;
    let config = ClientConfig::new(global.api_url.clone())
        .with_timeout(Duration::from_secs(global.timeout_secs))
        .with_user_agent(concat!("booking-cli/", env!("BOOKING_VERSION")));

    BookingClient::connect(&config, Arc::new(store))
        .await
        .context("Failed to open stored session")
}

/// Connect, failing early when nobody is logged in.
pub async fn connect_authenticated(global: &GlobalArgs) -> Result<BookingClient> {
    let client = connect(global).await?;
    if client.session_state() == SessionState::Unauthenticated {
        return Err(Error::from(AuthError::NotAuthenticated).into());
    }
    Ok(client)
}
