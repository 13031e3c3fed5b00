//! Typed booking API on top of the gateway.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use booking_core::error::InvalidInputError;
use booking_core::model::{
    Booking, BookingQuery, BookingsPage, DailyAvailability, Facility, FacilityDetail,
    MonthlyAvailability, TimeSlot, UserProfile,
};
use booking_core::{
    ApiRequest, ApiResponse, BookingForm, CredentialStore, CredentialVault, LoginForm,
    RegisterForm, Result, SessionState, TokenPair, UpdateProfileForm, Validate,
};

use crate::client::HttpTransport;
use crate::config::ClientConfig;
use crate::endpoints;
use crate::gateway::Gateway;

/// Client for the facility-booking API.
///
/// Validates forms before sending, maps responses into models and keeps
/// the stored session in step with login and logout. All requests go
/// through one [`Gateway`].
#[derive(Debug, Clone)]
pub struct BookingClient {
    gateway: Gateway,
}

impl BookingClient {
    /// Build a client over HTTP with the given credential store.
    pub async fn connect(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config)?);
        let vault = Arc::new(CredentialVault::open(store).await?);
        debug!(api = %config.api_url, session = ?vault.state(), "Booking client ready");
        Ok(Self::from_gateway(Gateway::new(
            vault,
            transport.clone(),
            transport,
        )))
    }

    pub fn from_gateway(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session_state(&self) -> SessionState {
        self.gateway.session_state()
    }

    /// Watch for login, logout and forced logout.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.gateway.subscribe()
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Log in and store the returned token pair.
    #[instrument(skip(self, form), fields(email = %form.email()))]
    pub async fn login(&self, form: &LoginForm) -> Result<()> {
        form.validate()?;
        info!("Logging in");

        let request = ApiRequest::post(endpoints::LOGIN).json(form)?;
        let pair: TokenPair = self.gateway.send(&request).await?.json()?;
        self.gateway.vault().save(&pair).await?;

        debug!("Login successful");
        Ok(())
    }

    /// Create an account, then log in with the same credentials.
    ///
    /// Registration itself returns no tokens.
    #[instrument(skip(self, form), fields(email = %form.email()))]
    pub async fn register(&self, form: &RegisterForm) -> Result<()> {
        form.validate()?;
        info!("Registering account");

        let request = ApiRequest::post(endpoints::REGISTER).json(form)?;
        self.gateway.send(&request).await?;

        self.login(&form.to_login()).await
    }

    /// End the server session, then forget the local tokens.
    ///
    /// Local tokens are kept if the server refuses the logout.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.gateway.send(&ApiRequest::post(endpoints::LOGOUT)).await?;
        self.gateway.vault().clear().await?;
        info!("Logged out");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<UserProfile> {
        self.get(ApiRequest::get(endpoints::PROFILE)).await
    }

    #[instrument(skip(self, form))]
    pub async fn update_profile(&self, form: &UpdateProfileForm) -> Result<UserProfile> {
        form.validate()?;
        let request = ApiRequest::patch(endpoints::PROFILE).json(form)?;
        self.get(request).await
    }

    // ========================================================================
    // Facilities
    // ========================================================================

    /// Search facilities by name; an empty search lists all of them.
    #[instrument(skip(self))]
    pub async fn facilities(&self, search: &str) -> Result<Vec<Facility>> {
        let request = ApiRequest::get(endpoints::FACILITIES).query("search", search);
        let response = self.gateway.send(&request).await?;
        decode_or_default(response)
    }

    #[instrument(skip(self))]
    pub async fn facility(&self, id: u64) -> Result<FacilityDetail> {
        self.get(ApiRequest::get(endpoints::facility(id))).await
    }

    /// Hourly slots for one day.
    #[instrument(skip(self))]
    pub async fn daily_availability(&self, id: u64, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        let request = ApiRequest::get(endpoints::daily_availability(id))
            .query("date", date.format("%Y-%m-%d"));
        let response = self.gateway.send(&request).await?;
        let daily: DailyAvailability = decode_or_default(response)?;
        Ok(daily.time_slots.unwrap_or_default())
    }

    /// Per-day "fully booked" flags for a month.
    #[instrument(skip(self))]
    pub async fn monthly_availability(
        &self,
        id: u64,
        year: i32,
        month: u32,
    ) -> Result<Vec<MonthlyAvailability>> {
        if !(1..=12).contains(&month) {
            return Err(InvalidInputError::Other {
                message: format!("month must be between 1 and 12, got {}", month),
            }
            .into());
        }

        let request = ApiRequest::get(endpoints::monthly_availability(id))
            .query("year", year)
            .query("month", month);
        let response = self.gateway.send(&request).await?;
        decode_or_default(response)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn my_bookings(&self, query: &BookingQuery) -> Result<BookingsPage> {
        let request = query
            .to_params()
            .into_iter()
            .fold(ApiRequest::get(endpoints::MY_BOOKINGS), |req, (key, value)| {
                req.query(key, value)
            });
        self.get(request).await
    }

    /// Book a slot.
    ///
    /// Any 2xx answer means the booking exists. The created booking is
    /// returned when the body carries one, bare or under `data`.
    #[instrument(skip(self, form), fields(facility_id = form.facility_id))]
    pub async fn create_booking(&self, form: &BookingForm) -> Result<Option<Booking>> {
        form.validate()?;
        info!(date = %form.booking_date, hour = ?form.start_hour, "Creating booking");
        let request = ApiRequest::post(endpoints::BOOKINGS).json(form)?;
        let response = self.gateway.send(&request).await?;

        let booking = created_booking(response.body());
        if booking.is_none() {
            debug!("Booking created; response carried no booking");
        }
        Ok(booking)
    }

    #[instrument(skip(self))]
    pub async fn cancel_booking(&self, id: u64) -> Result<()> {
        info!("Cancelling booking");
        self.gateway
            .send(&ApiRequest::delete(endpoints::booking(id)))
            .await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.gateway.send(&request).await?.json()
    }
}

/// The booking in a create response, bare or wrapped in `data`.
fn created_booking(body: &serde_json::Value) -> Option<Booking> {
    let candidate = body.get("data").unwrap_or(body);
    Booking::deserialize(candidate).ok()
}

/// Decode a body that the API may leave empty.
fn decode_or_default<T: DeserializeOwned + Default>(response: ApiResponse) -> Result<T> {
    if response.body().is_null() {
        Ok(T::default())
    } else {
        response.json()
    }
}
