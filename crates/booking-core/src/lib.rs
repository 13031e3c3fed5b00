//! booking-core - Core types and traits for the facility-booking client.
//!
//! This crate holds everything that does not touch the network: response
//! models, client-side form validation, token types, credential storage and
//! the [`Transport`]/[`TokenRefresher`] seams that the HTTP crate implements.

pub mod error;
pub mod forms;
pub mod model;
pub mod request;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use error::Error;
pub use forms::{BookingForm, LoginForm, RegisterForm, UpdateProfileForm, Validate, ValidationErrors};
pub use request::{ApiRequest, ApiResponse, Method};
pub use store::{CredentialStore, CredentialVault, MemoryCredentialStore, SessionState, TokenKey};
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use traits::{TokenRefresher, Transport};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
