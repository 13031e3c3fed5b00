//! Error types for the booking client.
//!
//! One unified error type with explicit variants for transport, API,
//! authentication, credential storage and input validation failures.

use std::fmt;
use thiserror::Error;

use crate::forms::ValidationErrors;

/// The unified error type for booking client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, malformed HTTP).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-success status.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Session errors that the client could not recover from.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The credential store failed to read or write.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    /// Client-side form validation rejected the input.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Malformed configuration or arguments (base URL and similar).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A response body did not match the expected shape.
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl Error {
    /// HTTP status behind this error, if any.
    ///
    /// Looks through [`AuthError::RefreshFailed`] so the refresh endpoint's
    /// status stays reachable.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status),
            Error::Auth(AuthError::RefreshFailed(inner)) => inner.status(),
            _ => None,
        }
    }

    /// True when the API rejected the request's authorization (HTTP 401).
    ///
    /// A refresh failure is not reported here even if the refresh endpoint
    /// itself answered 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(err) if err.is_unauthorized())
    }

    /// True when the caller must send the user back through login.
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            Error::Auth(AuthError::RefreshFailed(_) | AuthError::NotAuthenticated)
        ) || self.is_unauthorized()
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success response from the booking API.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Message from the server's error body, if it carried one.
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Build an API error from a status and a raw error body.
    ///
    /// The server reports `message` either as a string or as a list of
    /// strings (one per rejected field).
    pub fn from_body(status: u16, body: &serde_json::Value) -> Self {
        let message = match body.get("message") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Array(items)) => {
                let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        };
        Self::new(status, message)
    }

    /// Check if this is an authorization rejection.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Check if this is a booking conflict.
    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }
}

/// Session errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The silent token refresh failed; the stored session has been cleared.
    #[error("token refresh failed: {0}")]
    RefreshFailed(#[source] Box<Error>),

    /// No session is stored locally.
    #[error("not logged in")]
    NotAuthenticated,
}

/// Credential store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage could not be read or written.
    #[error("storage backend failed: {message}")]
    Backend { message: String },

    /// The stored data could not be parsed.
    #[error("stored credentials are corrupt: {message}")]
    Corrupt { message: String },
}

/// Input validation errors outside of forms.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
