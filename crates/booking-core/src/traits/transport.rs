//! Network seams used by the request gateway.

use async_trait::async_trait;

use crate::request::{ApiRequest, ApiResponse};
use crate::tokens::{AccessToken, RefreshToken, TokenPair};
use crate::Result;

/// Sends one request to the booking API.
///
/// Implementations map non-2xx statuses to [`crate::Error::Api`] and network
/// failures to [`crate::Error::Transport`]. They never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request`, with `Authorization: Bearer <token>` when a token is
    /// given.
    async fn execute(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<ApiResponse>;
}

/// Exchanges a refresh token for a new token pair.
///
/// Must not route through the gateway's injection and retry path.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<TokenPair>;
}
