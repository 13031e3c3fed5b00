//! Authenticated request gateway.
//!
//! Every API call goes through [`Gateway::send`]. The gateway attaches the
//! stored access token, and when the API answers 401 it refreshes the token
//! pair once and retries the call once. If the session cannot be recovered
//! the stored credentials are cleared and the error goes back to the caller.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use booking_core::error::AuthError;
use booking_core::{
    AccessToken, ApiRequest, ApiResponse, CredentialVault, Error, RefreshToken, Result,
    SessionState, TokenPair, TokenRefresher, Transport,
};

/// Where a single call is in its refresh-and-retry cycle.
///
/// Advanced to `Refreshed` before the refresh starts, so a call never gets a
/// second cycle whether or not the refresh succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Initial,
    Refreshed,
}

/// Sends API requests with bearer authorization and silent token refresh.
///
/// Cheap to clone; clones share the credential vault and the refresh guard,
/// so concurrent 401s across clones result in a single refresh call.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    vault: Arc<CredentialVault>,
    transport: Arc<dyn Transport>,
    refresher: Arc<dyn TokenRefresher>,
    refresh_guard: Mutex<()>,
}

impl Gateway {
    pub fn new(
        vault: Arc<CredentialVault>,
        transport: Arc<dyn Transport>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Self {
        Self {
            inner: Arc::new(GatewayInner {
                vault,
                transport,
                refresher,
                refresh_guard: Mutex::new(()),
            }),
        }
    }

    /// The credential vault backing this gateway.
    pub fn vault(&self) -> &CredentialVault {
        &self.inner.vault
    }

    /// Session state as of the last load, save or clear.
    pub fn session_state(&self) -> SessionState {
        self.inner.vault.state()
    }

    /// Watch for session changes, including forced logouts.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.vault.subscribe()
    }

    /// Send a request, refreshing the session at most once on 401.
    ///
    /// # Errors
    ///
    /// - the original 401 when no refresh token is stored (session cleared)
    /// - [`AuthError::RefreshFailed`] when the refresh itself failed
    ///   (session cleared)
    /// - the retried call's error, unchanged, after a successful refresh
    /// - any other API or transport error, unchanged
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut attempt = Attempt::Initial;
        let mut token = self.inner.vault.access_token().await?;

        loop {
            debug!(?attempt, authenticated = token.is_some(), "Sending request");
            match self.inner.transport.execute(request, token.as_ref()).await {
                Err(err) if err.is_unauthorized() && attempt == Attempt::Initial => {
                    attempt = Attempt::Refreshed;
                    token = Some(self.renew(token.as_ref(), err).await?);
                }
                Err(err) => {
                    if err.is_unauthorized() {
                        warn!("Request rejected again after token refresh");
                    }
                    return Err(err);
                }
                Ok(response) => return Ok(response),
            }
        }
    }

    /// Obtain a usable access token after `rejected` was refused.
    ///
    /// Serialized behind the refresh guard. If another call already rotated
    /// the pair while this one waited, its token is reused without a second
    /// refresh.
    async fn renew(&self, rejected: Option<&AccessToken>, original: Error) -> Result<AccessToken> {
        let _guard = self.inner.refresh_guard.lock().await;

        if let Some(current) = self.inner.vault.access_token().await?
            && Some(&current) != rejected
        {
            debug!("Token pair already rotated by a concurrent request");
            return Ok(current);
        }

        let Some(refresh_token) = self.inner.vault.refresh_token().await? else {
            warn!("Access token rejected and no refresh token stored");
            self.force_logout().await;
            return Err(original);
        };

        info!("Access token rejected; refreshing session");
        match self.refresh_pair(&refresh_token).await {
            Ok(pair) => {
                info!("Session refreshed");
                Ok(pair.access_token)
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed; clearing session");
                self.force_logout().await;
                Err(AuthError::RefreshFailed(Box::new(err)).into())
            }
        }
    }

    /// Refresh and persist. A store write error counts as a refresh failure.
    async fn refresh_pair(&self, refresh_token: &RefreshToken) -> Result<TokenPair> {
        let pair = self.inner.refresher.refresh(refresh_token).await?;
        self.inner.vault.save(&pair).await?;
        Ok(pair)
    }

    async fn force_logout(&self) {
        if let Err(e) = self.inner.vault.clear().await {
            warn!(error = %e, "Failed to clear stored credentials");
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("session", &self.session_state())
            .finish()
    }
}
