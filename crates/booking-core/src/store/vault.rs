//! Pair-level access to stored session tokens.

use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tracing::{debug, info, instrument, warn};

use super::{CredentialStore, TokenKey};
use crate::error::StoreError;
use crate::tokens::{AccessToken, RefreshToken, TokenPair};

/// Whether a usable session is stored.
///
/// Derived from the store: `Authenticated` iff both tokens were present at
/// the last check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Unauthenticated,
}

/// Token-pair view over a [`CredentialStore`].
///
/// Writes take an exclusive lock so readers in this process never observe
/// an access token from one pair next to a refresh token from another.
/// Every change of [`SessionState`] is published to subscribers; a forced
/// logout shows up there as `Unauthenticated`.
pub struct CredentialVault {
    store: Arc<dyn CredentialStore>,
    pair_lock: RwLock<()>,
    state: watch::Sender<SessionState>,
}

impl CredentialVault {
    /// Open a vault and derive the initial session state from the store.
    pub async fn open(store: Arc<dyn CredentialStore>) -> Result<Self, StoreError> {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        let vault = Self {
            store,
            pair_lock: RwLock::new(()),
            state,
        };
        vault.load().await?;
        Ok(vault)
    }

    /// The stored access token, if any.
    pub async fn access_token(&self) -> Result<Option<AccessToken>, StoreError> {
        let _guard = self.pair_lock.read().await;
        Ok(self
            .store
            .get(TokenKey::AccessToken)
            .await?
            .map(AccessToken::new))
    }

    /// The stored refresh token, if any.
    pub async fn refresh_token(&self) -> Result<Option<RefreshToken>, StoreError> {
        let _guard = self.pair_lock.read().await;
        Ok(self
            .store
            .get(TokenKey::RefreshToken)
            .await?
            .map(RefreshToken::new))
    }

    /// Read both tokens. `None` unless both are present.
    pub async fn load(&self) -> Result<Option<TokenPair>, StoreError> {
        let _guard = self.pair_lock.read().await;
        let access = self.store.get(TokenKey::AccessToken).await?;
        let refresh = self.store.get(TokenKey::RefreshToken).await?;

        let pair = match (access, refresh) {
            (Some(access), Some(refresh)) => Some(TokenPair::new(access, refresh)),
            (None, None) => None,
            _ => {
                warn!("Credential store holds only one token of the pair");
                None
            }
        };

        self.publish(if pair.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        });
        Ok(pair)
    }

    /// Store a fresh pair: access token first, then refresh token.
    ///
    /// If either write fails both tokens are removed before the error is
    /// returned, so a failed save never leaves half of a new pair next to
    /// half of an old one.
    #[instrument(skip_all)]
    pub async fn save(&self, pair: &TokenPair) -> Result<(), StoreError> {
        let _guard = self.pair_lock.write().await;
        let written = self.write_pair(pair).await;

        if let Err(e) = &written {
            warn!(error = %e, "Failed to store token pair; clearing credentials");
            if let Err(clear_err) = self.delete_pair().await {
                warn!(error = %clear_err, "Failed to clear stored credentials");
            }
            self.publish(SessionState::Unauthenticated);
            return written;
        }

        debug!("Stored new token pair");
        self.publish(SessionState::Authenticated);
        Ok(())
    }

    /// Remove both tokens.
    ///
    /// Both deletes are attempted even if the first fails; the first error
    /// is returned. Subscribers always see `Unauthenticated` afterwards.
    #[instrument(skip_all)]
    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.pair_lock.write().await;
        let result = self.delete_pair().await;

        info!("Cleared stored credentials");
        self.publish(SessionState::Unauthenticated);
        result
    }

    // Callers hold the pair lock for writing.
    async fn write_pair(&self, pair: &TokenPair) -> Result<(), StoreError> {
        self.store
            .set(TokenKey::AccessToken, pair.access_token.as_str())
            .await?;
        self.store
            .set(TokenKey::RefreshToken, pair.refresh_token.as_str())
            .await
    }

    async fn delete_pair(&self) -> Result<(), StoreError> {
        let access = self.store.delete(TokenKey::AccessToken).await;
        let refresh = self.store.delete(TokenKey::RefreshToken).await;
        access.and(refresh)
    }

    /// Session state as of the last load, save or clear.
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Watch session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn publish(&self, next: SessionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

impl std::fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVault")
            .field("state", &self.state())
            .finish()
    }
}
