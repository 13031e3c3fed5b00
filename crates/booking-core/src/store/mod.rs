//! Credential storage.
//!
//! A [`CredentialStore`] is the durable key-value backend (keychain, file,
//! memory). The [`CredentialVault`] on top of it treats the two tokens as a
//! pair and publishes the derived [`SessionState`].

mod memory;
mod vault;

use std::fmt;

use async_trait::async_trait;

use crate::error::StoreError;

pub use memory::MemoryCredentialStore;
pub use vault::{CredentialVault, SessionState};

/// Keys held in a credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    AccessToken,
    RefreshToken,
}

impl TokenKey {
    /// The storage key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKey::AccessToken => "accessToken",
            TokenKey::RefreshToken => "refreshToken",
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A durable, device-scoped key-value store for session tokens.
///
/// Individual calls are expected to be atomic. No cross-call transaction is
/// required; pairing is handled by [`CredentialVault`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a value, `None` when absent.
    async fn get(&self, key: TokenKey) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: TokenKey, value: &str) -> Result<(), StoreError>;

    /// Remove a value. Removing an absent key succeeds.
    async fn delete(&self, key: TokenKey) -> Result<(), StoreError>;
}
