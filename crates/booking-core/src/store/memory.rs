//! In-memory credential store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{CredentialStore, TokenKey};
use crate::error::StoreError;

/// A process-local credential store.
///
/// Clones share the same entries, so a test can keep a handle and inspect
/// what the client wrote.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    entries: Arc<Mutex<HashMap<TokenKey, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with both tokens.
    pub fn with_tokens(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        let store = Self::default();
        {
            let mut entries = store.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.insert(TokenKey::AccessToken, access.into());
            entries.insert(TokenKey::RefreshToken, refresh.into());
        }
        store
    }

    /// Current value for a key, without going through the async trait.
    pub fn peek(&self, key: TokenKey) -> Option<String> {
        self.lock().ok().and_then(|entries| entries.get(&key).cloned())
    }

    /// Number of `set` and `delete` calls made through the trait.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<TokenKey, String>>, StoreError> {
        self.entries.lock().map_err(|_| StoreError::Backend {
            message: "memory store lock poisoned".to_string(),
        })
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: TokenKey) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(&key).cloned())
    }

    async fn set(&self, key: TokenKey, value: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.lock()?.insert(key, value.to_string());
        Ok(())
    }

    async fn delete(&self, key: TokenKey) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.lock()?.remove(&key);
        Ok(())
    }
}

impl std::fmt::Debug for MemoryCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCredentialStore")
            .field("entries", &"[REDACTED]")
            .finish()
    }
}
