//! File-backed credential store.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::sync::Mutex;
use tracing::debug;

use booking_core::error::StoreError;
use booking_core::{CredentialStore, TokenKey};

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Overrides the data directory, mainly for tests.
pub const DATA_DIR_ENV: &str = "BOOKING_DATA_DIR";

const CREDENTIALS_FILE: &str = "credentials.json";

type Entries = BTreeMap<String, String>;

/// Stores both tokens in one JSON file readable only by the owner.
///
/// Each call reads or rewrites the whole file under a process-local lock,
/// so single writes are atomic with respect to this process.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Open the store in the user's data directory.
    pub fn open_default() -> Result<Self> {
        let dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("id.web", "hyge", "booking")
                .context("Could not determine data directory")?
                .data_dir()
                .to_path_buf(),
        };
        Self::in_dir(&dir)
    }

    /// Open the store in `dir`, creating the directory if needed.
    pub fn in_dir(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).context("Failed to create data directory")?;
        Ok(Self {
            path: dir.join(CREDENTIALS_FILE),
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Entries, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(backend("read", &e)),
        };

        serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
            message: format!("{}: {}", self.path.display(), e),
        })
    }

    fn write(&self, entries: &Entries) -> Result<(), StoreError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(backend("remove", &e)),
            };
        }

        let json = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Backend {
            message: e.to_string(),
        })?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&self.path).map_err(|e| backend("open", &e))?;

        // `mode` only applies on creation; tighten a file that already existed.
        #[cfg(unix)]
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| backend("chmod", &e))?;

        file.write_all(json.as_bytes())
            .map_err(|e| backend("write", &e))
    }
}

fn backend(action: &str, err: &std::io::Error) -> StoreError {
    StoreError::Backend {
        message: format!("failed to {} credentials file: {}", action, err),
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: TokenKey) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read()?.remove(key.as_str()))
    }

    async fn set(&self, key: TokenKey, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read()?;
        entries.insert(key.as_str().to_string(), value.to_string());
        self.write(&entries)?;
        debug!(key = %key, path = %self.path.display(), "Stored credential");
        Ok(())
    }

    async fn delete(&self, key: TokenKey) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read()?;
        if entries.remove(key.as_str()).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }
}
