//! Persistent login state for the CLI.

mod storage;

pub use storage::FileCredentialStore;
