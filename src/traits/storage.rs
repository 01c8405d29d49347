//! Key-value persistence trait.
//!
//! Stands in for the per-browser local storage the web client used: a flat
//! string-to-string map holding the session token and UI preferences.

use crate::error::StorageError;

/// Persisted string key-value store.
///
/// Writes are last-write-wins. Implementations must be safe to share
/// between the stores of a session (`Send + Sync`).
pub trait Storage: Send + Sync {
    /// Read a value. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys used in persisted storage.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const LOCALE: &str = "locale";
    pub const DEFAULT_PAGE_SIZE: &str = "defaultPageSize";
}
