//! In-memory storage for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StorageError;
use crate::traits::Storage;

/// In-memory [`Storage`] with switchable write failures.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// a store persisted.
///
/// # Example
///
/// ```ignore
/// use prophet::adapters::mock::InMemoryStorage;
/// use prophet::traits::Storage;
///
/// let storage = InMemoryStorage::with_entries([("access_token", "T")]);
/// assert_eq!(storage.get("access_token")?, Some("T".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    write_should_fail: Arc<Mutex<bool>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        {
            let mut map = lock(&storage.entries);
            for (k, v) in entries {
                map.insert(k.to_string(), v.to_string());
            }
        }
        storage
    }

    /// Configure whether set/remove should fail.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        *lock(&self.write_should_fail) = should_fail;
    }

    /// Snapshot of a value without going through the trait.
    pub fn peek(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if *lock(&self.write_should_fail) {
            return Err(StorageError::Unavailable("mock write failure".to_string()));
        }
        Ok(())
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.peek(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        lock(&self.entries).remove(key);
        Ok(())
    }
}
