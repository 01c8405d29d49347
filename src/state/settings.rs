//! User preferences other than language.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tracing::warn;

use crate::error::ProphetError;
use crate::traits::{keys, Storage};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Preferences persisted in local storage.
pub struct SettingsStore {
    storage: Arc<dyn Storage>,
    page_size: AtomicU32,
}

impl SettingsStore {
    /// Restore settings; missing, non-numeric or zero values fall back to defaults.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let page_size = match storage.get(keys::DEFAULT_PAGE_SIZE) {
            Ok(value) => value
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            Err(err) => {
                warn!(error = %err, "could not read stored page size");
                DEFAULT_PAGE_SIZE
            }
        };
        Self {
            storage,
            page_size: AtomicU32::new(page_size),
        }
    }

    pub fn default_page_size(&self) -> u32 {
        self.page_size.load(Ordering::SeqCst)
    }

    /// Change the page size used by list views. Zero is rejected.
    pub fn set_default_page_size(&self, size: u32) -> Result<(), ProphetError> {
        if size == 0 {
            return Err(ProphetError::usage("page size must be at least 1"));
        }
        self.page_size.store(size, Ordering::SeqCst);
        self.storage
            .set(keys::DEFAULT_PAGE_SIZE, &size.to_string())?;
        Ok(())
    }
}
