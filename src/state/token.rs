//! Bearer token shared between the API client and the auth store.

use std::sync::{Arc, RwLock};

/// Shared handle to the current access token.
///
/// Clones point at the same slot, so the auth store can set or clear the
/// token and every subsequent request sees the change.
#[derive(Debug, Clone, Default)]
pub struct SessionToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl SessionToken {
    pub fn new(token: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(token)),
        }
    }

    pub fn get(&self) -> Option<String> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_set(&self) -> bool {
        self.get().is_some()
    }

    pub fn set(&self, token: impl Into<String>) {
        self.replace(Some(token.into()));
    }

    pub fn clear(&self) {
        self.replace(None);
    }

    fn replace(&self, value: Option<String>) {
        match self.inner.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }

    /// `Bearer <token>` when a token is held.
    pub fn bearer(&self) -> Option<String> {
        self.get().map(|t| format!("Bearer {}", t))
    }
}
