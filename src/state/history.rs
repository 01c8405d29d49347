//! Navigation history shared by the router and the auth store.

use std::sync::{Arc, Mutex, MutexGuard};

/// One completed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Path the user ended up on.
    pub path: String,
    /// Path originally requested when the guard redirected.
    pub redirected_from: Option<String>,
}

/// Append-only list of visited paths. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Arc<Mutex<Vec<HistoryEntry>>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HistoryEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, path: impl Into<String>) {
        self.lock().push(HistoryEntry {
            path: path.into(),
            redirected_from: None,
        });
    }

    pub fn push_redirect(&self, from: impl Into<String>, to: impl Into<String>) {
        self.lock().push(HistoryEntry {
            path: to.into(),
            redirected_from: Some(from.into()),
        });
    }

    /// Path of the latest entry.
    pub fn current(&self) -> Option<String> {
        self.lock().last().map(|e| e.path.clone())
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
