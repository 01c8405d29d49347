//! File-backed key-value storage.
//!
//! Keeps all persisted client state in a single JSON object at
//! `~/.prophet/local_storage.json`.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::error::StorageError;
use crate::traits::Storage;

/// The storage file name inside the data directory.
pub const STORAGE_FILE: &str = "local_storage.json";

/// [`Storage`] implementation persisting to a JSON file.
///
/// Every mutation rewrites the whole file. An unreadable or corrupt file is
/// treated as empty so a damaged store never locks the user out.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Storage file inside the given data directory.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::at(data_dir.join(STORAGE_FILE))
    }

    /// Storage at an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Get the path to the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        if !self.path.exists() {
            return BTreeMap::new();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Cannot open {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(map) => map,
            Err(e) => {
                warn!("Ignoring corrupt storage file {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn write(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }

        let file = File::create(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        // Holds the bearer token: owner read/write only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|e| StorageError::io(&self.path, e))?;
        }
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, map)?;
        writer.flush().map_err(|e| StorageError::io(&self.path, e))
    }

    fn update<F>(&self, mutate: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut map = self.load();
        if mutate(&mut map) {
            self.write(&map)?;
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load().remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|map| map.remove(key).is_some())
    }
}
