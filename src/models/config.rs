use serde::{Deserialize, Serialize};

/// Backend-wide concurrency limits (`/config/concurrent`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConcurrentConfig {
    pub scan_concurrent: u32,
    pub collect_concurrent: u32,
}

/// Result of the CSV host import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ImportReport {
    #[serde(default)]
    pub created: u32,
    #[serde(default)]
    pub updated: u32,
    #[serde(default)]
    pub errors: Vec<ImportRowError>,
}

/// A CSV row the backend could not import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportRowError {
    pub row: u32,
    #[serde(default)]
    pub ip: serde_json::Value,
    pub error: String,
}
