use serde::{Deserialize, Serialize};

use super::{deserialize_timestamp, Timestamp};

/// Colour given to tags created without one.
pub const DEFAULT_TAG_COLOR: &str = "#3B82F6";

fn default_color() -> String {
    DEFAULT_TAG_COLOR.to_string()
}

/// A label attachable to hosts and platforms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Only present on `GET /tags`.
    #[serde(default)]
    pub host_count: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
}

/// Tag as embedded in host and platform records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagRef {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

/// Body of `POST /tags` and `PUT /tags/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TagInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Query of `GET /tags/{id}/hosts`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TagHostsFilter {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

/// Result of `POST /tags/{id}/hosts/batch-remove`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RemovedCount {
    #[serde(default)]
    pub removed_count: u32,
}
