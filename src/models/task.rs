use serde::{Deserialize, Serialize};

use super::{deserialize_timestamp, Timestamp};

/// Lifecycle state of a scan or collection task. Owned by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Completed, failed and cancelled tasks never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Completed | TaskStatus::Failed | TaskStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::Unknown => "unknown",
        }
    }
}

/// A network scan job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanTask {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// CIDR, range or address list handed to the scanner
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub result_count: u64,
    #[serde(default)]
    pub current_host: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub started_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub completed_at: Option<Timestamp>,
}

/// Body of `POST /scans`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanRequest {
    pub name: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nmap_args: Option<String>,
}

/// Query of the task list endpoints.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TaskFilter {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
}

/// An inventory collection job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CollectionTask {
    pub id: i64,
    #[serde(default)]
    pub host_ids: Vec<i64>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub concurrent_limit: Option<u32>,
    #[serde(default)]
    pub current_running: u32,
    #[serde(default)]
    pub completed_count: u32,
    #[serde(default)]
    pub failed_count: u32,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub scan_task_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub started_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub completed_at: Option<Timestamp>,
}

impl CollectionTask {
    /// Platform sync tasks store the negated platform id as their only host id.
    pub fn synced_platform_id(&self) -> Option<i64> {
        match self.host_ids.first() {
            Some(&id) if id < 0 => Some(-id),
            _ => None,
        }
    }

    pub fn is_platform_sync(&self) -> bool {
        self.synced_platform_id().is_some()
    }

    /// Host ids actually collected, without the platform marker.
    pub fn real_host_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.host_ids.iter().copied().filter(|&id| id > 0)
    }
}

/// Per-host outcome in `GET /collections/{id}/results`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionResult {
    pub id: i64,
    pub ip: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub os_type: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
    /// `pending`, `collecting`, `completed`, `failed` or `unknown`
    #[serde(default)]
    pub collection_status: Option<String>,
    #[serde(default)]
    pub collection_success: Option<bool>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub collected_at: Option<Timestamp>,
}
