use serde::{Deserialize, Serialize};

use super::tag::TagRef;
use super::{deserialize_timestamp, CollectionTask, Timestamp};

/// How a host entered the inventory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HostSource {
    Scan,
    Platform,
    #[default]
    Manual,
    #[serde(other)]
    Unknown,
}

impl HostSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostSource::Scan => "scan",
            HostSource::Platform => "platform",
            HostSource::Manual => "manual",
            HostSource::Unknown => "unknown",
        }
    }
}

/// Inventory collection state of a host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    #[default]
    NotCollected,
    Collecting,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl CollectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionStatus::NotCollected => "not_collected",
            CollectionStatus::Collecting => "collecting",
            CollectionStatus::Completed => "completed",
            CollectionStatus::Failed => "failed",
            CollectionStatus::Unknown => "unknown",
        }
    }
}

/// A host record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Host {
    pub id: i64,
    #[serde(default)]
    pub hostname: Option<String>,
    pub ip: String,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub os_type: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub os_kernel: Option<String>,
    #[serde(default)]
    pub os_bit: Option<String>,
    #[serde(default)]
    pub boot_type: Option<String>,
    #[serde(default)]
    pub cpu_info: Option<String>,
    #[serde(default)]
    pub cpu_cores: Option<u32>,
    /// GB
    #[serde(default)]
    pub memory_total: Option<f64>,
    /// GB
    #[serde(default)]
    pub memory_free: Option<f64>,
    #[serde(default)]
    pub memory_info: Option<String>,
    #[serde(default)]
    pub disk_count: Option<u32>,
    #[serde(default)]
    pub disk_total_size: Option<f64>,
    #[serde(default)]
    pub network_count: Option<u32>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub is_physical: Option<bool>,
    #[serde(default)]
    pub vt_platform: Option<String>,
    #[serde(default)]
    pub vt_platform_ver: Option<String>,
    #[serde(default)]
    pub source: HostSource,
    #[serde(default)]
    pub source_scan_task_id: Option<i64>,
    #[serde(default)]
    pub source_platform_id: Option<i64>,
    #[serde(default)]
    pub virtualization_platform_id: Option<i64>,
    #[serde(default)]
    pub platform_name: Option<String>,
    #[serde(default)]
    pub collection_status: CollectionStatus,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub last_collected_at: Option<Timestamp>,
    /// Set on list rows of hosts whose last collection failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<Timestamp>,
    /// Keys added by newer backends.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Host {
    /// Hostname when known, otherwise the IP.
    pub fn display_name(&self) -> &str {
        self.hostname
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(&self.ip)
    }
}

/// Query filters of `GET /hosts` and `GET /hosts/export/csv`.
///
/// `None` fields are not sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HostFilter {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub search_field: Option<String>,
    pub os_type: Option<String>,
    pub device_type: Option<String>,
    pub is_physical: Option<bool>,
    pub platform_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub collection_status: Option<String>,
    pub source: Option<String>,
    /// Only honoured by the CSV export.
    pub include_credentials: Option<bool>,
}

/// Writable host fields for create and update. Unset fields are left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_physical: Option<bool>,
}

/// One row of `POST /hosts/batch/update`: an id plus the fields to change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostUpdate {
    pub id: i64,
    #[serde(flatten)]
    pub fields: HostInput,
}

/// Login material for collecting from a host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,
}

/// Stored credentials as returned by `GET /hosts/{id}/credentials`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredCredentials {
    #[serde(default)]
    pub id: Option<i64>,
    pub host_id: i64,
    #[serde(flatten)]
    pub credentials: HostCredentials,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
}

/// Result of `POST /hosts/batch/delete`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BatchDeleteResult {
    #[serde(default)]
    pub deleted_count: u32,
    #[serde(default)]
    pub failed_ids: Vec<i64>,
}

/// Result of `POST /hosts/batch`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BatchCreateResult {
    #[serde(default)]
    pub created: Vec<Host>,
    #[serde(default)]
    pub updated: Vec<Host>,
}

/// Per-host failure in a batch operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchItemError {
    #[serde(default)]
    pub host_id: Option<i64>,
    #[serde(default)]
    pub error: String,
}

/// Result of `POST /hosts/batch/update` and `POST /hosts/batch/credentials`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BatchUpdateResult {
    #[serde(default)]
    pub updated: Vec<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<BatchItemError>,
}

/// Result of `POST /hosts/batch/collect`.
///
/// Platform-sourced hosts are collected through per-platform tasks, the
/// rest through one normal task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CollectStarted {
    #[serde(default)]
    pub platform_tasks: Vec<CollectionTask>,
    #[serde(default)]
    pub normal_task: Option<CollectionTask>,
}

impl CollectStarted {
    pub fn task_ids(&self) -> Vec<i64> {
        self.platform_tasks
            .iter()
            .chain(self.normal_task.iter())
            .map(|t| t.id)
            .collect()
    }
}

/// One collection record from `GET /hosts/{id}/details`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostDetail {
    pub id: i64,
    pub host_id: i64,
    #[serde(default)]
    pub details: serde_json::Value,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub collection_method: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub collected_at: Option<Timestamp>,
}

/// A typed directed link between two hosts.
///
/// Stored by the backend separately from application graph edges; the two
/// are never reconciled on the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostRelationship {
    pub id: i64,
    pub from_host_id: i64,
    pub to_host_id: i64,
    pub relationship_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub application_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
}

/// Body for creating or updating a [`HostRelationship`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationshipInput {
    pub from_host_id: i64,
    pub to_host_id: i64,
    /// `depends_on`, `communicates_with`, `backup_of`, or any backend-accepted value
    pub relationship_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Both directions of a host's relationships.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HostRelationships {
    #[serde(default)]
    pub outgoing: Vec<HostRelationship>,
    #[serde(default)]
    pub incoming: Vec<HostRelationship>,
}

/// Virtualization tree from `GET /hosts/tree`: platform, hypervisor, VMs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformTree {
    pub platform_id: i64,
    #[serde(default)]
    pub platform_name: Option<String>,
    #[serde(default)]
    pub platform_type: Option<String>,
    #[serde(default)]
    pub esxi_hosts: Vec<HypervisorNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HypervisorNode {
    #[serde(default)]
    pub esxi_id: Option<i64>,
    pub esxi_name: String,
    #[serde(default)]
    pub esxi_ip: Option<String>,
    #[serde(default)]
    pub vms: Vec<Host>,
}

/// Format of a single-host export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostExportFormat {
    #[default]
    Json,
    Yaml,
}

impl HostExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostExportFormat::Json => "json",
            HostExportFormat::Yaml => "yaml",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(HostExportFormat::Json),
            "yaml" | "yml" => Some(HostExportFormat::Yaml),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_host() -> serde_json::Value {
        json!({
            "id": 7,
            "hostname": "db-01",
            "ip": "10.0.0.7",
            "mac": null,
            "os_type": "Linux",
            "cpu_cores": 8,
            "memory_total": 31.25,
            "is_physical": false,
            "source": "platform",
            "source_platform_id": 2,
            "collection_status": "completed",
            "last_collected_at": "2024-03-01T12:00:00.5",
            "tags": [{"id": 1, "name": "prod", "color": "#3B82F6"}],
            "created_at": "2024-01-01T00:00:00",
            "rack": "B4"
        })
    }

    #[test]
    fn test_host_decodes_backend_shape() {
        let host: Host = serde_json::from_value(sample_host()).unwrap();
        assert_eq!(host.id, 7);
        assert_eq!(host.display_name(), "db-01");
        assert_eq!(host.source, HostSource::Platform);
        assert_eq!(host.collection_status, CollectionStatus::Completed);
        assert_eq!(host.memory_total, Some(31.25));
        assert_eq!(host.tags[0].name, "prod");
        assert_eq!(host.extra.get("rack"), Some(&json!("B4")));
    }

    #[test]
    fn test_unknown_enum_values_do_not_fail() {
        let host: Host = serde_json::from_value(json!({
            "id": 1,
            "ip": "10.0.0.1",
            "source": "cmdb-sync",
            "collection_status": "queued"
        }))
        .unwrap();
        assert_eq!(host.source, HostSource::Unknown);
        assert_eq!(host.collection_status, CollectionStatus::Unknown);
        assert_eq!(host.display_name(), "10.0.0.1");
    }

    #[test]
    fn test_host_input_skips_unset_fields() {
        let input = HostInput {
            hostname: Some("web-01".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&input).unwrap(), json!({"hostname": "web-01"}));
    }

    #[test]
    fn test_host_update_flattens_fields() {
        let update = HostUpdate {
            id: 3,
            fields: HostInput {
                os_type: Some("Windows".to_string()),
                ..Default::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"id": 3, "os_type": "Windows"})
        );
    }

    #[test]
    fn test_collect_started_task_ids() {
        let started: CollectStarted = serde_json::from_value(json!({
            "platform_tasks": [{"id": 4, "host_ids": [-2], "status": "pending"}],
            "normal_task": {"id": 5, "host_ids": [1, 2], "status": "pending"}
        }))
        .unwrap();
        assert_eq!(started.task_ids(), vec![4, 5]);
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!(HostExportFormat::parse("YML"), Some(HostExportFormat::Yaml));
        assert_eq!(HostExportFormat::parse("xml"), None);
        assert_eq!(HostExportFormat::default().as_str(), "json");
    }
}
