use serde::{Deserialize, Serialize};

use super::tag::TagRef;
use super::{deserialize_timestamp, Timestamp};

/// A virtualization management endpoint (vCenter, OpenStack, cloud account).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Platform {
    pub id: i64,
    pub name: String,
    /// `vmware`, `openstack`, `aliyun`, `huawei`, ...
    #[serde(rename = "type")]
    pub platform_type: String,
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub extra_config: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub vm_count: Option<u64>,
    #[serde(default)]
    pub host_count: Option<u64>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<Timestamp>,
}

/// Body of `POST /platforms` and `PUT /platforms/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlatformInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub platform_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_config: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Outcome of `POST /platforms/{id}/test`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ConnectionTest {
    #[serde(default)]
    pub connected: bool,
}

/// Outcome of `POST /platforms/{id}/sync`: the tracking collection task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncStarted {
    pub task_id: i64,
    pub status: super::TaskStatus,
    #[serde(default)]
    pub platform_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_platform_type_field_renamed() {
        let platform: Platform = serde_json::from_value(json!({
            "id": 2,
            "name": "vc-main",
            "type": "vmware",
            "host": "vc.example.local",
            "port": 443,
            "username": "administrator@vsphere.local",
            "region": null,
            "extra_config": {"datacenter": "DC1"},
            "created_at": "2024-02-02T10:00:00",
            "updated_at": null
        }))
        .unwrap();
        assert_eq!(platform.platform_type, "vmware");
        assert_eq!(platform.extra_config.get("datacenter"), Some(&json!("DC1")));
    }

    #[test]
    fn test_platform_input_serializes_type() {
        let input = PlatformInput {
            name: Some("os".to_string()),
            platform_type: Some("openstack".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"name": "os", "type": "openstack"})
        );
    }
}
