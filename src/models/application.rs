use serde::{Deserialize, Serialize};

use super::graph::GraphPayload;
use super::{deserialize_timestamp, Host, HostRelationship, Timestamp};

/// Membership kind used when none is given.
pub const DEFAULT_MEMBERSHIP: &str = "member";

fn default_membership() -> String {
    DEFAULT_MEMBERSHIP.to_string()
}

/// A named group of hosts with a topology graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Application {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Present on list and detail responses, absent after create/update.
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub host_count: Option<u64>,
    /// Last saved graph, `null` until the first save.
    #[serde(default)]
    pub graph_layout: Option<GraphPayload>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl Application {
    pub fn member_count(&self) -> u64 {
        self.host_count.unwrap_or(self.hosts.len() as u64)
    }
}

/// Body of `POST /applications` and `PUT /applications/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApplicationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /applications/{id}/hosts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddHostsRequest {
    pub host_ids: Vec<i64>,
    /// `member`, `depends_on` or `related_to`
    #[serde(default = "default_membership")]
    pub relationship_type: String,
}

impl AddHostsRequest {
    pub fn members(host_ids: Vec<i64>) -> Self {
        Self {
            host_ids,
            relationship_type: default_membership(),
        }
    }
}

/// Response of `GET /applications/{id}/graph`.
///
/// Carries the stored layout plus the member hosts and the host
/// relationships among them. Either half may be missing depending on
/// backend version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ApplicationGraph {
    #[serde(flatten)]
    pub layout: GraphPayload,
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub relationships: Vec<HostRelationship>,
}

impl ApplicationGraph {
    pub fn host_ids(&self) -> std::collections::HashSet<i64> {
        self.hosts.iter().map(|h| h.id).collect()
    }
}
