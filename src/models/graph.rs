//! Application topology graph.
//!
//! The graph is a plain data shape owned by the backend: the client reads it,
//! replaces it wholesale on save, and never merges. Wire names are camelCase
//! because the layout is stored exactly as the diagram editor produced it.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Default rendered node width in canvas units.
pub const DEFAULT_NODE_WIDTH: u32 = 65;
/// Default rendered node height in canvas units.
pub const DEFAULT_NODE_HEIGHT: u32 = 75;

/// Free-form per-element payload.
pub type EdgeData = serde_json::Map<String, serde_json::Value>;

/// Node identifier; the editor emits both numbers and strings.
///
/// Two ids are the same node when their textual forms match, so `1` and
/// `"1"` refer to one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl NodeId {
    /// Textual form used for identity.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{}", n),
            NodeId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Int(n)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Str(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::Str(s)
    }
}

/// Kind of element a node depicts. Unrecognized kinds round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NodeType {
    #[default]
    Host,
    Network,
    Storage,
    ObjectStorage,
    Database,
    Service,
    Custom,
    Other(String),
}

impl NodeType {
    pub const KNOWN: [NodeType; 7] = [
        NodeType::Host,
        NodeType::Network,
        NodeType::Storage,
        NodeType::ObjectStorage,
        NodeType::Database,
        NodeType::Service,
        NodeType::Custom,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Host => "host",
            NodeType::Network => "network",
            NodeType::Storage => "storage",
            NodeType::ObjectStorage => "objectStorage",
            NodeType::Database => "database",
            NodeType::Service => "service",
            NodeType::Custom => "custom",
            NodeType::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|t| t.as_str() == s)
            .cloned()
            .unwrap_or_else(|| NodeType::Other(s.to_string()))
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeType::parse(&s))
    }
}

/// A positioned element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Host this node stands for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_host_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

impl GraphNode {
    pub fn new(
        id: impl Into<NodeId>,
        node_type: NodeType,
        x: f64,
        y: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            node_type,
            x,
            y,
            label: label.into(),
            icon: None,
            color: None,
            binding_host_id: None,
            status: None,
            data: None,
        }
    }

    pub fn bound_to(mut self, host_id: i64) -> Self {
        self.binding_host_id = Some(host_id);
        self
    }
}

/// A directed link between two nodes. Relationship semantics are the backend's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

impl GraphEdge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            relationship_type: None,
            label: None,
            description: None,
            data: None,
        }
    }

    pub fn with_relationship(mut self, relationship_type: impl Into<String>) -> Self {
        self.relationship_type = Some(relationship_type.into());
        self
    }

    fn describe(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.key(),
            None => format!("#{}", index),
        }
    }
}

/// A non-host resource offered on the editor palette (a shared database, a
/// load balancer) that can be dropped onto the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNode {
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

/// Graph-level metadata. Known keys are typed; anything else the editor
/// writes is kept in `extra` and sent back untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Complete stored state of an application's graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphPayload {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
    #[serde(default)]
    pub resource_nodes: Vec<ResourceNode>,
    #[serde(default)]
    pub metadata: GraphMetadata,
}

/// One consistency problem in a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphProblem {
    #[error("node id {0} is used more than once")]
    DuplicateNode(String),
    #[error("edge {edge} references missing node {node}")]
    DanglingEdge { edge: String, node: String },
    #[error("node {node} is bound to unknown host {host_id}")]
    UnknownHost { node: String, host_id: i64 },
}

/// A graph failed local consistency checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("graph has {} problem(s): {}", .0.len(), join_problems(.0))]
    Invalid(Vec<GraphProblem>),
}

impl GraphError {
    pub fn problems(&self) -> &[GraphProblem] {
        match self {
            GraphError::Invalid(problems) => problems,
        }
    }
}

fn join_problems(problems: &[GraphProblem]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl GraphPayload {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.resource_nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        let key = id.key();
        self.nodes.iter().find(|n| n.id.key() == key)
    }

    /// Host ids referenced by `bindingHostId`, in node order, without repeats.
    pub fn bound_host_ids(&self) -> Vec<i64> {
        let mut seen = HashSet::new();
        self.nodes
            .iter()
            .filter_map(|n| n.binding_host_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Structural problems: duplicate node ids and edges whose endpoints are missing.
    pub fn problems(&self) -> Vec<GraphProblem> {
        let mut problems = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for node in &self.nodes {
            *counts.entry(node.id.key()).or_default() += 1;
        }

        let mut reported = HashSet::new();
        for node in &self.nodes {
            let key = node.id.key();
            if counts[&key] > 1 && reported.insert(key.clone()) {
                problems.push(GraphProblem::DuplicateNode(key));
            }
        }

        for (index, edge) in self.edges.iter().enumerate() {
            for end in [&edge.source, &edge.target] {
                let key = end.key();
                if !counts.contains_key(&key) {
                    problems.push(GraphProblem::DanglingEdge {
                        edge: edge.describe(index),
                        node: key,
                    });
                }
            }
        }

        problems
    }

    /// Check that every edge endpoint exists and node ids are unique.
    pub fn validate(&self) -> Result<(), GraphError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(GraphError::Invalid(problems))
        }
    }

    /// Check that every `bindingHostId` names one of `host_ids`.
    pub fn validate_bindings(&self, host_ids: &HashSet<i64>) -> Result<(), GraphError> {
        let problems: Vec<GraphProblem> = self
            .nodes
            .iter()
            .filter_map(|n| match n.binding_host_id {
                Some(host_id) if !host_ids.contains(&host_id) => Some(GraphProblem::UnknownHost {
                    node: n.id.key(),
                    host_id,
                }),
                _ => None,
            })
            .collect();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(GraphError::Invalid(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_node_graph() -> GraphPayload {
        GraphPayload {
            nodes: vec![
                GraphNode::new(1, NodeType::Host, 100.0, 80.0, "web-01").bound_to(11),
                GraphNode::new("db", NodeType::Database, 300.0, 80.0, "orders-db"),
            ],
            edges: vec![GraphEdge::new(1, "db").with_relationship("depends_on")],
            ..Default::default()
        }
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let value = serde_json::to_value(two_node_graph()).unwrap();
        assert_eq!(value["nodes"][0]["bindingHostId"], json!(11));
        assert_eq!(value["nodes"][1]["type"], json!("database"));
        assert_eq!(value["edges"][0]["relationshipType"], json!("depends_on"));
        assert_eq!(value["resourceNodes"], json!([]));
        assert!(value["nodes"][1].get("bindingHostId").is_none());
    }

    #[test]
    fn test_decode_editor_output() {
        let graph: GraphPayload = serde_json::from_value(json!({
            "nodes": [
                {"id": "n1", "type": "objectStorage", "x": 10, "y": 20.5, "label": "s3"},
                {"id": 2, "type": "firewall", "x": 0, "y": 0, "label": "fw", "status": "online",
                 "data": {"rack": "A1"}}
            ],
            "edges": [{"source": "n1", "target": 2, "label": "backup"}],
            "metadata": {"version": "2", "zoom": 1.5, "grid": true}
        }))
        .unwrap();

        assert_eq!(graph.nodes[0].node_type, NodeType::ObjectStorage);
        assert_eq!(graph.nodes[1].node_type, NodeType::Other("firewall".to_string()));
        assert_eq!(graph.metadata.zoom, Some(1.5));
        assert_eq!(graph.metadata.extra.get("grid"), Some(&json!(true)));
        assert!(graph.resource_nodes.is_empty());
        assert!(graph.validate().is_ok());

        let back = serde_json::to_value(&graph).unwrap();
        assert_eq!(back["nodes"][1]["type"], json!("firewall"));
        assert_eq!(back["metadata"]["grid"], json!(true));
    }

    #[test]
    fn test_numeric_and_string_ids_match() {
        let graph = GraphPayload {
            nodes: vec![GraphNode::new(5, NodeType::Service, 0.0, 0.0, "api")],
            edges: vec![GraphEdge::new("5", 5)],
            ..Default::default()
        };
        assert!(graph.validate().is_ok());
        assert!(graph.node(&NodeId::from("5")).is_some());
    }

    #[test]
    fn test_dangling_edge_reported() {
        let mut graph = two_node_graph();
        graph.edges.push(GraphEdge::new("db", "cache"));

        let err = graph.validate().unwrap_err();
        assert_eq!(
            err.problems(),
            &[GraphProblem::DanglingEdge {
                edge: "#1".to_string(),
                node: "cache".to_string()
            }]
        );
        assert!(err.to_string().contains("missing node cache"));
    }

    #[test]
    fn test_duplicate_node_reported_once() {
        let mut graph = two_node_graph();
        graph.nodes.push(GraphNode::new("db", NodeType::Database, 0.0, 0.0, "dup"));
        graph.nodes.push(GraphNode::new("db", NodeType::Database, 0.0, 0.0, "dup2"));

        let err = graph.validate().unwrap_err();
        assert_eq!(err.problems(), &[GraphProblem::DuplicateNode("db".to_string())]);
    }

    #[test]
    fn test_validate_bindings() {
        let graph = two_node_graph();
        assert!(graph.validate_bindings(&HashSet::from([11, 12])).is_ok());

        let err = graph.validate_bindings(&HashSet::from([12])).unwrap_err();
        assert_eq!(
            err.problems(),
            &[GraphProblem::UnknownHost {
                node: "1".to_string(),
                host_id: 11
            }]
        );
        assert_eq!(graph.bound_host_ids(), vec![11]);
    }
}
