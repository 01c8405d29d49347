//! Application graph get / save / export, including the CLI save path.

mod common;

use std::sync::Arc;

use common::{api, graph_json, host_json, mock_me_ok, storage_with_token, url, BASE};
use prophet::adapters::mock::{MockHttpClient, MockResponse};
use prophet::cli::args::AppsCommand;
use prophet::cli::{run_cli_command, CliCommand, Context};
use prophet::config::ClientConfig;
use prophet::error::ProphetError;
use prophet::models::{GraphPayload, GraphProblem, NodeType};
use serde_json::json;

fn mock_app(mock: &MockHttpClient, host_ids: &[i64]) {
    let hosts: Vec<_> = host_ids
        .iter()
        .map(|id| host_json(*id, &format!("10.0.0.{}", id)))
        .collect();
    mock.set_method_response(
        "GET",
        &url("/applications/4"),
        MockResponse::ok(json!({"id": 4, "name": "shop", "hosts": hosts})),
    );
}

fn mock_save_ok(mock: &MockHttpClient) {
    mock.set_method_response(
        "PUT",
        &url("/applications/4/graph"),
        MockResponse::json(200, json!({"code": 200, "message": "saved"})),
    );
}

fn context(mock: &MockHttpClient) -> Context {
    mock_me_ok(mock);
    Context::with_parts(
        ClientConfig::default().with_base_url(BASE),
        Arc::new(mock.clone()),
        Arc::new(storage_with_token()),
    )
}

fn write_graph(dir: &tempfile::TempDir, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("graph.json");
    std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

#[tokio::test]
async fn test_get_graph_splits_layout_and_hosts() {
    let mock = MockHttpClient::new();
    let mut body = graph_json();
    body["hosts"] = json!([host_json(7, "10.0.0.7")]);
    body["relationships"] = json!([{
        "id": 1, "from_host_id": 7, "to_host_id": 8, "relationship_type": "depends_on"
    }]);
    mock.set_method_response("GET", &url("/applications/4/graph"), MockResponse::ok(body));

    let graph = api(&mock, Some("t")).applications().get_graph(4).await.unwrap();

    assert_eq!(graph.layout.nodes.len(), 2);
    assert_eq!(graph.layout.nodes[1].node_type, NodeType::Database);
    assert!(graph.host_ids().contains(&7));
    assert_eq!(graph.relationships[0].to_host_id, 8);
}

#[tokio::test]
async fn test_saving_twice_sends_identical_full_payloads() {
    let mock = MockHttpClient::new();
    mock_save_ok(&mock);
    let client = api(&mock, Some("t"));
    let graph: GraphPayload = serde_json::from_value(graph_json()).unwrap();

    client.applications().save_graph(4, &graph).await.unwrap();
    client.applications().save_graph(4, &graph).await.unwrap();

    let requests = mock.get_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].json_body(), requests[1].json_body());
    assert_eq!(requests[0].json_body().unwrap(), graph_json());
}

#[tokio::test]
async fn test_unknown_types_and_metadata_survive_round_trip() {
    let mock = MockHttpClient::new();
    mock_save_ok(&mock);
    let stored = json!({
        "nodes": [{"id": 1, "type": "firewall", "x": 1.5, "y": 2.0, "label": "fw", "status": "warn"}],
        "edges": [],
        "resourceNodes": [{"id": "r1", "type": "loadBalancer", "label": "LB"}],
        "metadata": {"version": "1.0", "zoom": 1.25, "theme": "dark"}
    });
    mock.set_method_response(
        "GET",
        &url("/applications/4/graph"),
        MockResponse::ok(stored.clone()),
    );
    let client = api(&mock, Some("t"));

    let loaded = client.applications().get_graph(4).await.unwrap();
    client.applications().save_graph(4, &loaded.layout).await.unwrap();

    assert_eq!(
        loaded.layout.nodes[0].node_type,
        NodeType::Other("firewall".to_string())
    );
    let sent = mock.get_requests()[1].json_body().unwrap();
    assert_eq!(sent, stored);
}

#[tokio::test]
async fn test_export_graph_bytes() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "GET",
        &url("/applications/4/graph/export"),
        MockResponse::bytes(200, "application/json", &b"{\"nodes\":[]}"[..]),
    );

    let download = api(&mock, None).applications().export_graph(4).await.unwrap();

    assert_eq!(&download.bytes[..], b"{\"nodes\":[]}");
}

#[tokio::test]
async fn test_cli_save_validates_bindings_then_puts() {
    let mock = MockHttpClient::new();
    mock_app(&mock, &[7, 8]);
    mock_save_ok(&mock);
    let ctx = context(&mock);
    let dir = tempfile::tempdir().unwrap();
    let file = write_graph(&dir, &graph_json());

    run_cli_command(CliCommand::Apps(AppsCommand::GraphSave { id: 4, file }), &ctx)
        .await
        .unwrap();

    assert_eq!(mock.count("GET", &url("/applications/4")), 1);
    assert_eq!(mock.count("PUT", &url("/applications/4/graph")), 1);
}

#[tokio::test]
async fn test_cli_save_rejects_dangling_edge_without_request() {
    let mock = MockHttpClient::new();
    mock_save_ok(&mock);
    let ctx = context(&mock);
    let dir = tempfile::tempdir().unwrap();
    let mut graph = graph_json();
    graph["edges"][0]["target"] = json!("gone");
    let file = write_graph(&dir, &graph);

    let err = run_cli_command(CliCommand::Apps(AppsCommand::GraphSave { id: 4, file }), &ctx)
        .await
        .unwrap_err();

    match err {
        ProphetError::Graph(graph_err) => assert_eq!(
            graph_err.problems(),
            &[GraphProblem::DanglingEdge {
                edge: "#0".to_string(),
                node: "gone".to_string()
            }]
        ),
        other => panic!("expected graph error, got {:?}", other),
    }
    assert_eq!(mock.count("PUT", &url("/applications/4/graph")), 0);
}

#[tokio::test]
async fn test_cli_save_rejects_binding_outside_application() {
    let mock = MockHttpClient::new();
    mock_app(&mock, &[8]);
    mock_save_ok(&mock);
    let ctx = context(&mock);
    let dir = tempfile::tempdir().unwrap();
    let file = write_graph(&dir, &graph_json());

    let err = run_cli_command(CliCommand::Apps(AppsCommand::GraphSave { id: 4, file }), &ctx)
        .await
        .unwrap_err();

    assert!(matches!(
        err.inner(),
        ProphetError::Graph(e) if e.problems() == [GraphProblem::UnknownHost { node: "n1".to_string(), host_id: 7 }]
    ));
    assert_eq!(mock.count("PUT", &url("/applications/4/graph")), 0);
}
