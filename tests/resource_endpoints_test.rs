//! Request shapes of the resource APIs: method, path, query and body.

mod common;

use common::{api, host_json, url};
use prophet::adapters::mock::{MockHttpClient, MockResponse};
use prophet::models::{
    AddHostsRequest, ApplicationInput, ConcurrentConfig, HostCredentials, HostFilter, HostInput,
    HostUpdate, PlatformInput, RelationshipInput, ScanRequest, TagInput, TaskFilter, TaskStatus,
};
use serde_json::{json, Value};

#[tokio::test]
async fn test_batch_collect_sends_null_limit_by_default() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "POST",
        &url("/hosts/batch/collect"),
        MockResponse::ok(json!({
            "platform_tasks": [{"id": 21, "host_ids": [-2], "status": "pending"}],
            "normal_task": {"id": 22, "host_ids": [4, 5], "status": "pending"}
        })),
    );

    let started = api(&mock, Some("t"))
        .hosts()
        .batch_collect(&[4, 5, 9], None)
        .await
        .unwrap();

    assert_eq!(started.task_ids(), vec![21, 22]);
    let request = &mock.get_requests()[0];
    assert_eq!(
        request.json_body().unwrap(),
        json!({"host_ids": [4, 5, 9], "concurrent_limit": null})
    );
}

#[tokio::test]
async fn test_host_list_query_skips_unset_filters() {
    let mock = MockHttpClient::new();
    mock.set_default_response(MockResponse::ok(json!([host_json(1, "10.0.0.1")])));

    let filter = HostFilter {
        per_page: Some(20),
        is_physical: Some(false),
        ..Default::default()
    };
    api(&mock, None).hosts().list(&filter).await.unwrap();

    let request = &mock.get_requests()[0];
    assert_eq!(request.path(), url("/hosts"));
    assert_eq!(request.query(), "is_physical=false&per_page=20");
}

#[tokio::test]
async fn test_csv_export_carries_filter() {
    let mock = MockHttpClient::new();
    mock.set_default_response(MockResponse::bytes(200, "text/csv", &b"ip\n"[..]));

    let filter = HostFilter {
        tag_id: Some(3),
        include_credentials: Some(true),
        ..Default::default()
    };
    let download = api(&mock, None).hosts().export_csv(&filter).await.unwrap();

    assert_eq!(download.content_type.as_deref(), Some("text/csv"));
    assert_eq!(
        mock.get_requests()[0].url,
        url("/hosts/export/csv?include_credentials=true&tag_id=3")
    );
}

#[tokio::test]
async fn test_scan_lifecycle_paths() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "POST",
        &url("/scans"),
        MockResponse::ok(json!({"id": 5, "name": "lab", "target": "10.0.0.0/24"})),
    );
    mock.set_method_response(
        "POST",
        &url("/scans/5/cancel"),
        MockResponse::ok(json!({"id": 5, "status": "cancelled"})),
    );
    mock.set_method_response(
        "GET",
        &url("/scans/5/results"),
        MockResponse::ok(json!([host_json(8, "10.0.0.8")])),
    );
    let client = api(&mock, Some("t"));

    let created = client
        .scans()
        .create(&ScanRequest {
            name: "lab".to_string(),
            target: "10.0.0.0/24".to_string(),
            nmap_args: None,
        })
        .await
        .unwrap();
    let cancelled = client.scans().cancel(created.id).await.unwrap();
    let found = client.scans().results(created.id).await.unwrap();

    assert_eq!(cancelled.status, TaskStatus::Cancelled);
    assert_eq!(found[0].id, 8);
    assert_eq!(
        mock.get_requests()[0].json_body().unwrap(),
        json!({"name": "lab", "target": "10.0.0.0/24"})
    );
    assert_eq!(mock.get_requests()[1].body.as_deref(), Some("{}"));
}

#[tokio::test]
async fn test_collection_list_and_retry() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "GET",
        &url("/collections"),
        MockResponse::json(
            200,
            json!({
                "code": 200,
                "data": [{"id": 1, "host_ids": [1], "status": "failed"}],
                "pagination": {"page": 1, "per_page": 10, "total": 1, "pages": 1}
            }),
        ),
    );
    mock.set_method_response(
        "POST",
        &url("/collections/1/retry"),
        MockResponse::ok(json!({"id": 1, "host_ids": [1], "status": "pending"})),
    );
    let client = api(&mock, Some("t"));

    let page = client
        .collections()
        .list(&TaskFilter {
            status: Some("failed".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let retried = client.collections().retry(page.items[0].id).await.unwrap();

    assert_eq!(page.pagination.unwrap().pages, 1);
    assert_eq!(retried.status, TaskStatus::Pending);
    assert_eq!(mock.get_requests()[0].query(), "status=failed");
}

#[tokio::test]
async fn test_tag_assignment_paths() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "POST",
        &url("/tags/hosts/7"),
        MockResponse::ok(json!({
            "id": 7,
            "ip": "10.0.0.7",
            "tags": [{"id": 2, "name": "prod", "color": "#EF4444"}]
        })),
    );
    mock.set_method_response(
        "DELETE",
        &url("/tags/hosts/7/2"),
        MockResponse::json(200, json!({"code": 200, "message": "removed"})),
    );
    let client = api(&mock, Some("t"));

    let host = client.tags().add_to_host(7, &[2]).await.unwrap();
    client.tags().remove_from_host(7, 2).await.unwrap();

    assert_eq!(host.tags[0].name, "prod");
    assert_eq!(mock.get_requests()[0].json_body().unwrap(), json!({"tag_ids": [2]}));
    assert_eq!(mock.count("DELETE", &url("/tags/hosts/7/2")), 1);
}

#[tokio::test]
async fn test_application_membership_and_relationships() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "POST",
        &url("/applications/3/hosts"),
        MockResponse::ok(json!({"id": 3, "name": "shop", "hosts": [host_json(4, "10.0.0.4")]})),
    );
    mock.set_method_response(
        "POST",
        &url("/applications/3/relationships"),
        MockResponse::ok(json!({
            "id": 12,
            "from_host_id": 4,
            "to_host_id": 5,
            "relationship_type": "depends_on",
            "application_id": 3
        })),
    );
    let client = api(&mock, Some("t"));

    let app = client
        .applications()
        .add_hosts(3, &AddHostsRequest::members(vec![4]))
        .await
        .unwrap();
    let rel = client
        .applications()
        .create_relationship(
            3,
            &RelationshipInput {
                from_host_id: 4,
                to_host_id: 5,
                relationship_type: "depends_on".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(app.member_count(), 1);
    assert_eq!(rel.application_id, Some(3));
    assert_eq!(
        mock.get_requests()[0].json_body().unwrap(),
        json!({"host_ids": [4], "relationship_type": "member"})
    );
}

#[tokio::test]
async fn test_platform_sync_returns_tracking_task() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "POST",
        &url("/platforms/2/sync"),
        MockResponse::ok(json!({"task_id": 30, "status": "pending", "platform_id": 2})),
    );

    let started = api(&mock, Some("t")).platforms().sync(2).await.unwrap();

    assert_eq!(started.task_id, 30);
    assert_eq!(started.platform_id, Some(2));
}

#[tokio::test]
async fn test_concurrency_config_update() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "PUT",
        &url("/config/concurrent"),
        MockResponse::ok(json!({"scan_concurrent": 2, "collect_concurrent": 8})),
    );

    let saved = api(&mock, Some("t"))
        .config()
        .update_concurrent(&ConcurrentConfig {
            scan_concurrent: 2,
            collect_concurrent: 8,
        })
        .await
        .unwrap();

    assert_eq!(saved.collect_concurrent, 8);
    assert_eq!(
        mock.get_requests()[0].json_body().unwrap(),
        json!({"scan_concurrent": 2, "collect_concurrent": 8})
    );
}

#[tokio::test]
async fn test_multipart_upload_is_recorded() {
    let mock = MockHttpClient::new();
    mock.set_default_response(MockResponse::ok(json!({"created": 1, "updated": 0})));

    api(&mock, Some("t"))
        .import()
        .hosts_csv("inventory.csv", b"ip\n10.1.1.1\n".to_vec())
        .await
        .unwrap();

    let file = mock.get_requests()[0].file.clone().unwrap();
    assert_eq!(file.field, "file");
    assert_eq!(file.file_name, "inventory.csv");
    assert_eq!(file.content_type, "text/csv");
}

/// Run one API call against a fresh mock and check it produced exactly one
/// request with the given method, URL and JSON body.
macro_rules! one_request {
    ($client:ident => $call:expr, $response:expr, $method:literal $path:expr, $body:expr) => {{
        let mock = MockHttpClient::new();
        mock.set_default_response($response);
        let $client = api(&mock, Some("t"));
        if let Err(err) = $call.await {
            panic!("{} {} failed: {:?}", $method, $path, err);
        }
        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1, "{} {}", $method, $path);
        assert_eq!(requests[0].method, $method, "{}", $path);
        assert_eq!(requests[0].url, url($path), "{}", $method);
        let body: Option<Value> = $body;
        assert_eq!(requests[0].json_body(), body, "{} {}", $method, $path);
    }};
}

fn ack() -> MockResponse {
    MockResponse::json(200, json!({"code": 200, "message": "ok"}))
}

fn platform_json() -> Value {
    json!({"id": 2, "name": "vc", "type": "vmware", "host": "vc.lab"})
}

fn relationship_json() -> Value {
    json!({"id": 11, "from_host_id": 7, "to_host_id": 8, "relationship_type": "depends_on"})
}

fn root_credentials() -> HostCredentials {
    HostCredentials {
        username: Some("root".to_string()),
        ssh_port: Some(22),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_host_endpoints_send_one_request_each() {
    let renamed = HostInput {
        hostname: Some("web-01".to_string()),
        ..Default::default()
    };
    let stored = json!({"id": 1, "host_id": 5, "username": "root", "ssh_port": 22});

    one_request!(c => c.hosts().update(5, &renamed),
        MockResponse::ok(host_json(5, "10.0.0.5")),
        "PUT" "/hosts/5", Some(json!({"hostname": "web-01"})));
    one_request!(c => c.hosts().delete(5), ack(), "DELETE" "/hosts/5", None);
    one_request!(c => c.hosts().batch_delete(&[1, 2]),
        MockResponse::ok(json!({"deleted_count": 2, "failed_ids": []})),
        "POST" "/hosts/batch/delete", Some(json!({"host_ids": [1, 2]})));
    one_request!(c => c.hosts().batch_create(&[HostInput {
            ip: Some("10.0.0.9".to_string()),
            ..Default::default()
        }]),
        MockResponse::ok(json!({"created": [host_json(9, "10.0.0.9")], "updated": []})),
        "POST" "/hosts/batch", Some(json!({"hosts": [{"ip": "10.0.0.9"}]})));
    one_request!(c => c.hosts().batch_update(&[HostUpdate {
            id: 3,
            fields: HostInput {
                os_type: Some("Linux".to_string()),
                ..Default::default()
            },
        }]),
        MockResponse::ok(json!({"updated": [{"id": 3}], "errors": []})),
        "POST" "/hosts/batch/update", Some(json!({"hosts": [{"id": 3, "os_type": "Linux"}]})));
    one_request!(c => c.hosts().set_credentials(5, &root_credentials()),
        MockResponse::ok(stored.clone()),
        "POST" "/hosts/5/credentials", Some(json!({"username": "root", "ssh_port": 22})));
    one_request!(c => c.hosts().get_credentials(5),
        MockResponse::ok(stored.clone()),
        "GET" "/hosts/5/credentials", None);
    one_request!(c => c.hosts().batch_set_credentials(&[1, 2], &root_credentials()),
        MockResponse::ok(json!({"updated": [1, 2]})),
        "POST" "/hosts/batch/credentials",
        Some(json!({"host_ids": [1, 2], "credentials": {"username": "root", "ssh_port": 22}})));
    one_request!(c => c.hosts().details(5),
        MockResponse::ok(json!([{"id": 1, "host_id": 5, "details": {"cpu_cores": 4}}])),
        "GET" "/hosts/5/details", None);
    one_request!(c => c.hosts().relationships(5),
        MockResponse::ok(json!({"outgoing": [relationship_json()], "incoming": []})),
        "GET" "/hosts/5/relationships", None);
    one_request!(c => c.hosts().tree(),
        MockResponse::ok(json!([{"platform_id": 2, "platform_name": "vc", "esxi_hosts": []}])),
        "GET" "/hosts/tree", None);
    one_request!(c => c.hosts().export_templates(),
        MockResponse::ok(json!({"basic": ["ip", "hostname"]})),
        "GET" "/hosts/export/templates", None);
    one_request!(c => c.hosts().export_excel(&json!({"fields": ["ip"]})),
        MockResponse::bytes(200, "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet", &b"PK"[..]),
        "POST" "/hosts/export/excel", Some(json!({"fields": ["ip"]})));
}

#[tokio::test]
async fn test_platform_and_tag_endpoints_send_one_request_each() {
    let renamed = PlatformInput {
        name: Some("vc".to_string()),
        ..Default::default()
    };
    let recolored = TagInput {
        color: Some("#ff0000".to_string()),
        ..Default::default()
    };

    one_request!(c => c.platforms().update(2, &renamed),
        MockResponse::ok(platform_json()),
        "PUT" "/platforms/2", Some(json!({"name": "vc"})));
    one_request!(c => c.platforms().delete(2), ack(), "DELETE" "/platforms/2", None);
    one_request!(c => c.platforms().test(2),
        MockResponse::ok(json!({"connected": true})),
        "POST" "/platforms/2/test", Some(json!({})));

    one_request!(c => c.tags().update(3, &recolored),
        MockResponse::ok(json!({"id": 3, "name": "prod", "color": "#ff0000"})),
        "PUT" "/tags/3", Some(json!({"color": "#ff0000"})));
    one_request!(c => c.tags().delete(3), ack(), "DELETE" "/tags/3", None);
    one_request!(c => c.tags().add_to_platform(2, &[3, 4]),
        MockResponse::ok(platform_json()),
        "POST" "/tags/platforms/2", Some(json!({"tag_ids": [3, 4]})));
    one_request!(c => c.tags().remove_from_platform(2, 3), ack(), "DELETE" "/tags/platforms/2/3", None);
    one_request!(c => c.tags().batch_remove_hosts(3, &[7, 8]),
        MockResponse::ok(json!({"removed_count": 2})),
        "POST" "/tags/3/hosts/batch-remove", Some(json!({"host_ids": [7, 8]})));
}

#[tokio::test]
async fn test_application_endpoints_send_one_request_each() {
    let described = ApplicationInput {
        description: Some("storefront".to_string()),
        ..Default::default()
    };
    let edge = RelationshipInput {
        from_host_id: 7,
        to_host_id: 8,
        relationship_type: "depends_on".to_string(),
        description: None,
    };

    one_request!(c => c.applications().update(4, &described),
        MockResponse::ok(json!({"id": 4, "name": "shop", "description": "storefront"})),
        "PUT" "/applications/4", Some(json!({"description": "storefront"})));
    one_request!(c => c.applications().delete(4), ack(), "DELETE" "/applications/4", None);
    one_request!(c => c.applications().remove_host(4, 7), ack(), "DELETE" "/applications/4/hosts/7", None);
    one_request!(c => c.applications().relationships(4),
        MockResponse::ok(json!([relationship_json()])),
        "GET" "/applications/4/relationships", None);
    one_request!(c => c.applications().update_relationship(4, 11, &edge),
        MockResponse::ok(relationship_json()),
        "PUT" "/applications/4/relationships/11",
        Some(json!({"from_host_id": 7, "to_host_id": 8, "relationship_type": "depends_on"})));
    one_request!(c => c.applications().delete_relationship(4, 11),
        ack(), "DELETE" "/applications/4/relationships/11", None);
}

#[tokio::test]
async fn test_task_deletes_and_captcha_send_one_request_each() {
    one_request!(c => c.scans().delete(5), ack(), "DELETE" "/scans/5", None);
    one_request!(c => c.collections().delete(6), ack(), "DELETE" "/collections/6", None);
    one_request!(c => c.auth().captcha(),
        MockResponse::ok(json!({"captcha_id": "cap-1", "image": "data:image/png;base64,iVBORw0KGgo="})),
        "GET" "/auth/captcha", None);
}
