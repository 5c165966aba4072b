use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use schemadesk::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Received {
    method: String,
    path: String,
    body: String,
}

/// Serves `responses` in order, one connection each, and records what came in.
async fn stub_server(responses: Vec<(u16, &'static str)>) -> (String, Arc<Mutex<Vec<Received>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            log.lock().unwrap().push(request);

            let reason = if status < 400 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
    });

    (format!("http://{}", addr), received)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Received {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_header_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let length = content_length(&head);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }

    let end = find_header_end(&buf).unwrap();
    let head = String::from_utf8_lossy(&buf[..end]).to_string();
    let body = String::from_utf8_lossy(&buf[end + 4..]).to_string();
    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    Received {
        method: request_line.next().unwrap_or_default().to_string(),
        path: request_line.next().unwrap_or_default().to_string(),
        body,
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

#[tokio::test]
async fn list_tables_reads_json_array() {
    let (base_url, received) = stub_server(vec![(
        200,
        r#"[{"table_name":"users","columns":[{"name":"id","type":"integer","attributes":["primary_key=True"]}]}]"#,
    )])
    .await;

    let service = HttpSchemaService::with_base_url(&base_url);
    let tables = service.list_tables().await.unwrap();

    assert_eq!(
        tables,
        vec![Table::new(
            "users",
            vec![Column::new("id", DataType::Integer).with_attribute(DataAttribute::PrimaryKey)]
        )]
    );
    let received = received.lock().unwrap().clone();
    assert_eq!(received[0].method, "GET");
    assert_eq!(received[0].path, "/migrate/show_tables");
}

#[tokio::test]
async fn mutations_post_to_their_endpoints() {
    let (base_url, received) = stub_server(vec![
        (200, r#"{"status":"ok"}"#),
        (200, ""),
        (200, r#"{"status":"ok"}"#),
        (200, r#"{"status":"ok"}"#),
    ])
    .await;
    let service = HttpSchemaService::with_base_url(&base_url);

    let table = Table::new("orders", vec![Column::new("id", DataType::Integer)]);
    service.create_table(&table).await.unwrap();
    let confirmed = service
        .rename_table(&RenameTableRequest {
            old_name: "orders".to_string(),
            new_name: "purchases".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(confirmed, serde_json::Value::Null);
    service
        .edit_table(&EditTableRequest::delete_column("purchases", "id"))
        .await
        .unwrap();
    service
        .delete_table(&DeleteTableRequest {
            table_name: "purchases".to_string(),
        })
        .await
        .unwrap();

    let received = received.lock().unwrap().clone();
    let paths: Vec<_> = received.iter().map(|r| (r.method.as_str(), r.path.as_str())).collect();
    assert_eq!(
        paths,
        vec![
            ("POST", "/add_table"),
            ("POST", "/migrate/rename_table"),
            ("POST", "/migrate/edit_table"),
            ("POST", "/migrate/delete_table"),
        ]
    );

    let create: serde_json::Value = serde_json::from_str(&received[0].body).unwrap();
    assert_eq!(
        create,
        serde_json::json!({
            "table_name": "orders",
            "columns": [{"name": "id", "type": "integer", "attributes": []}]
        })
    );
    let rename: serde_json::Value = serde_json::from_str(&received[1].body).unwrap();
    assert_eq!(rename, serde_json::json!({"old_name": "orders", "new_name": "purchases"}));
}

#[tokio::test]
async fn error_status_surfaces_as_service_error() {
    let (base_url, _received) = stub_server(vec![(500, r#"{"detail":"boom"}"#)]).await;
    let service = HttpSchemaService::with_base_url(&base_url);

    let err = service
        .delete_table(&DeleteTableRequest {
            table_name: "users".to_string(),
        })
        .await
        .unwrap_err();
    match err {
        ServiceError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = HttpSchemaService::with_base_url(&format!("http://{}", addr));
    let err = service.list_tables().await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)));
}

#[tokio::test]
async fn controller_over_http_fetches_then_deletes() {
    let (base_url, received) = stub_server(vec![
        (200, r#"[{"table_name":"users","columns":[]},{"table_name":"orders","columns":[]}]"#),
        (200, r#"{"status":"ok"}"#),
    ])
    .await;
    let notifier = RecordingNotifier::new();
    let mut controller = Controller::new(
        HttpSchemaService::with_base_url(&base_url),
        Box::new(notifier.clone()),
    );

    controller.fetch_tables().await.unwrap();
    controller.delete_table("users").await.unwrap();

    assert_eq!(controller.registry().table_names(), vec!["orders"]);
    assert_eq!(received.lock().unwrap().len(), 2);
    assert_eq!(notifier.messages(), vec!["Table deleted successfully"]);
}
