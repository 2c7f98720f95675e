//! Integration tests using mock HTTP server
//!
//! Tests the full flow: Cursor → HTTP requests → decoded documents → CLI output

use clap::Parser;
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use solr_cursor::cli::{Cli, Runner};
use solr_cursor::{Cursor, CursorConfig, Document, Error, ErrorKind};
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn solr_page(docs: Value, next_cursor_mark: &str) -> ResponseTemplate {
    let num_found = docs.as_array().map_or(0, Vec::len);
    ResponseTemplate::new(200).set_body_json(json!({
        "responseHeader": {"status": 0, "QTime": 1},
        "response": {"numFound": num_found, "start": 0, "docs": docs},
        "nextCursorMark": next_cursor_mark
    }))
}

fn cursor_for(server: &MockServer, collection: &str, page_size: u32) -> Cursor {
    let address = server.address();
    Cursor::new(
        address.ip().to_string(),
        address.port(),
        collection,
        page_size,
        "id asc",
    )
    .unwrap()
}

fn ids(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .map(|d| d.get_str("id").unwrap().to_string())
        .collect()
}

async fn drain(cursor: &mut Cursor) -> Vec<Document> {
    let mut documents = Vec::new();
    while let Some(document) = cursor.next().await.unwrap() {
        documents.push(document);
    }
    documents
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

/// Serves a fixed, id-sorted collection the way Solr's cursor paging does:
/// the mark encodes the offset, and an exhausted walk repeats the mark it got.
struct FakeSolr {
    documents: Vec<Value>,
}

impl FakeSolr {
    fn with_ids(count: usize) -> Self {
        Self {
            documents: (1..=count)
                .map(|i| json!({"id": format!("{i:03}"), "title": [format!("Title {i}")]}))
                .collect(),
        }
    }
}

impl Respond for FakeSolr {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let param = |name: &str| {
            request
                .url
                .query_pairs()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
        };

        let mark = param("cursorMark").unwrap_or_default();
        let rows: usize = param("rows").and_then(|r| r.parse().ok()).unwrap_or(10);
        let offset = if mark == "*" {
            0
        } else {
            match mark.strip_prefix("offset-").and_then(|o| o.parse().ok()) {
                Some(offset) => offset,
                None => return ResponseTemplate::new(400).set_body_string("invalid cursorMark"),
            }
        };

        let end = (offset + rows).min(self.documents.len());
        let docs = self.documents[offset.min(end)..end].to_vec();
        let next = if docs.is_empty() {
            mark
        } else {
            format!("offset-{end}")
        };

        ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": self.documents.len(), "start": 0, "docs": docs},
            "nextCursorMark": next
        }))
    }
}

// ============================================================================
// Cursor Walks
// ============================================================================

#[tokio::test]
async fn test_three_documents_page_size_two() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .and(query_param("q", "*:*"))
        .and(query_param("cursorMark", "*"))
        .and(query_param("rows", "2"))
        .and(query_param("wt", "json"))
        .and(query_param("sort", "id asc"))
        .respond_with(solr_page(json!([{"id": "1"}, {"id": "2"}]), "B"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .and(query_param("cursorMark", "B"))
        .respond_with(solr_page(json!([{"id": "3"}]), "C"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .and(query_param("cursorMark", "C"))
        .respond_with(solr_page(json!([]), "C"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut cursor = cursor_for(&mock_server, "docs", 2);
    let documents = drain(&mut cursor).await;

    assert_eq!(ids(&documents), vec!["1", "2", "3"]);

    // Further calls make no requests.
    assert!(cursor.next().await.unwrap().is_none());
    assert!(cursor.next().await.unwrap().is_none());
    assert_eq!(request_count(&mock_server).await, 3);
    mock_server.verify().await;
}

#[test_case(1 ; "one document per page")]
#[test_case(3 ; "page size divides collection")]
#[test_case(7 ; "page size equals collection")]
#[test_case(50 ; "page size exceeds collection")]
#[tokio::test]
async fn test_exhaustive_for_any_page_size(page_size: u32) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .respond_with(FakeSolr::with_ids(7))
        .mount(&mock_server)
        .await;

    let cursor = cursor_for(&mock_server, "docs", page_size);
    let documents: Vec<Document> = cursor.into_stream().try_collect().await.unwrap();

    let expected: Vec<String> = (1..=7).map(|i| format!("{i:03}")).collect();
    assert_eq!(ids(&documents), expected);

    // ceil(7 / P) pages with documents plus the terminating one
    let pages = 7_usize.div_ceil(page_size as usize) + 1;
    assert_eq!(request_count(&mock_server).await, pages);
}

#[tokio::test]
async fn test_empty_collection_makes_one_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/empty/select"))
        .respond_with(solr_page(json!([]), "*"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut cursor = cursor_for(&mock_server, "empty", 10);
    assert!(cursor.next().await.unwrap().is_none());
    assert!(cursor.next().await.unwrap().is_none());
    assert_eq!(cursor.stats().documents_delivered, 0);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_last_page_with_repeated_mark_is_drained() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .and(query_param("cursorMark", "*"))
        .respond_with(solr_page(json!([{"id": "1"}, {"id": "2"}]), "B"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .and(query_param("cursorMark", "B"))
        .respond_with(solr_page(json!([{"id": "3"}, {"id": "4"}]), "B"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut cursor = cursor_for(&mock_server, "docs", 2);
    let documents = drain(&mut cursor).await;

    assert_eq!(ids(&documents), vec!["1", "2", "3", "4"]);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_fields_parameter_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .and(query_param("fl", "id,title"))
        .respond_with(solr_page(json!([{"id": "1", "title": "One"}]), "*"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let address = mock_server.address();
    let config = CursorConfig::new(address.ip().to_string(), address.port(), "docs")
        .fields(["id", "title"]);
    let mut cursor = Cursor::from_config(&config).unwrap();

    let documents = drain(&mut cursor).await;
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].get_str("title").unwrap(), "One");
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_missing_docs_is_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 2, "start": 0},
            "nextCursorMark": "B"
        })))
        .mount(&mock_server)
        .await;

    let mut cursor = cursor_for(&mock_server, "docs", 2);
    let err = cursor.next().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert!(err.to_string().contains("docs"));
    assert_eq!(cursor.buffered(), 0);
}

#[tokio::test]
async fn test_server_error_is_upstream_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut cursor = cursor_for(&mock_server, "docs", 2);
    let err = cursor.next().await.unwrap_err();

    assert!(matches!(err, Error::Upstream { status: 500, .. }));
    assert!(err.to_string().contains("internal error"));
    mock_server.verify().await;
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut cursor = Cursor::new("127.0.0.1", port, "docs", 10, "id asc").unwrap();
    let err = cursor.next().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .respond_with(solr_page(json!([]), "*").set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let address = mock_server.address();
    let config = CursorConfig::new(address.ip().to_string(), address.port(), "docs")
        .timeout(Duration::from_millis(50));
    let mut cursor = Cursor::from_config(&config).unwrap();

    let err = cursor.next().await.unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[test]
fn test_invalid_construction_fails_early() {
    assert!(Cursor::new("localhost", 8983, "docs", 0, "id asc").is_err());
    assert!(Cursor::new("localhost", 8983, "", 10, "id asc").is_err());
    assert!(Cursor::new("localhost", 8983, "docs", 10, "").is_err());
}

// ============================================================================
// CLI Runner
// ============================================================================

fn cli_for(server: &MockServer, args: &[&str]) -> Cli {
    let address = server.address();
    let host = address.ip().to_string();
    let port = address.port().to_string();
    let mut argv = vec![
        "solr-cursor",
        "--host",
        host.as_str(),
        "--port",
        port.as_str(),
        "--collection",
        "docs",
    ];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

async fn run_cli(cli: Cli) -> (solr_cursor::Result<()>, String) {
    let mut out = Vec::new();
    let result = Runner::new(cli).run_with_output(&mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_cli_read_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .respond_with(FakeSolr::with_ids(3))
        .mount(&mock_server)
        .await;

    let cli = cli_for(&mock_server, &["--page-size", "2", "read", "--field", "title"]);
    let (result, output) = run_cli(cli).await;

    result.unwrap();
    assert_eq!(output, "1. Title 1\n2. Title 2\n3. Title 3\n");
}

#[tokio::test]
async fn test_cli_read_json_lines_with_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .respond_with(FakeSolr::with_ids(5))
        .mount(&mock_server)
        .await;

    let cli = cli_for(&mock_server, &["read", "--max-records", "2"]);
    let (result, output) = run_cli(cli).await;

    result.unwrap();
    let lines: Vec<Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], "001");
    assert_eq!(lines[1]["id"], "002");
}

/// Writer whose reader has gone away
struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_cli_output_failure_is_io_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .respond_with(FakeSolr::with_ids(3))
        .mount(&mock_server)
        .await;

    let cli = cli_for(&mock_server, &["read", "--field", "title"]);
    let err = Runner::new(cli)
        .run_with_output(&mut ClosedPipe)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn test_cli_missing_field_fails_with_position() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .and(query_param("cursorMark", "*"))
        .respond_with(solr_page(json!([{"id": "1", "title": "One"}, {"id": "2"}]), "B"))
        .mount(&mock_server)
        .await;

    let cli = cli_for(&mock_server, &["--page-size", "2", "read", "--field", "title"]);
    let (result, output) = run_cli(cli).await;

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Field);
    assert_eq!(err.to_string(), "Document #2 (page 1): Field 'title' is missing");
    assert_eq!(output, "1. One\n");
}

#[tokio::test]
async fn test_cli_missing_field_skip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .and(query_param("cursorMark", "*"))
        .respond_with(solr_page(
            json!([{"id": "1"}, {"id": "2", "title": "Two"}]),
            "*",
        ))
        .mount(&mock_server)
        .await;

    let cli = cli_for(
        &mock_server,
        &["read", "--field", "title", "--missing-field", "skip"],
    );
    let (result, output) = run_cli(cli).await;

    result.unwrap();
    assert_eq!(output, "1. Two\n");
}

#[tokio::test]
async fn test_cli_read_reports_failing_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .and(query_param("cursorMark", "*"))
        .respond_with(solr_page(json!([{"id": "1"}, {"id": "2"}]), "B"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .and(query_param("cursorMark", "B"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let cli = cli_for(&mock_server, &["--page-size", "2", "read"]);
    let (result, output) = run_cli(cli).await;

    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Document #3 (page 2): Solr returned HTTP 503: overloaded"
    );
    assert!(err.is_retryable());
    assert_eq!(output.lines().count(), 2);
}

#[tokio::test]
async fn test_cli_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/docs/select"))
        .and(query_param("rows", "1"))
        .respond_with(FakeSolr::with_ids(4))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cli = cli_for(&mock_server, &["check"]);
    let (result, output) = run_cli(cli).await;

    result.unwrap();
    let message: Value = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(message["status"], "SUCCEEDED");
    assert_eq!(message["collection"], "docs");
    assert_eq!(message["num_found"], 4);
    mock_server.verify().await;
}
