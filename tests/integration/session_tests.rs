//! Integration tests for the session layer
//!
//! These tests use wiremock to stand in for the crawl service and a
//! temporary SQLite database for history, and drive full crawl cycles.

use crawl_studio::client::HttpCrawlClient;
use crawl_studio::config::ServiceConfig;
use crawl_studio::history::{open_history, HistoryCache, SqliteStore};
use crawl_studio::schema::FieldDraft;
use crawl_studio::session::{Editor, FailureKind, SessionController, SessionState};
use crawl_studio::view::ViewMode;
use crawl_studio::RequestDefaults;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a controller talking to `server` with history in `dir`
fn create_controller(
    server: &MockServer,
    dir: &TempDir,
) -> SessionController<HttpCrawlClient, SqliteStore> {
    let config = ServiceConfig {
        endpoint: server.uri(),
        timeout_secs: 5,
    };
    let client = HttpCrawlClient::new(&config).expect("Failed to build client");
    let history = open_history(&dir.path().join("history.db")).expect("Failed to open history");
    SessionController::new(client, Arc::new(history))
}

fn editor(url: &str, instruction: &str) -> Editor {
    let mut editor = Editor::new(RequestDefaults::default());
    editor.url = url.to_string();
    editor.instruction = instruction.to_string();
    editor
}

#[tokio::test]
async fn test_plain_crawl_end_to_end() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .and(body_partial_json(json!({
            "url": "https://example.com",
            "screenshot": true,
            "bypass_cache": true,
            "smart_mode": true,
            "word_count_threshold": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "markdown": "# Hello"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut controller = create_controller(&mock_server, &dir);
    let request = editor("https://example.com", "").compose().unwrap();
    assert_eq!(request.instruction, None);

    controller.submit(request).await.unwrap();

    assert!(matches!(controller.state(), SessionState::Succeeded(_)));
    assert_eq!(controller.history().list().await.len(), 1);
    assert_eq!(controller.view_mode(), Some(ViewMode::Raw));
    assert_eq!(controller.displayed_content().as_deref(), Some("# Hello"));
}

#[tokio::test]
async fn test_instruction_crawl_defaults_to_structured() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .and(body_partial_json(json!({ "instruction": "List all prices" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "markdown": "",
            "metadata": { "prices": [1, 2] }
        })))
        .mount(&mock_server)
        .await;

    let mut controller = create_controller(&mock_server, &dir);
    let request = editor("https://example.com", "List all prices").compose().unwrap();
    controller.submit(request).await.unwrap();

    assert_eq!(controller.view_mode(), Some(ViewMode::Structured));

    let shown: serde_json::Value =
        serde_json::from_str(&controller.displayed_content().unwrap()).unwrap();
    assert_eq!(shown["metadata"]["prices"], json!([1, 2]));
}

#[tokio::test]
async fn test_schema_is_sent_with_request() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .and(body_partial_json(json!({
            "extraction_schema": {
                "name": "Custom Extraction",
                "baseSelector": "body",
                "fields": [
                    { "name": "title", "selector": "h1", "type": "text" },
                    { "name": "link", "selector": "a", "type": "attribute" }
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "markdown": "# Title",
            "extracted_content": [{ "title": "Title", "link": "/next" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut controller = create_controller(&mock_server, &dir);
    let mut editor = editor("https://example.com", "");
    editor.schema.push_field(FieldDraft::parse("title", "h1", "").unwrap());
    editor.schema.push_field(FieldDraft::parse("link", "a", "attr").unwrap());

    controller.submit(editor.compose().unwrap()).await.unwrap();
    controller.set_view_mode(ViewMode::Structured);

    let shown: serde_json::Value =
        serde_json::from_str(&controller.displayed_content().unwrap()).unwrap();
    assert_eq!(shown[0]["link"], "/next");

    let entries = controller.history().list().await;
    let stored_schema = entries[0].request_options.extraction_schema.as_ref().unwrap();
    assert_eq!(stored_schema.fields.len(), 2);
}

#[tokio::test]
async fn test_reported_failure_is_not_saved() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "markdown": "",
            "metadata": {},
            "error_message": "net::ERR_NAME_NOT_RESOLVED"
        })))
        .mount(&mock_server)
        .await;

    let mut controller = create_controller(&mock_server, &dir);
    let request = editor("https://nowhere.invalid", "").compose().unwrap();
    let state = controller.submit(request).await.unwrap();

    let failure = state.failure().expect("Expected failed state");
    assert_eq!(failure.kind, FailureKind::Crawl);
    assert_eq!(failure.message, "net::ERR_NAME_NOT_RESOLVED");
    assert!(controller.history().list().await.is_empty());
}

#[tokio::test]
async fn test_server_error_fails_attempt() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut controller = create_controller(&mock_server, &dir);
    let request = editor("https://example.com", "").compose().unwrap();
    controller.submit(request).await.unwrap();

    let failure = controller.state().failure().expect("Expected failed state");
    assert_eq!(failure.kind, FailureKind::External);
    assert!(failure.message.contains("500"));
    assert!(controller.history().list().await.is_empty());
}

#[tokio::test]
async fn test_malformed_envelope_fails_attempt() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let mut controller = create_controller(&mock_server, &dir);
    let request = editor("https://example.com", "").compose().unwrap();
    controller.submit(request).await.unwrap();

    let failure = controller.state().failure().expect("Expected failed state");
    assert_eq!(failure.kind, FailureKind::External);
    assert!(failure.message.contains("Malformed"));
}

#[tokio::test]
async fn test_recovers_after_failure() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .and(body_partial_json(json!({ "url": "https://down.example.com" })))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .and(body_partial_json(json!({ "url": "https://up.example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "markdown": "up"
        })))
        .mount(&mock_server)
        .await;

    let mut controller = create_controller(&mock_server, &dir);

    let down = editor("https://down.example.com", "").compose().unwrap();
    controller.submit(down).await.unwrap();
    assert!(controller.state().failure().is_some());

    let up = editor("https://up.example.com", "").compose().unwrap();
    controller.submit(up).await.unwrap();
    assert_eq!(controller.displayed_content().as_deref(), Some("up"));
    assert_eq!(controller.history().list().await.len(), 1);
}

#[tokio::test]
async fn test_history_survives_reopen_and_restores_editor() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "markdown": "# Shop",
            "screenshot_base64": "iVBORw0KGgo="
        })))
        .mount(&mock_server)
        .await;

    let mut original = editor("https://shop.example.com", "List all prices");
    original.overrides.word_count_threshold = Some(3);
    original.overrides.screenshot = Some(false);
    let request = original.compose().unwrap();

    {
        let mut controller = create_controller(&mock_server, &dir);
        controller.submit(request.clone()).await.unwrap();
    }

    let history: HistoryCache<SqliteStore> =
        open_history(&dir.path().join("history.db")).unwrap();
    let entries = history.list().await;
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry.url, "https://shop.example.com");
    assert_eq!(
        entry.result.screenshot_data_uri().as_deref(),
        Some("data:image/png;base64,iVBORw0KGgo=")
    );

    let mut restored = Editor::new(RequestDefaults::default());
    restored.load_entry(entry);
    assert_eq!(restored.compose().unwrap(), request);

    let mut controller = create_controller(&mock_server, &dir);
    controller.select_entry(entry);
    assert_eq!(controller.view_mode(), Some(ViewMode::Structured));
    assert_eq!(controller.active_entry_id(), Some(entry.id.as_str()));
}

#[tokio::test]
async fn test_history_capped_at_twenty() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "markdown": "ok"
        })))
        .mount(&mock_server)
        .await;

    let mut controller = create_controller(&mock_server, &dir);
    for i in 1..=21 {
        let request = editor(&format!("https://example.com/{}", i), "").compose().unwrap();
        controller.submit(request).await.unwrap();
    }

    let entries = controller.history().list().await;
    assert_eq!(entries.len(), 20);
    assert_eq!(entries[0].url, "https://example.com/21");
    assert_eq!(entries[19].url, "https://example.com/2");
    assert_eq!(controller.active_entry_id(), Some(entries[0].id.as_str()));

    controller.clear_history().await.unwrap();
    assert!(controller.history().list().await.is_empty());
}
