//! HTTP API tests
//!
//! Drive the router in-process with `oneshot`; the LLM is a stub.

use std::fs;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use pharma_investigator::api::{router, ApiState};
use pharma_investigator::llm::adapters::openai::OpenAiAdapter;
use pharma_investigator::llm::adapters::stub::StubAdapter;
use pharma_investigator::llm::adapters::transport::{FakeTransport, Transport};
use pharma_investigator::llm::Adapter;
use pharma_investigator::Workbench;

fn app_with(dir: &TempDir, stub: StubAdapter) -> Router {
    router(Arc::new(ApiState {
        workbench: Arc::new(Workbench::new(dir.path())),
        adapter: Arc::new(Adapter::Stub(stub)),
    }))
}

fn app_over_http(dir: &TempDir, transport: FakeTransport) -> Router {
    let adapter = OpenAiAdapter::with_transport(
        "http://llm.invalid/v1".to_string(),
        "analysis-model".to_string(),
        "sk-test".to_string(),
        Transport::Fake(transport),
    );
    router(Arc::new(ApiState {
        workbench: Arc::new(Workbench::new(dir.path())),
        adapter: Arc::new(Adapter::OpenAi(adapter)),
    }))
}

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("iot")).unwrap();
    fs::write(
        dir.path().join("iot/sensor_alerts.csv"),
        "alert_id,shipment_id,timestamp\nA1,SHP-001,2024-03-01 08:15:00\n",
    )
    .unwrap();
    dir
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn transcript_body() -> String {
    json!({
        "transcript": [
            {"role": "user", "content": "Why was SHP-001 quarantined?"},
            {"role": "assistant", "content": "Temperature excursion."}
        ],
        "final_answer": "Temperature excursion.",
        "score": 0.4
    })
    .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let dir = data_dir();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(app_with(&dir, StubAdapter::new()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["llm_provider"], "stub");
}

#[tokio::test]
async fn test_analyze_transcript_with_stub() {
    let dir = data_dir();
    let request = post_json("/api/analyze-transcript", transcript_body());

    let (status, body) = send(app_with(&dir, StubAdapter::new()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["reason"].as_str().unwrap().starts_with("Stub analysis"));
    assert!(body["suggestion"].is_string());
}

#[tokio::test]
async fn test_analyze_transcript_extracts_json_from_prose() {
    let dir = data_dir();
    let stub = StubAdapter::with_response(
        "Here you go:\n{\"reason\": \"Skipped the sensor log\", \"suggestion\": \"Query sensor_alerts first\"}\nThanks."
            .to_string(),
    );

    let (status, body) = send(
        app_with(&dir, stub),
        post_json("/api/analyze-transcript", transcript_body()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reason"], "Skipped the sensor log");
}

#[tokio::test]
async fn test_analyze_transcript_without_json_reply_is_500() {
    let dir = data_dir();
    let stub = StubAdapter::with_response("I cannot help with that.".to_string());

    let (status, body) = send(
        app_with(&dir, stub),
        post_json("/api/analyze-transcript", transcript_body()),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to analyze transcript");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_analyze_transcript_provider_outage_is_500() {
    let dir = data_dir();
    let app = app_over_http(&dir, FakeTransport::with_status(502, "bad gateway"));

    let (status, body) = send(app, post_json("/api/analyze-transcript", transcript_body())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to analyze transcript");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("502"), "{}", details);
    assert!(details.contains("bad gateway"), "{}", details);
}

#[tokio::test]
async fn test_analyze_transcript_over_http_transport() {
    let dir = data_dir();
    let completion = json!({
        "choices": [{"message": {
            "role": "assistant",
            "content": "{\"reason\": \"Ignored the quarantine log\", \"suggestion\": \"Build the timeline first\"}"
        }}]
    });
    let app = app_over_http(&dir, FakeTransport::new(&completion.to_string()));

    let (status, body) = send(app, post_json("/api/analyze-transcript", transcript_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reason"], "Ignored the quarantine log");
    assert_eq!(body["suggestion"], "Build the timeline first");
}

#[tokio::test]
async fn test_analyze_transcript_empty_completion_is_500() {
    let dir = data_dir();
    let completion = json!({"choices": [{"message": {"role": "assistant", "content": ""}}]});
    let app = app_over_http(&dir, FakeTransport::new(&completion.to_string()));

    let (status, body) = send(app, post_json("/api/analyze-transcript", transcript_body())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to analyze transcript");
}

#[tokio::test]
async fn test_analyze_transcript_malformed_body_is_500() {
    let dir = data_dir();
    let request = post_json("/api/analyze-transcript", "{not json".to_string());

    let (status, body) = send(app_with(&dir, StubAdapter::new()), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_analyze_transcript_missing_transcript_is_500() {
    let dir = data_dir();
    let request = post_json("/api/analyze-transcript", json!({"score": 1}).to_string());

    let (status, _) = send(app_with(&dir, StubAdapter::new()), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_list_tools_route() {
    let dir = data_dir();
    let request = Request::builder().uri("/api/tools").body(Body::empty()).unwrap();

    let (status, body) = send(app_with(&dir, StubAdapter::new()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tools"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_call_tool_route() {
    let dir = data_dir();
    let request = post_json(
        "/api/tools/query/call",
        json!({"table": "sensor_alerts", "filters": {"shipment_id": "SHP-001"}}).to_string(),
    );

    let (status, body) = send(app_with(&dir, StubAdapter::new()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_error"], false);
    assert_eq!(body["content"]["results"][0]["alert_id"], "A1");
}

#[tokio::test]
async fn test_call_unknown_tool_reports_error_in_body() {
    let dir = data_dir();
    let request = post_json("/api/tools/shell_exec/call", "{}".to_string());

    let (status, body) = send(app_with(&dir, StubAdapter::new()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_error"], true);
    assert_eq!(body["content"]["kind"], "not_found");
}

#[tokio::test]
async fn test_call_tool_malformed_arguments_is_400() {
    let dir = data_dir();
    let request = post_json("/api/tools/query/call", "{\"table\": \"sensor_alerts\"".to_string());

    let (status, body) = send(app_with(&dir, StubAdapter::new()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_call_tool_without_body() {
    let dir = data_dir();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tools/list_sources/call")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app_with(&dir, StubAdapter::new()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_error"], false);
    assert_eq!(body["content"]["total_sources"], 1);
}
