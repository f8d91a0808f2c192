mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::mock_upstream::{MockResponse, MockUpstream};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use swipedeck::config::Config;
use swipedeck::proxy::{build_router, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

fn app_with(config: Config) -> Router {
    build_router(AppState::new(common::store(config)).expect("state"))
}

fn app_for(mock: &MockUpstream) -> (TempDir, Router, Config) {
    let (temp_dir, mut config) = common::temp_config();
    config.upstream.base_url = mock.base_url();
    (temp_dir, app_with(config.clone()), config)
}

async fn chat(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::post("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn turn(content: &str) -> Value {
    json!({"messages": [{"role": "user", "content": content}]})
}

#[tokio::test]
async fn reply_and_preferences_are_returned_and_logged() {
    let mock = MockUpstream::start().await;
    mock.enqueue_response(MockResponse::reply(
        "Hiking sounds lovely!",
        &["Enjoys hiking", "Wants   someone\nwho likes dogs"],
    ))
    .await;
    let (_dir, app, config) = app_for(&mock);

    let (status, body) = chat(&app, turn("I love hiking and dogs")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Hiking sounds lovely!");
    assert_eq!(
        body["preferences"],
        json!(["Enjoys hiking", "Wants someone who likes dogs"])
    );

    let log = std::fs::read_to_string(&config.server.preferences_path).unwrap();
    let lines: Vec<_> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("] assistant: Enjoys hiking"));
    assert!(lines[1].ends_with("] assistant: Wants someone who likes dogs"));
}

#[tokio::test]
async fn upstream_request_carries_key_version_and_tool() {
    let mock = MockUpstream::start().await;
    let (_dir, app, config) = app_for(&mock);

    let body = json!({
        "messages": [
            {"role": "user", "content": "hi"},
            {"role": "assistant", "content": "hello"},
            {"role": "user", "content": "I like jazz"}
        ],
        "system": "Be brief."
    });
    let (status, _) = chat(&app, body).await;
    assert_eq!(status, StatusCode::OK);

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v1/messages");
    assert_eq!(request.header("x-api-key"), Some("test-key"));
    assert_eq!(
        request.header("anthropic-version"),
        Some(config.upstream.api_version.as_str())
    );

    let sent = request.json();
    assert_eq!(sent["model"], config.upstream.model);
    assert_eq!(sent["system"], "Be brief.");
    assert_eq!(sent["messages"].as_array().unwrap().len(), 3);
    assert_eq!(sent["messages"][2]["content"], "I like jazz");
    assert_eq!(sent["tools"][0]["name"], "record_preference");
}

#[tokio::test]
async fn invalid_requests_never_reach_upstream() {
    let mock = MockUpstream::start().await;
    let (_dir, app, _) = app_for(&mock);

    for body in [
        json!({}),
        json!({"messages": []}),
        json!({"messages": [{"role": "bot", "content": "x"}]}),
        json!({"messages": [{"role": "user"}]}),
        json!({"messages": [{"role": "user", "content": "x"}], "system": 7}),
    ] {
        let (status, response) = chat(&app, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body={}", body);
        assert_eq!(response["error"]["type"], "invalid_request");
    }

    assert!(mock.captured_requests().await.is_empty());
}

#[tokio::test]
async fn upstream_error_status_passes_through() {
    let mock = MockUpstream::start().await;
    mock.enqueue_response(MockResponse::error(429, "Rate limited")).await;
    let (_dir, app, config) = app_for(&mock);

    let (status, body) = chat(&app, turn("hello")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["type"], "upstream_error");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Rate limited"));
    assert!(!config.server.preferences_path.exists());
}

#[tokio::test]
async fn malformed_upstream_body_is_bad_gateway() {
    let mock = MockUpstream::start().await;
    mock.enqueue_response(MockResponse::json("<html>oops</html>")).await;
    let (_dir, app, _) = app_for(&mock);

    let (status, body) = chat(&app, turn("hello")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["type"], "invalid_upstream_response");
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let mock = MockUpstream::start().await;
    mock.enqueue_response(MockResponse::default().with_delay(2500)).await;
    let (temp_dir, mut config) = common::temp_config();
    config.upstream.base_url = mock.base_url();
    config.upstream.timeout_seconds = 1;
    let app = app_with(config);

    let (status, body) = chat(&app, turn("hello")).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"]["type"], "request_timeout");
    drop(temp_dir);
}

#[tokio::test]
async fn missing_api_key_is_reported() {
    let (_dir, mut config) = common::temp_config();
    config.upstream.api_key = None;
    config.upstream.api_key_env = "SWIPEDECK_TEST_NO_SUCH_KEY".to_string();
    let app = app_with(config);

    let (status, body) = chat(&app, turn("hello")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["type"], "upstream_not_configured");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("SWIPEDECK_TEST_NO_SUCH_KEY"));
}

#[tokio::test]
async fn unreachable_upstream_is_connection_error() {
    let (_dir, mut config) = common::temp_config();
    config.upstream.base_url = format!("http://127.0.0.1:{}", common::free_port());
    let app = app_with(config);

    let (status, body) = chat(&app, turn("hello")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["type"], "connection_error");
}
