mod helpers;

use axum::http::{header::COOKIE, HeaderValue, StatusCode};
use helpers::{api_path, auth::session_cookie, setup_test_app, TestApp, TestAppOptions};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};

const SUBMIT_PATH: &str = "/generation/google/veo3-1";
const STATUS_PATH: &str = "/generation/abc123/status";

fn cookie() -> HeaderValue {
    HeaderValue::from_str(&session_cookie()).unwrap()
}

async fn app_with_provider() -> (TestApp, ServerGuard) {
    let provider = Server::new_async().await;
    let app = setup_test_app(TestAppOptions {
        provider_url: Some(provider.url()),
        ..Default::default()
    });
    (app, provider)
}

fn submit_body() -> Value {
    json!({
        "images": ["https://media.example.com/temp/a.png"],
        "prompt": "turn into cartoon"
    })
}

fn status_body(status: &str, url: Option<&str>, fail_msg: Option<&str>) -> String {
    let mut generation = json!({ "status": status });
    if let Some(url) = url {
        generation["url"] = json!(url);
    }
    if let Some(msg) = fail_msg {
        generation["failMsg"] = json!(msg);
    }
    json!({ "taskId": "abc123", "generations": [generation] }).to_string()
}

async fn poll(app: &TestApp, query_name: &str) -> (StatusCode, Value) {
    let response = app
        .client()
        .get(&api_path("/generations/status"))
        .add_header(COOKIE, cookie())
        .add_query_param(query_name, "abc123")
        .await;
    (response.status_code(), response.json())
}

#[tokio::test]
async fn test_submit_returns_provider_task_id() {
    let (app, mut provider) = app_with_provider().await;
    let mock = provider
        .mock("POST", SUBMIT_PATH)
        .match_header("x-api-key", helpers::TEST_PROVIDER_KEY)
        .match_body(Matcher::PartialJson(json!({
            "input": {
                "images": ["https://media.example.com/temp/a.png"],
                "prompt": "turn into cartoon",
                "resolution": "720p",
                "generateAudio": false
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"taskId":"abc123","status":"waiting"}"#)
        .create_async()
        .await;

    let response = app
        .client()
        .post(&api_path("/generations"))
        .add_header(COOKIE, cookie())
        .json(&submit_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["taskId"], "abc123");
    assert_eq!(body["state"], "submitted");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_forwards_only_the_first_image() {
    let (app, mut provider) = app_with_provider().await;
    let mock = provider
        .mock("POST", SUBMIT_PATH)
        .match_body(Matcher::Json(json!({
            "input": {
                "images": ["https://media.example.com/temp/first.png"],
                "prompt": "turn into cartoon",
                "resolution": "720p",
                "generateAudio": false
            }
        })))
        .with_status(200)
        .with_body(r#"{"data":{"taskId":"abc123"}}"#)
        .create_async()
        .await;

    let response = app
        .client()
        .post(&api_path("/generations"))
        .add_header(COOKIE, cookie())
        .json(&json!({
            "images": [
                "https://media.example.com/temp/first.png",
                "https://media.example.com/temp/second.png"
            ],
            "prompt": "turn into cartoon"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_without_prompt_never_reaches_provider() {
    let (app, mut provider) = app_with_provider().await;
    let mock = provider
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    for body in [
        json!({ "images": ["https://media.example.com/temp/a.png"] }),
        json!({ "prompt": "turn into cartoon" }),
        json!({ "images": [], "prompt": "turn into cartoon" }),
    ] {
        let response = app
            .client()
            .post(&api_path("/generations"))
            .add_header(COOKIE, cookie())
            .json(&body)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Image URL and prompt are required");
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_without_provider_credential() {
    let app = setup_test_app(TestAppOptions::default());

    let response = app
        .client()
        .post(&api_path("/generations"))
        .add_header(COOKIE, cookie())
        .json(&submit_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Server configuration error");
    assert!(!response.text().contains(helpers::TEST_PROVIDER_KEY));
}

#[tokio::test]
async fn test_provider_server_error_is_bad_gateway() {
    let (app, mut provider) = app_with_provider().await;
    provider
        .mock("POST", SUBMIT_PATH)
        .with_status(500)
        .with_body(r#"{"message":"internal"}"#)
        .create_async()
        .await;

    let response = app
        .client()
        .post(&api_path("/generations"))
        .add_header(COOKIE, cookie())
        .json(&submit_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert!(!response.text().contains(helpers::TEST_PROVIDER_KEY));
}

#[tokio::test]
async fn test_provider_client_error_status_passes_through() {
    let (app, mut provider) = app_with_provider().await;
    provider
        .mock("POST", SUBMIT_PATH)
        .with_status(422)
        .with_body(r#"{"message":"Prompt rejected by safety filter"}"#)
        .create_async()
        .await;

    let response = app
        .client()
        .post(&api_path("/generations"))
        .add_header(COOKIE, cookie())
        .json(&submit_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Prompt rejected by safety filter"));
}

#[tokio::test]
async fn test_submit_requires_session() {
    let (app, mut provider) = app_with_provider().await;
    let mock = provider
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let response = app
        .client()
        .post(&api_path("/generations"))
        .json(&submit_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_poll_until_success() {
    let (app, mut provider) = app_with_provider().await;

    let processing = provider
        .mock("GET", STATUS_PATH)
        .match_header("x-api-key", helpers::TEST_PROVIDER_KEY)
        .with_status(200)
        .with_body(status_body("processing", None, None))
        .create_async()
        .await;

    let (status, body) = poll(&app, "id").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["taskId"], "abc123");
    assert_eq!(body["state"], "processing");
    assert!(body.get("resultUrl").is_none());
    processing.remove_async().await;

    provider
        .mock("GET", STATUS_PATH)
        .with_status(200)
        .with_body(status_body(
            "succeed",
            Some("https://cdn.example.com/v.mp4"),
            None,
        ))
        .create_async()
        .await;

    let (status, body) = poll(&app, "id").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "succeeded");
    assert_eq!(body["resultUrl"], "https://cdn.example.com/v.mp4");
    assert_eq!(body["generations"][0]["status"], "succeed");

    // Terminal jobs answer the same way every time.
    let (_, again) = poll(&app, "id").await;
    assert_eq!(again, body);
}

#[tokio::test]
async fn test_poll_accepts_task_id_parameter() {
    let (app, mut provider) = app_with_provider().await;
    provider
        .mock("GET", STATUS_PATH)
        .with_status(200)
        .with_body(status_body("waiting", None, None))
        .create_async()
        .await;

    let (status, body) = poll(&app, "taskId").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "submitted");
}

#[tokio::test]
async fn test_success_without_url_reports_failure() {
    let (app, mut provider) = app_with_provider().await;
    provider
        .mock("GET", STATUS_PATH)
        .with_status(200)
        .with_body(status_body("succeed", None, None))
        .create_async()
        .await;

    let (status, body) = poll(&app, "id").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "failed");
    assert!(body.get("resultUrl").is_none());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_provider_failure_message_is_exposed() {
    let (app, mut provider) = app_with_provider().await;
    provider
        .mock("GET", STATUS_PATH)
        .with_status(200)
        .with_body(status_body("failed", None, Some("Content policy violation")))
        .create_async()
        .await;

    let (status, body) = poll(&app, "id").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "failed");
    assert_eq!(body["error"], "Content policy violation");
}

#[tokio::test]
async fn test_unusable_status_payload_fails_the_job() {
    let (app, mut provider) = app_with_provider().await;
    provider
        .mock("GET", STATUS_PATH)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let (status, body) = poll(&app, "id").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "failed");
    assert_eq!(body["generations"], json!([]));
}

#[tokio::test]
async fn test_poll_without_id_is_bad_request() {
    let (app, mut provider) = app_with_provider().await;
    let mock = provider
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let response = app
        .client()
        .get(&api_path("/generations/status"))
        .add_header(COOKIE, cookie())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "taskId is required");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_poll_without_provider_credential() {
    let app = setup_test_app(TestAppOptions::default());

    let (status, body) = poll(&app, "id").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server configuration error");
}

#[tokio::test]
async fn test_unknown_job_surfaces_provider_not_found() {
    let (app, mut provider) = app_with_provider().await;
    provider
        .mock("GET", STATUS_PATH)
        .with_status(404)
        .with_body(r#"{"message":"Task not found"}"#)
        .create_async()
        .await;

    let (status, body) = poll(&app, "id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Task not found"));
}

#[tokio::test]
async fn test_rejected_provider_credential_is_server_configuration_error() {
    let (app, mut provider) = app_with_provider().await;
    provider
        .mock("POST", SUBMIT_PATH)
        .with_status(401)
        .with_body(r#"{"message":"Invalid API key"}"#)
        .create_async()
        .await;

    let response = app
        .client()
        .post(&api_path("/generations"))
        .add_header(COOKIE, cookie())
        .json(&submit_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Server configuration error");
    assert_eq!(body["code"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn test_unreachable_provider_is_unavailable() {
    let app = setup_test_app(TestAppOptions {
        provider_url: Some("http://127.0.0.1:1".to_string()),
        ..Default::default()
    });

    let response = app
        .client()
        .post(&api_path("/generations"))
        .add_header(COOKIE, cookie())
        .json(&submit_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");

    let (status, body) = poll(&app, "id").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
}

#[tokio::test]
async fn test_stalled_provider_times_out() {
    // Accepts connections and never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _stalled = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let app = setup_test_app(TestAppOptions {
        provider_url: Some(format!("http://{}", addr)),
        provider_timeout_secs: 1,
        ..Default::default()
    });

    let (status, body) = poll(&app, "id").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
}

#[tokio::test]
async fn test_poll_with_empty_id_is_bad_request() {
    let (app, mut provider) = app_with_provider().await;
    let mock = provider
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let response = app
        .client()
        .get(&api_path("/generations/status"))
        .add_header(COOKIE, cookie())
        .add_query_param("id", "")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "taskId is required");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_provider_error_envelope_fails_the_job() {
    let (app, mut provider) = app_with_provider().await;
    provider
        .mock("GET", STATUS_PATH)
        .with_status(200)
        .with_body(r#"{"code":"TASK_NOT_FOUND","message":"Task not found","data":null}"#)
        .create_async()
        .await;

    let (status, body) = poll(&app, "id").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "failed");
    assert!(body.get("resultUrl").is_none());
}
