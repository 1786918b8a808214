use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use calplus_server::{AppState, app};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test context for endpoint tests.
pub struct TestContext {
    #[allow(dead_code)] // dir is kept to ensure it's not dropped
    pub dir: TempDir,
    pub data_file: PathBuf,
    pub app: Router,
}

pub fn setup() -> TestContext {
    let dir = tempfile::tempdir().expect("create temp dir");
    let data_file = dir.path().join("events.json");
    let app = app(AppState::new(&data_file));
    TestContext {
        dir,
        data_file,
        app,
    }
}

/// Send a request and return the status with the parsed JSON body
/// (or the raw text as a JSON string when it is not JSON).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("build request");

    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}
