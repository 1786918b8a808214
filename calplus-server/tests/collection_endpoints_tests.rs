use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

mod common;

fn sample_collection() -> serde_json::Value {
    json!([
        {
            "id": 1768000000000u64,
            "title": "Standup",
            "start": "2026-01-12T09:30",
            "end": "2026-01-12T09:45",
            "repeat": "weekly",
            "level": 1,
            "desc": "",
            "completed": false
        },
        {
            "id": 1768000000001u64,
            "title": "Release",
            "start": "2026-01-12T14:00",
            "end": "2026-01-12T16:00",
            "repeat": "none",
            "level": 3
        }
    ])
}

#[tokio::test]
async fn get_collection_before_any_save_is_empty_array() {
    let ctx = common::setup();
    let (status, body) = common::send(&ctx.app, Method::GET, "/collection", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert!(!ctx.data_file.exists());
}

#[tokio::test]
async fn post_replaces_collection_and_get_returns_it() {
    let ctx = common::setup();

    let (status, ack) =
        common::send(&ctx.app, Method::POST, "/collection", Some(sample_collection())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, json!({ "status": "success" }));

    let (status, body) = common::send(&ctx.app, Method::GET, "/collection", None).await;
    assert_eq!(status, StatusCode::OK);
    let events = body.as_array().expect("array");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["title"], "Standup");
    // Legacy record without `completed` comes back normalized
    assert_eq!(events[1]["completed"], false);

    // A second POST replaces, never merges
    let (status, _) = common::send(&ctx.app, Method::POST, "/collection", Some(json!([]))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = common::send(&ctx.app, Method::GET, "/collection", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn saving_what_was_loaded_leaves_the_file_unchanged() {
    let ctx = common::setup();
    let mut collection = sample_collection();
    let records = collection.as_array_mut().unwrap();
    records.push(json!({
        "id": 3, "title": "No notes", "start": "2026-01-13T09:00", "end": "2026-01-13T10:00",
        "repeat": "none", "level": 0, "desc": null, "completed": false
    }));
    records.push(json!({ "id": "abc", "title": "Text id", "start": null }));

    common::send(&ctx.app, Method::POST, "/collection", Some(collection)).await;
    let first = std::fs::read_to_string(&ctx.data_file).unwrap();

    let (_, loaded) = common::send(&ctx.app, Method::GET, "/collection", None).await;
    assert_eq!(loaded[2]["desc"], Value::Null);
    assert!(loaded[2].as_object().unwrap().contains_key("desc"));
    common::send(&ctx.app, Method::POST, "/collection", Some(loaded)).await;

    assert_eq!(std::fs::read_to_string(&ctx.data_file).unwrap(), first);
}

#[tokio::test]
async fn records_that_are_not_events_are_stored_as_sent() {
    let ctx = common::setup();
    let collection = json!([
        { "id": 1, "title": "No repeat", "start": "2026-01-12T09:00", "end": "2026-01-12T10:00", "level": 1 },
        { "id": "abc", "title": "Text id", "start": "2026-01-12T09:00", "end": "2026-01-12T10:00",
          "repeat": "none", "level": 1 },
        { "id": 2, "title": "Null start", "start": null, "end": "2026-01-12T10:00",
          "repeat": "none", "level": 1 }
    ]);

    let (status, _) =
        common::send(&ctx.app, Method::POST, "/collection", Some(collection.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = common::send(&ctx.app, Method::GET, "/collection", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, collection);
}

#[tokio::test]
async fn legacy_api_paths_share_the_same_file() {
    let ctx = common::setup();
    let (status, _) =
        common::send(&ctx.app, Method::POST, "/api/events", Some(sample_collection())).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = common::send(&ctx.app, Method::GET, "/collection", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (status, _) = common::send(&ctx.app, Method::POST, "/api/todos", Some(json!([]))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = common::send(&ctx.app, Method::GET, "/api/events", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn unreadable_file_reports_500_with_error_body() {
    let ctx = common::setup();
    std::fs::write(&ctx.data_file, "{ definitely not an array").unwrap();

    let (status, body) = common::send(&ctx.app, Method::GET, "/collection", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Serialization error"));
}

#[tokio::test]
async fn health_check() {
    let ctx = common::setup();
    let (status, body) = common::send(&ctx.app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));
}
