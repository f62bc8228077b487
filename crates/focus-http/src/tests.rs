use super::*;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use focus_api::{FocusStatus, SessionOutcome, WhitelistPreset};
use focus_core::{FocusEngine, FocusGateway};
use focus_host_api::MockSampler;
use focus_store::{spawn_store_worker, SqliteStore, Store, StoreWriter};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct Harness {
    app: Router,
    store: Arc<dyn Store>,
    writer: StoreWriter,
}

fn harness() -> Harness {
    let store: Arc<dyn Store> = Arc::new(SqliteStore::in_memory().unwrap());
    let (writer, _worker) = spawn_store_worker(store.clone(), 16);
    let engine = FocusEngine::new(Arc::new(writer.clone()), 10);
    let gateway = FocusGateway::new(engine, Arc::new(MockSampler::fixed("code")));

    let presets = vec![WhitelistPreset {
        name: "Coding".into(),
        allowed_processes: vec!["code".into()],
        allowed_websites: vec!["github.com".into()],
    }];

    let state = AppState::new(gateway, store.clone(), writer.clone(), presets);
    Harness {
        app: router(state),
        store,
        writer,
    }
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_start_returns_status() {
    let h = harness();
    let (status, body) = call(
        &h.app,
        Method::POST,
        "/api/focus/start",
        Some(json!({ "durationSeconds": 1500, "allowedProcesses": ["code"] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let snapshot: FocusStatus = serde_json::from_value(body).unwrap();
    assert!(snapshot.is_running);
    assert_eq!(snapshot.remaining_seconds, 1500);
}

#[tokio::test]
async fn test_start_validation_is_400() {
    let h = harness();

    let (status, body) = call(
        &h.app,
        Method::POST,
        "/api/focus/start",
        Some(json!({ "durationSeconds": 0, "allowedProcesses": ["code"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "DurationSeconds must be > 0" }));

    let (status, body) = call(
        &h.app,
        Method::POST,
        "/api/focus/start",
        Some(json!({ "durationSeconds": 60, "allowedProcesses": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "AllowedProcesses cannot be empty" }));
}

#[tokio::test]
async fn test_oversized_duration_is_400() {
    let h = harness();

    let (status, body) = call(
        &h.app,
        Method::POST,
        "/api/focus/start",
        Some(json!({ "durationSeconds": i64::MAX, "allowedProcesses": ["code"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "DurationSeconds must be <= 2147483647" }));

    let (_, body) = call(&h.app, Method::GET, "/api/focus/status", None).await;
    assert_eq!(body["isRunning"], false);
}

#[tokio::test]
async fn test_second_start_is_409() {
    let h = harness();
    let start = json!({ "durationSeconds": 60, "allowedProcesses": ["code"] });

    let (status, _) = call(&h.app, Method::POST, "/api/focus/start", Some(start.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&h.app, Method::POST, "/api/focus/start", Some(start)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "A focus session is already running" }));
}

#[tokio::test]
async fn test_idle_status_and_stop() {
    let h = harness();

    let (status, body) = call(&h.app, Method::GET, "/api/focus/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isRunning"], false);
    assert_eq!(body["remainingSeconds"], 0);

    let (status, _) = call(&h.app, Method::POST, "/api/focus/stop", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_stop_records_aborted_history() {
    let h = harness();
    call(
        &h.app,
        Method::POST,
        "/api/focus/start",
        Some(json!({ "durationSeconds": 60, "allowedProcesses": ["code.exe", "firefox"] })),
    )
    .await;

    let (status, body) = call(&h.app, Method::POST, "/api/focus/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isRunning"], false);
    assert!(h.writer.flush().await);

    let (_, history) = call(&h.app, Method::GET, "/api/focus/history", None).await;
    assert_eq!(
        history,
        json!([{
            "ts": history[0]["ts"],
            "minutes": 1,
            "note": "code, firefox",
            "outcome": "aborted"
        }])
    );

    let (_, profile) = call(&h.app, Method::GET, "/api/profile", None).await;
    assert_eq!(profile["totalSessions"], 1);
    assert_eq!(profile["canceledSessions"], 1);
    assert_eq!(h.store.get_history().unwrap()[0].outcome, SessionOutcome::Aborted);
}

#[tokio::test]
async fn test_usage_breach_fails_session() {
    let h = harness();
    call(
        &h.app,
        Method::POST,
        "/api/focus/start",
        Some(json!({
            "durationSeconds": 600,
            "allowedProcesses": ["code"],
            "allowedWebsites": ["github.com"],
            "graceSeconds": 20
        })),
    )
    .await;

    let (status, _) = call(
        &h.app,
        Method::POST,
        "/api/usage",
        Some(json!([
            { "url": "https://www.youtube.com/watch?v=1", "domain": "www.youtube.com", "duration": 15 },
            { "url": "", "domain": "www.youtube.com", "duration": 100 },
            { "url": "https://www.youtube.com/watch?v=2", "domain": "", "duration": 0 },
            { "url": "https://www.youtube.com/watch?v=3", "domain": "", "duration": 5 }
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&h.app, Method::GET, "/api/focus/status", None).await;
    assert_eq!(body["isRunning"], false);
    assert_eq!(body["isFailed"], true);
    assert_eq!(
        body["failReason"],
        "Used non-whitelisted website: www.youtube.com"
    );
}

#[tokio::test]
async fn test_usage_without_session_is_still_200_and_logged() {
    let h = harness();

    let (status, _) = call(
        &h.app,
        Method::POST,
        "/api/usage",
        Some(json!([
            { "url": "https://docs.rs/axum", "domain": "docs.rs", "duration": 40 },
            { "url": "https://github.com/tokio-rs", "duration": 20 },
            { "url": "https://docs.rs/tower", "domain": "docs.rs", "duration": 30 }
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&h.app, Method::POST, "/api/usage", Some(json!([]))).await;
    assert_eq!(status, StatusCode::OK);

    assert!(h.writer.flush().await);

    let (status, body) = call(&h.app, Method::GET, "/api/usage/today", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "domain": "docs.rs", "totalSeconds": 70 },
            { "domain": "github.com", "totalSeconds": 20 }
        ])
    );
}

#[tokio::test]
async fn test_presets_and_health() {
    let h = harness();

    let (status, body) = call(&h.app, Method::GET, "/api/presets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Coding");
    assert_eq!(body[0]["allowedWebsites"], json!(["github.com"]));

    let (status, body) = call(&h.app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["apiVersion"], 1);
    assert_eq!(body["storeHealthy"], true);
    assert_eq!(body["samplerBackend"], "mock");
    assert_eq!(body["sessionActive"], false);
}
