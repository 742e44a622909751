//! Integration tests for songslide-relay API endpoints
//!
//! Tests cover:
//! - Health endpoint shape
//! - Pass-through: upstream 200 + JSON body returned verbatim
//! - Payload fidelity: the upstream receives the exact inbound body
//! - Failure collapse: upstream error status, non-JSON body, and
//!   unreachable upstream all yield 500 {"error": "Something went wrong"}
//!
//! Stub upstreams are small axum routers bound to ephemeral ports.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::util::ServiceExt; // for `oneshot` method

use songslide_relay::{build_router, AppState};

/// Test helper: serve a stub upstream router on an ephemeral port
async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Test helper: relay app pointed at the given upstream URL
fn setup_app(upstream_url: String) -> Router {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    build_router(AppState::new(http, upstream_url))
}

/// Test helper: POST /api/submit request with a JSON body
fn submit_request(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/submit")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app("http://127.0.0.1:1/unused".to_string());

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "songslide-relay");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_submit_passes_upstream_body_through() {
    let upstream = Router::new().route(
        "/",
        post(|| async { Json(json!({ "status": "ok" })) }),
    );
    let addr = spawn_upstream(upstream).await;
    let app = setup_app(format!("http://{}/", addr));

    let response = app
        .oneshot(submit_request(&json!({ "a": 1 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_submit_forwards_exact_payload() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let seen_handler = seen.clone();

    let upstream = Router::new().route(
        "/",
        post(move |Json(payload): Json<Value>| {
            let seen = seen_handler.clone();
            async move {
                *seen.lock().unwrap() = Some(payload);
                Json(json!({ "received": true }))
            }
        }),
    );
    let addr = spawn_upstream(upstream).await;
    let app = setup_app(format!("http://{}/", addr));

    let payload = json!({
        "week_number": 3,
        "week_suffix": "rd",
        "BN_offering": "Sam & Family",
        "songs": { "song_1": { "main": "Om", "eng": "Hello" } }
    });
    let response = app.oneshot(submit_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(seen.lock().unwrap().take(), Some(payload));
}

#[tokio::test]
async fn test_submit_upstream_error_status_collapses_to_generic_500() {
    let upstream = Router::new().route(
        "/",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "upstream exploded" })),
            )
        }),
    );
    let addr = spawn_upstream(upstream).await;
    let app = setup_app(format!("http://{}/", addr));

    let response = app
        .oneshot(submit_request(&json!({ "a": 1 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    // Upstream detail must not leak through
    assert_eq!(body, json!({ "error": "Something went wrong" }));
}

#[tokio::test]
async fn test_submit_non_json_upstream_body_collapses_to_generic_500() {
    let upstream = Router::new().route("/", post(|| async { "this is not json" }));
    let addr = spawn_upstream(upstream).await;
    let app = setup_app(format!("http://{}/", addr));

    let response = app
        .oneshot(submit_request(&json!({ "a": 1 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({ "error": "Something went wrong" }));
}

#[tokio::test]
async fn test_submit_unreachable_upstream_collapses_to_generic_500() {
    // Bind then drop to get a port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = setup_app(format!("http://{}/", addr));

    let response = app
        .oneshot(submit_request(&json!({ "a": 1 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({ "error": "Something went wrong" }));
}

#[tokio::test]
async fn test_submit_failure_does_not_poison_next_request() {
    let upstream = Router::new().route(
        "/",
        post(|| async { Json(json!({ "status": "ok" })) }),
    );
    let addr = spawn_upstream(upstream).await;

    // First request against a dead port fails...
    let dead = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let failing = setup_app(format!("http://{}/", dead_addr));
    let response = failing
        .oneshot(submit_request(&json!({ "a": 1 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // ...and a healthy relay keeps serving afterwards
    let app = setup_app(format!("http://{}/", addr));
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(submit_request(&json!({ "a": 1 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
