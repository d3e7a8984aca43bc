//! HttpBackend against a local axum server standing in for the simulation API.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use futures::StreamExt;
use parking_lot::Mutex;
use pipeviz::playback::recording::RecordingSlots;
use pipeviz::playback::{PlaybackController, PlaybackSettings};
use pipeviz::simulation::{
    ErrorKind, HttpBackend, SimulationBackend, SimulationError, SimulationRequest,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::common::fixtures;

type Captured = Arc<Mutex<Vec<Value>>>;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/simulate")
}

fn backend(endpoint: String) -> HttpBackend {
    HttpBackend::new(endpoint, Duration::from_secs(5))
}

async fn simulate_ok(State(seen): State<Captured>, Json(body): Json<Value>) -> impl IntoResponse {
    seen.lock().push(body);
    Json(fixtures::encrypted_exchange())
}

#[tokio::test]
async fn test_posts_camel_case_request() {
    let seen = Captured::default();
    let router = Router::new()
        .route("/api/simulate", post(simulate_ok))
        .with_state(seen.clone());
    let endpoint = serve(router).await;

    let request = SimulationRequest {
        message: "Hello".into(),
        auth_token: "SECRET123".into(),
        use_encryption: true,
        enc_key: "3".into(),
    };
    let result = backend(endpoint).simulate(&request).await.unwrap();

    assert_eq!(result, fixtures::encrypted_exchange());
    let bodies = seen.lock().clone();
    assert_eq!(
        bodies,
        vec![json!({
            "message": "Hello",
            "authToken": "SECRET123",
            "useEncryption": true,
            "encKey": "3",
        })]
    );
}

#[tokio::test]
async fn test_error_status_is_request_failure() {
    let router = Router::new().route(
        "/api/simulate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let endpoint = serve(router).await;

    let err = backend(endpoint)
        .simulate(&SimulationRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RequestFailure);
    match err {
        SimulationError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_response_without_steps_is_malformed() {
    let router = Router::new().route(
        "/api/simulate",
        post(|| async { Json(json!({ "logs": [] })) }),
    );
    let endpoint = serve(router).await;

    let err = backend(endpoint)
        .simulate(&SimulationRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_unknown_fields_and_missing_logs() {
    let router = Router::new().route(
        "/api/simulate",
        post(|| async {
            Json(json!({
                "steps": [
                    { "title": "Fork Process", "actor": "system", "description": "fork()" },
                    { "title": "Parent Prepares Message", "actor": "parent",
                      "dataAfter": { "messagePlain": "Hello", "pid": 42 } },
                ],
            }))
        }),
    );
    let endpoint = serve(router).await;

    let result = backend(endpoint)
        .simulate(&SimulationRequest::default())
        .await
        .unwrap();
    assert_eq!(result.steps.len(), 2);
    assert!(result.logs.is_empty());
    assert_eq!(
        result.steps[1]
            .data_after
            .as_ref()
            .and_then(|d| d.message_plain.as_deref()),
        Some("Hello")
    );
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let router = Router::new().route(
        "/api/simulate",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "steps": [], "logs": [] }))
        }),
    );
    let endpoint = serve(router).await;

    let err = HttpBackend::new(endpoint, Duration::from_millis(100))
        .simulate(&SimulationRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SimulationError::Timeout(100)));
}

#[tokio::test]
async fn test_stalled_body_times_out() {
    let router = Router::new().route(
        "/api/simulate",
        post(|| async {
            let head = futures::stream::once(async {
                Ok::<_, std::io::Error>(Bytes::from_static(b"{\"steps\": ["))
            });
            Body::from_stream(head.chain(futures::stream::pending()))
        }),
    );
    let endpoint = serve(router).await;

    let simulate = async {
        HttpBackend::new(endpoint, Duration::from_millis(100))
            .simulate(&SimulationRequest::default())
            .await
    };
    let err = tokio::time::timeout(Duration::from_secs(3), simulate)
        .await
        .expect("request must give up on its own")
        .unwrap_err();
    assert!(matches!(err, SimulationError::Timeout(100)));
}

#[tokio::test]
async fn test_unreachable_backend_surfaces_error_in_slots() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let slots = Arc::new(RecordingSlots::new());
    let controller = PlaybackController::new(
        Arc::new(backend(format!("http://{addr}/api/simulate"))),
        slots.clone(),
        PlaybackSettings::instant(),
    );

    let err = controller
        .run(SimulationRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestFailure);

    let state = slots.snapshot();
    assert!(state.steps.entries.is_empty());
    assert!(state.run_enabled);
    assert_eq!(state.error, Some(err.to_string()));
}
