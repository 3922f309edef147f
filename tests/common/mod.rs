//! Shared helpers: a stub external profile API and server startup.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Maximum time any test is allowed to run before we consider it hung.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Stub of the external `create_profile` API.
///
/// Answers every POST with a fixed status and body and records the raw
/// request bodies it received.
#[derive(Clone)]
pub struct StubApi {
    status: StatusCode,
    body: String,
    pub received: Arc<Mutex<Vec<Value>>>,
}

impl StubApi {
    pub fn new(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn received(&self) -> Vec<Value> {
        self.received.lock().await.clone()
    }
}

async fn stub_handler(State(stub): State<StubApi>, body: Bytes) -> (StatusCode, String) {
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    stub.received.lock().await.push(value);
    (stub.status, stub.body.clone())
}

/// Serve `router` on a random local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

/// Start a stub external API, return (base URL, stub).
pub async fn start_stub_api(status: StatusCode, body: &str) -> (String, StubApi) {
    let stub = StubApi::new(status, body);
    let router = Router::new()
        .route("/api/create_profile", post(stub_handler))
        .with_state(stub.clone());
    (serve(router).await, stub)
}

/// A base URL nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
