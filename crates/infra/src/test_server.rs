//! Canned-response HTTP server for exercising the outbound clients.
//!
//! Answers every request with one fixed status and JSON body, and keeps what
//! it received so tests can assert on the wire request.

use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::Value;

#[derive(Debug, Clone)]
pub(crate) struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl SeenRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: Value,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

pub(crate) struct TestServer {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn respond_with(status: StatusCode, body: Value) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(record).with_state(Canned {
            status,
            body,
            seen: seen.clone(),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            seen,
            handle,
        }
    }

    /// The single request received so far.
    pub fn only_request(&self) -> SeenRequest {
        let seen = self.seen.lock().unwrap();
        assert_eq!(seen.len(), 1, "expected exactly one request, got {}", seen.len());
        seen[0].clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(canned): State<Canned>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    canned.seen.lock().unwrap().push(SeenRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        headers,
        body,
    });
    (canned.status, Json(canned.body.clone())).into_response()
}
