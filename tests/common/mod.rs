//! Shared utilities for integration testing.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use xtream_relay::cache::Clock;
use xtream_relay::config::RelayConfig;
use xtream_relay::http::HttpServer;
use xtream_relay::lifecycle::Shutdown;

/// A programmable stand-in for an Xtream panel's `player_api.php`.
///
/// Records every query it receives; answers per action with a configured
/// status and body, or `200 []` when nothing is configured.
#[derive(Clone, Default)]
pub struct MockUpstream {
    calls: Arc<Mutex<Vec<HashMap<String, String>>>>,
    replies: Arc<Mutex<HashMap<String, (u16, String)>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    /// Start on an ephemeral port; returns the mock and its base URL.
    pub async fn start() -> (Self, String) {
        let mock = MockUpstream::default();
        let app = Router::new()
            .route("/player_api.php", get(player_api))
            .with_state(mock.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        (mock, format!("http://{}", addr))
    }

    pub fn respond_json(&self, action: &str, status: u16, body: Value) {
        self.respond_raw(action, status, body.to_string());
    }

    pub fn respond_raw(&self, action: &str, status: u16, body: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .insert(action.to_string(), (status, body.into()));
    }

    /// Number of calls received for `action`.
    pub fn calls(&self, action: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.get("action").map(String::as_str) == Some(action))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Query parameters of the most recent call for `action`.
    pub fn last_query(&self, action: &str) -> Option<HashMap<String, String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|q| q.get("action").map(String::as_str) == Some(action))
            .cloned()
    }
}

async fn player_api(
    State(mock): State<MockUpstream>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let action = query.get("action").cloned().unwrap_or_default();
    mock.calls.lock().unwrap().push(query);

    let (status, body) = mock
        .replies
        .lock()
        .unwrap()
        .get(&action)
        .cloned()
        .unwrap_or((200, "[]".to_string()));

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// A running relay and the handle that stops it.
pub struct Relay {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl Relay {
    pub async fn start(config: RelayConfig, clock: Arc<dyn Clock>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::with_clock(config, clock).unwrap();
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        Self { addr, shutdown }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Relay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Client that never goes through a system proxy.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// GET `url` with the three credential headers.
#[allow(dead_code)]
pub async fn get_with_credentials(
    url: &str,
    host: &str,
    username: &str,
    password: &str,
) -> reqwest::Response {
    client()
        .get(url)
        .header("x-xtream-host", host)
        .header("x-xtream-username", username)
        .header("x-xtream-password", password)
        .send()
        .await
        .expect("Relay unreachable")
}
