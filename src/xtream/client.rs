//! Xtream `player_api.php` client.
//!
//! # Responsibilities
//! - Build the upstream URL from per-request credentials
//! - Issue a single GET with a fixed timeout (no retry)
//! - Normalize the empty-object quirk to an empty list
//! - Collapse every failure mode into `XtreamError::Upstream`

use std::error::Error as _;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::xtream::types::{Action, Credentials, XtreamError, XtreamResult};

/// Fixed path of the Xtream JSON API on every panel.
pub const PLAYER_API_PATH: &str = "/player_api.php";

/// HTTP client for the Xtream API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct XtreamClient {
    client: Client,
}

impl XtreamClient {
    /// Create a new client with the configured per-call timeout.
    pub fn new(config: &UpstreamConfig) -> XtreamResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| XtreamError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Call one upstream action and return its JSON payload.
    ///
    /// Extra parameters with no value are left out of the query string.
    pub async fn fetch(
        &self,
        credentials: &Credentials,
        action: Action,
        params: &[(&str, Option<&str>)],
    ) -> XtreamResult<Value> {
        let url = build_url(credentials, action, params)?;
        let start = Instant::now();

        tracing::debug!(
            action = %action,
            host = %credentials.host,
            username = %credentials.username,
            "Calling Xtream API"
        );

        let result = self.send(url, action).await;

        let outcome = if result.is_ok() { "success" } else { "error" };
        metrics::record_upstream_call(action.as_str(), outcome, start);

        if let Err(e) = &result {
            tracing::error!(action = %action, error = %e, "Xtream API error");
        }

        result.map(normalize_empty)
    }

    async fn send(&self, url: Url, action: Action) -> XtreamResult<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| XtreamError::upstream(action, describe(e)))?;

        let response = response
            .error_for_status()
            .map_err(|e| XtreamError::upstream(action, describe(e)))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| XtreamError::upstream(action, describe(e)))
    }
}

/// Build `{host}/player_api.php?username=..&password=..&action=..&..`.
pub fn build_url(
    credentials: &Credentials,
    action: Action,
    params: &[(&str, Option<&str>)],
) -> XtreamResult<Url> {
    let invalid_host = |e: url::ParseError| {
        XtreamError::upstream(action, format!("invalid host '{}': {}", credentials.host, e))
    };
    let mut url = Url::parse(&credentials.host)
        .and_then(|base| base.join(PLAYER_API_PATH))
        .map_err(invalid_host)?;

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.append_pair("username", &credentials.username);
        query.append_pair("password", &credentials.password);
        query.append_pair("action", action.as_str());
        for (key, value) in params {
            if let Some(value) = value {
                query.append_pair(key, value);
            }
        }
    }

    Ok(url)
}

/// Upstream panels answer `{}` instead of `[]` when a list is empty.
pub fn normalize_empty(value: Value) -> Value {
    match value {
        Value::Object(map) if map.is_empty() => Value::Array(Vec::new()),
        other => other,
    }
}

/// The request URL carries the password, so it never reaches the message.
fn describe(error: reqwest::Error) -> String {
    let error = error.without_url();
    if error.is_timeout() {
        "request timed out".to_string()
    } else if let Some(status) = error.status() {
        format!("upstream returned status {}", status)
    } else if error.is_decode() {
        "response was not valid JSON".to_string()
    } else {
        // reqwest's Display on connect errors omits the cause chain.
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
