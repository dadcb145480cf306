//! Credential gate for the `/api` routes.
//!
//! Reads the upstream credentials from request headers and attaches them as a
//! typed `Credentials` extension. Requests missing any of them are rejected
//! before a handler runs, so no upstream call is made.

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::response::ApiError;
use crate::xtream::Credentials;

pub const X_XTREAM_HOST: &str = "x-xtream-host";
pub const X_XTREAM_USERNAME: &str = "x-xtream-username";
pub const X_XTREAM_PASSWORD: &str = "x-xtream-password";

/// Pull credentials out of headers, naming every header that is missing.
///
/// Empty or non-visible-ASCII values count as missing.
pub fn extract_credentials(headers: &HeaderMap) -> Result<Credentials, ApiError> {
    let read = |name: &'static str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    };

    match (read(X_XTREAM_HOST), read(X_XTREAM_USERNAME), read(X_XTREAM_PASSWORD)) {
        (Some(host), Some(username), Some(password)) => Ok(Credentials {
            host,
            username,
            password,
        }),
        (host, username, password) => {
            let missing = [
                (X_XTREAM_HOST, host.is_none()),
                (X_XTREAM_USERNAME, username.is_none()),
                (X_XTREAM_PASSWORD, password.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            Err(ApiError::MissingCredentials(missing))
        }
    }
}

pub async fn credentials_middleware(mut req: Request<Body>, next: Next) -> Response {
    match extract_credentials(req.headers()) {
        Ok(credentials) => {
            req.extensions_mut().insert(credentials);
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!(path = %req.uri().path(), error = %e, "Rejected request without credentials");
            e.into_response()
        }
    }
}
