//! JSON response envelope and error mapping.
//!
//! Every `/api` response has the shape `{status: "success", data}` or
//! `{status: "error", message}`.
//!
//! # Design Decisions
//! - Missing credentials map to 401, bad query strings to 400, unknown
//!   `/api` paths to 404
//! - Every upstream failure maps to 500 with its message passed through

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::xtream::XtreamError;

/// The `/api` response body.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success { data: T },
    Error { message: String },
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Envelope::Success { data })
    }
}

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more `x-xtream-*` headers were absent or empty.
    #[error("Missing Xtream credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    /// The query string did not match the route's parameters.
    #[error(transparent)]
    InvalidQuery(#[from] QueryRejection),

    /// No `/api` route matches the path.
    #[error("Unknown API route: {0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] XtreamError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCredentials(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope::<()>::Error {
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Result type for `/api` handlers.
pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;
