//! Front-end entry page.
//!
//! Other assets are served by `ServeDir` as the router fallback.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::path::PathBuf;

use crate::config::StaticFilesConfig;
use crate::http::server::AppState;

pub fn index_path(config: &StaticFilesConfig) -> PathBuf {
    PathBuf::from(&config.root).join(&config.index)
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Response {
    let path = index_path(&state.static_files);

    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read index page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "The application could not be loaded. Make sure '{}' exists in the '{}' folder.",
                    state.static_files.index, state.static_files.root
                ),
            )
                .into_response()
        }
    }
}
