//! `/api` route handlers.
//!
//! Each handler receives the `Credentials` attached by the credential gate
//! and delegates to the catalog service.

use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Path, Query, State},
    Extension,
};
use serde::Deserialize;
use serde_json::Value;

use crate::http::response::{ApiError, ApiResult, Envelope};
use crate::http::server::AppState;
use crate::xtream::{CategoryListing, Credentials};

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category_id: Option<String>,
}

/// `GET /api/categories`
pub async fn categories(
    State(state): State<AppState>,
    Extension(credentials): Extension<Credentials>,
) -> ApiResult<CategoryListing> {
    let listing = state.catalog.categories(&credentials).await?;
    Ok(Envelope::success(listing))
}

/// `GET /api/movies?category_id=`
pub async fn movies(
    State(state): State<AppState>,
    Extension(credentials): Extension<Credentials>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> ApiResult<Value> {
    let Query(query) = query?;
    let movies = state
        .catalog
        .movies(&credentials, query.category_id.as_deref())
        .await?;
    Ok(Envelope::success(movies))
}

/// `GET /api/series?category_id=`
pub async fn series(
    State(state): State<AppState>,
    Extension(credentials): Extension<Credentials>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> ApiResult<Value> {
    let Query(query) = query?;
    let series = state
        .catalog
        .series(&credentials, query.category_id.as_deref())
        .await?;
    Ok(Envelope::success(series))
}

/// `GET /api/series_info/{series_id}`
pub async fn series_info(
    State(state): State<AppState>,
    Extension(credentials): Extension<Credentials>,
    Path(series_id): Path<String>,
) -> ApiResult<Value> {
    let info = state.catalog.series_info(&credentials, &series_id).await?;
    Ok(Envelope::success(info))
}

/// Any other path under `/api`. Still behind the credential gate.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
