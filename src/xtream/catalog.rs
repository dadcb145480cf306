//! Catalog operations exposed through the `/api` routes.
//!
//! # Responsibilities
//! - Serve category listings through the per-user TTL cache
//! - Pass movie, series and series-info lookups straight through
//!
//! # Design Decisions
//! - Both category lists are fetched concurrently; either failing fails the
//!   whole call and leaves the cache untouched
//! - Concurrent misses for one username are not coalesced; each fetches

use serde_json::Value;

use crate::cache::CategoryCache;
use crate::xtream::client::XtreamClient;
use crate::xtream::types::{reshape_categories, Action, CategoryListing, Credentials, XtreamResult};

/// Upstream client plus the category cache.
#[derive(Clone)]
pub struct CatalogService {
    client: XtreamClient,
    cache: CategoryCache,
}

impl CatalogService {
    pub fn new(client: XtreamClient, cache: CategoryCache) -> Self {
        Self { client, cache }
    }

    /// Movie and series categories for this user, cached per username.
    pub async fn categories(&self, credentials: &Credentials) -> XtreamResult<CategoryListing> {
        if let Some(listing) = self.cache.get(&credentials.username) {
            tracing::debug!(username = %credentials.username, "Category cache hit");
            return Ok(listing);
        }

        tracing::info!(username = %credentials.username, "Fetching categories from upstream");

        let (movies, series) = tokio::try_join!(
            self.client.fetch(credentials, Action::GetVodCategories, &[]),
            self.client.fetch(credentials, Action::GetSeriesCategories, &[]),
        )?;

        let listing = CategoryListing {
            movie_categories: reshape_categories(Action::GetVodCategories, &movies)?,
            series_categories: reshape_categories(Action::GetSeriesCategories, &series)?,
        };

        tracing::info!(
            username = %credentials.username,
            movie_categories = listing.movie_categories.len(),
            series_categories = listing.series_categories.len(),
            "Categories fetched"
        );

        self.cache.insert(&credentials.username, listing.clone());
        Ok(listing)
    }

    /// VOD streams in one category.
    pub async fn movies(
        &self,
        credentials: &Credentials,
        category_id: Option<&str>,
    ) -> XtreamResult<Value> {
        let movies = self
            .client
            .fetch(credentials, Action::GetVodStreams, &[("category_id", category_id)])
            .await?;
        tracing::info!(category_id = ?category_id, count = item_count(&movies), "Movies fetched");
        Ok(movies)
    }

    /// Series in one category.
    pub async fn series(
        &self,
        credentials: &Credentials,
        category_id: Option<&str>,
    ) -> XtreamResult<Value> {
        let series = self
            .client
            .fetch(credentials, Action::GetSeries, &[("category_id", category_id)])
            .await?;
        tracing::info!(category_id = ?category_id, count = item_count(&series), "Series fetched");
        Ok(series)
    }

    /// Seasons and episodes of one series.
    pub async fn series_info(&self, credentials: &Credentials, series_id: &str) -> XtreamResult<Value> {
        self.client
            .fetch(credentials, Action::GetSeriesInfo, &[("series_id", Some(series_id))])
            .await
    }
}

fn item_count(value: &Value) -> usize {
    value.as_array().map_or(0, Vec::len)
}
