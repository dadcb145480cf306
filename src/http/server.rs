//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, credential gate)
//! - Serve the front-end bundle
//! - Bind server to listener and shut down on signal

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::cache::{CategoryCache, Clock, SystemClock};
use crate::config::{RelayConfig, StaticFilesConfig};
use crate::http::handlers;
use crate::http::middleware::credentials_middleware;
use crate::http::static_files;
use crate::xtream::{CatalogService, XtreamClient, XtreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub static_files: StaticFilesConfig,
}

/// Errors building the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Upstream(#[from] XtreamError),
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a server whose category cache reads time from `clock`.
    pub fn with_clock(config: RelayConfig, clock: Arc<dyn Clock>) -> Result<Self, ServerError> {
        let client = XtreamClient::new(&config.upstream)?;
        let cache = CategoryCache::with_clock(&config.cache, clock);

        let state = AppState {
            catalog: Arc::new(CatalogService::new(client, cache)),
            static_files: config.static_files.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let api = Router::new()
            .route("/categories", get(handlers::categories))
            .route("/movies", get(handlers::movies))
            .route("/series", get(handlers::series))
            .route("/series_info/{series_id}", get(handlers::series_info))
            .fallback(handlers::not_found)
            .layer(middleware::from_fn(credentials_middleware));

        Router::new()
            .route("/", get(static_files::index))
            .nest("/api", api)
            .fallback_service(ServeDir::new(&config.static_files.root))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
