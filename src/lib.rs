//! Xtream relay library.
//!
//! A small HTTP relay between a browser front end and an Xtream Codes IPTV
//! panel. Credentials travel in `x-xtream-*` headers on every `/api` request;
//! category listings are cached per username for a fixed TTL.

pub mod cache;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod xtream;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
