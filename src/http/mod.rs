//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span)
//!     → middleware/credentials.rs (x-xtream-* headers → Credentials)
//!     → handlers.rs (/api routes → catalog service)
//!     → response.rs (success/error envelope)
//!     → Send to client
//!
//! Non-API paths → static_files.rs (index) or ServeDir (assets)
//! ```

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod static_files;

pub use response::{ApiError, Envelope};
pub use server::{AppState, HttpServer, ServerError};
