//! Xtream Codes API integration.
//!
//! # Data Flow
//! ```text
//! Credentials (from the gate)
//!     → catalog.rs (cache lookup, action selection)
//!     → client.rs (URL build, GET, `{}` normalization)
//!     → types.rs (reshape categories)
//! ```

pub mod catalog;
pub mod client;
pub mod types;

pub use catalog::CatalogService;
pub use client::XtreamClient;
pub use types::{Action, Category, CategoryListing, Credentials, XtreamError, XtreamResult};
