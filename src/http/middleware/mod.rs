//! Request middleware.

pub mod credentials;

pub use credentials::{credentials_middleware, extract_credentials};
