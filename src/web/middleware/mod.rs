//! Middleware for the HTTP API.

pub mod auth;
pub mod cors;
pub mod security;

pub use auth::{extract_token, AuthUser};
pub use cors::create_cors_layer;
pub use security::security_headers;
