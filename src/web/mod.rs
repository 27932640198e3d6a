//! HTTP transport for the account service.
//!
//! Exposes the credential service under `/modernbank/user`, with the session
//! token carried in a cookie or a bearer header.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router, BASE_PATH};
pub use server::WebServer;
