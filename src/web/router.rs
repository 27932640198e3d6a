//! Router configuration for the HTTP API.

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{change_password, get_username, login, register, AppState};
use super::middleware::{create_cors_layer, security_headers};

/// Base path of the user API.
pub const BASE_PATH: &str = "/modernbank/user";

/// Create the user API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/", post(register))
        .route("/login", post(login))
        .route("/username/:user_id", get(get_username));

    // Token required (checked by the AuthUser extractor)
    let protected_routes = Router::new().route("/api/:user_id/password", patch(change_password));

    let user_routes = Router::new().merge(public_routes).merge(protected_routes);

    Router::new()
        .nest(BASE_PATH, user_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let response = create_health_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }
}
