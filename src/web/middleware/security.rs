//! Response hardening headers.

use axum::{
    body::Body,
    http::{
        header::{
            HeaderName, HeaderValue, CACHE_CONTROL, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
        Request,
    },
    middleware::Next,
    response::Response,
};

const FIXED_HEADERS: [(HeaderName, &str); 3] = [
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_FRAME_OPTIONS, "DENY"),
    (REFERRER_POLICY, "no-referrer"),
];

/// Default for responses without their own `Cache-Control`. Session and
/// account responses must never be stored by a shared cache.
const NO_STORE: &str = "no-store, max-age=0";

/// Add hardening headers to every response, errors included.
pub async fn security_headers(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in FIXED_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    headers
        .entry(CACHE_CONTROL)
        .or_insert(HeaderValue::from_static(NO_STORE));

    response
}

#[cfg(test)]
mod tests {
    use axum::{
        http::{header::SET_COOKIE, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    use super::*;
    use crate::web::error::ApiError;

    fn app() -> Router {
        Router::new()
            .route(
                "/denied",
                get(|| async { ApiError::unauthorized("invalid credentials") }),
            )
            .route(
                "/session",
                get(|| async { ([(SET_COOKIE, "jwt_token=abc; HttpOnly")], "ok") }),
            )
            .route(
                "/cached",
                get(|| async { ([(CACHE_CONTROL, "public, max-age=60")], "ok") }),
            )
            .layer(middleware::from_fn(security_headers))
    }

    async fn fetch(uri: &str) -> Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_error_responses_are_hardened() {
        let response = fetch("/denied").await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        for (name, value) in FIXED_HEADERS {
            assert_eq!(response.headers()[&name], value);
        }
        assert_eq!(response.headers()[CACHE_CONTROL], NO_STORE);
    }

    #[tokio::test]
    async fn test_session_cookie_is_kept_and_not_cacheable() {
        let response = fetch("/session").await;

        assert_eq!(response.headers()[SET_COOKIE], "jwt_token=abc; HttpOnly");
        assert_eq!(response.headers()[CACHE_CONTROL], NO_STORE);
    }

    #[tokio::test]
    async fn test_handler_cache_control_wins() {
        let response = fetch("/cached").await;

        assert_eq!(response.headers()[CACHE_CONTROL], "public, max-age=60");
        assert_eq!(response.headers()[X_FRAME_OPTIONS], "DENY");
    }
}
