//! Session token authentication extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Extractor for authenticated users.
///
/// Accepts the token from an `Authorization: Bearer` header, falling back to
/// the session cookie. Holds the user ID the token was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

impl AuthUser {
    /// The authenticated user ID.
    pub fn user_id(&self) -> &str {
        &self.0
    }
}

/// Pull the raw session token out of the request headers.
pub fn extract_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    bearer.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts, &state.cookie_name)
            .ok_or_else(|| ApiError::unauthorized("Missing authorization"))?;

        let user_id = state.service.verify_token(&token)?;
        Ok(AuthUser(user_id))
    }
}
