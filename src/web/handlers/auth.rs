//! Registration and login handlers.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::auth::CredentialService;
use crate::web::dto::{ApiResponse, LoginRequest, RegisterRequest, SessionResponse, ValidatedJson};
use crate::web::error::ApiError;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Credential service.
    pub service: Arc<CredentialService>,
    /// Name of the session cookie.
    pub cookie_name: String,
}

impl AppState {
    /// Create a new application state.
    pub fn new(service: Arc<CredentialService>, cookie_name: impl Into<String>) -> Self {
        Self {
            service,
            cookie_name: cookie_name.into(),
        }
    }

    /// Build the session cookie carrying `token`.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(self.service.token_ttl_secs() as i64))
            .build()
    }

    fn session(&self, user_id: String, token: String) -> (CookieJar, SessionResponse) {
        let jar = CookieJar::new().add(self.session_cookie(token));
        let body = SessionResponse {
            user_id,
            expires_in: self.service.token_ttl_secs(),
        };
        (jar, body)
    }
}

/// POST /modernbank/user - Register a user and start a session.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    let token = state
        .service
        .register(&req.user_id, &req.username, &req.password)
        .await?;

    let (jar, body) = state.session(req.user_id, token);
    Ok((StatusCode::CREATED, jar, Json(ApiResponse::new(body))))
}

/// POST /modernbank/user/login - Authenticate and start a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    let token = state.service.login(&req.user_id, &req.password).await?;

    let (jar, body) = state.session(req.user_id, token);
    Ok((jar, Json(ApiResponse::new(body))))
}
