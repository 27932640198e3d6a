//! User handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::web::dto::{
    ApiResponse, ChangePasswordRequest, MessageResponse, UsernameResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /modernbank/user/username/:user_id - Look up a display name.
pub async fn get_username(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UsernameResponse>>, ApiError> {
    let username = state.service.lookup_username(&user_id).await?;
    Ok(Json(ApiResponse::new(UsernameResponse { user_id, username })))
}

/// PATCH /modernbank/user/api/:user_id/password - Change own password.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    // A token only authorizes changes to its own account
    if auth.user_id() != user_id {
        tracing::warn!(
            user_id = %user_id,
            token_user_id = %auth.user_id(),
            "Password change rejected: token does not match path"
        );
        return Err(ApiError::unauthorized("invalid credentials"));
    }

    state
        .service
        .change_password(&user_id, &req.old_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Password changed",
    ))))
}
