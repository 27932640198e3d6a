//! Request DTOs.
//!
//! Password fields are redacted from `Debug` output.

use serde::Deserialize;
use validator::Validate;

use super::validation::{display_name, no_control_chars};

const REDACTED: &str = "[redacted]";

/// User registration request.
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    /// Unique user ID.
    #[validate(
        length(min = 1, max = 64, message = "Must be 1-64 characters"),
        custom(function = "no_control_chars")
    )]
    pub user_id: String,
    /// Display name.
    #[validate(
        length(min = 1, max = 64, message = "Must be 1-64 characters"),
        custom(function = "display_name")
    )]
    pub username: String,
    /// Plaintext password.
    #[validate(length(min = 1, max = 128, message = "Must be 1-128 characters"))]
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Login request.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    /// User ID.
    #[validate(length(min = 1, max = 64, message = "Must be 1-64 characters"))]
    pub user_id: String,
    /// Plaintext password.
    #[validate(length(min = 1, max = 128, message = "Must be 1-128 characters"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user_id", &self.user_id)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Password change request.
#[derive(Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, max = 128, message = "Must be 1-128 characters"))]
    pub old_password: String,
    /// New password.
    #[validate(length(min = 1, max = 128, message = "Must be 1-128 characters"))]
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("old_password", &REDACTED)
            .field("new_password", &REDACTED)
            .finish()
    }
}
