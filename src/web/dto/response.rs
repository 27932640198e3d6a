//! Response DTOs.

use serde::Serialize;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Returned by register and login. The token itself travels only in the
/// HTTP-only session cookie.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Authenticated user.
    pub user_id: String,
    /// Cookie lifetime in seconds.
    pub expires_in: u64,
}

/// Username lookup response.
#[derive(Debug, Serialize)]
pub struct UsernameResponse {
    /// User ID.
    pub user_id: String,
    /// Display name.
    pub username: String,
}

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
