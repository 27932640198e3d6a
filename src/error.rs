//! Error types for the account service.

use thiserror::Error;

use crate::auth::{CredentialError, TokenError};
use crate::db::StoreError;

/// Common error type for account operations.
///
/// The first five variants are the error kinds the request layer maps to
/// protocol responses. A failed login and an unknown user both surface as
/// [`AccountError::Unauthorized`] so callers cannot tell them apart.
#[derive(Error, Debug)]
pub enum AccountError {
    /// Malformed or missing request input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Bad credentials, or a missing, expired or invalid token.
    #[error("invalid credentials")]
    Unauthorized,

    /// The resource already exists.
    #[error("{0} already exists")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Random source, hashing, store, secret or commit failure.
    #[error("internal error: {0}")]
    Internal(String),

    /// Database connection or migration error.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for AccountError {
    fn from(e: sqlx::Error) -> Self {
        AccountError::Database(e.to_string())
    }
}

impl From<CredentialError> for AccountError {
    fn from(e: CredentialError) -> Self {
        AccountError::Internal(e.to_string())
    }
}

impl From<StoreError> for AccountError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict => AccountError::Conflict("user".to_string()),
            StoreError::NotFound => AccountError::NotFound("user".to_string()),
            StoreError::Internal(msg) => AccountError::Internal(msg),
        }
    }
}

impl From<TokenError> for AccountError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired | TokenError::Invalid => AccountError::Unauthorized,
            other => AccountError::Internal(other.to_string()),
        }
    }
}

/// Result type alias for account operations.
pub type Result<T> = std::result::Result<T, AccountError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display_is_generic() {
        assert_eq!(AccountError::Unauthorized.to_string(), "invalid credentials");
    }

    #[test]
    fn test_conflict_display() {
        let err = AccountError::Conflict("user".to_string());
        assert_eq!(err.to_string(), "user already exists");
    }

    #[test]
    fn test_not_found_display() {
        let err = AccountError::NotFound("user".to_string());
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(
            AccountError::from(StoreError::Conflict),
            AccountError::Conflict(_)
        ));
        assert!(matches!(
            AccountError::from(StoreError::NotFound),
            AccountError::NotFound(_)
        ));
        assert!(matches!(
            AccountError::from(StoreError::Internal("disk full".into())),
            AccountError::Internal(msg) if msg == "disk full"
        ));
    }

    #[test]
    fn test_token_error_conversion() {
        assert!(matches!(
            AccountError::from(TokenError::Expired),
            AccountError::Unauthorized
        ));
        assert!(matches!(
            AccountError::from(TokenError::Invalid),
            AccountError::Unauthorized
        ));
        assert!(matches!(
            AccountError::from(TokenError::InvalidSecret),
            AccountError::Internal(_)
        ));
    }

    #[test]
    fn test_credential_error_is_internal() {
        let err: AccountError = CredentialError::InvalidHash.into();
        assert!(matches!(err, AccountError::Internal(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AccountError = io_err.into();
        assert!(matches!(err, AccountError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }
}
