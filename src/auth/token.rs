//! Stateless session tokens.
//!
//! Tokens are HS256 JWTs carrying the user ID and an absolute expiry. Nothing
//! is stored server-side, so a token stays valid for its full lifetime once
//! issued.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::secret::SecretProvider;

/// Default token lifetime (24 hours).
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Longest lifetime a deployment may configure (30 days).
pub const MAX_TOKEN_TTL_SECS: u64 = 30 * DEFAULT_TOKEN_TTL_SECS;

/// Session token errors.
#[derive(Error, Debug)]
pub enum TokenError {
    /// No signing secret is available.
    #[error("signing secret is not configured ({0})")]
    MissingSecret(String),

    /// The signing secret could not be decoded.
    #[error("signing secret is not valid base64")]
    InvalidSecret,

    /// Signing the claims failed.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// The token is past its expiry.
    #[error("token has expired")]
    Expired,

    /// Bad signature, malformed structure or missing claims.
    #[error("invalid token")]
    Invalid,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The authenticated user.
    pub user_id: String,
    /// Issued at (seconds since epoch).
    pub iat: i64,
    /// Expiration (seconds since epoch).
    pub exp: i64,
    /// Token ID.
    pub jti: String,
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    secrets: Arc<dyn SecretProvider>,
    ttl_secs: u64,
}

impl TokenIssuer {
    /// Create an issuer with the default 24 hour lifetime.
    pub fn new(secrets: Arc<dyn SecretProvider>) -> Self {
        Self {
            secrets,
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    /// Set the token lifetime in seconds.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Token lifetime in seconds.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Issue a token for `user_id`, valid from now.
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token for `user_id` as if issued at `now`.
    pub fn issue_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let secret = self.secrets.signing_secret()?;
        let expires_at = i64::try_from(self.ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                TokenError::Signing(format!("token lifetime {}s is out of range", self.ttl_secs))
            })?;
        let claims = SessionClaims {
            user_id: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&secret),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let secret = self.secrets.signing_secret()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<SessionClaims>(token, &DecodingKey::from_secret(&secret), &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    TokenError::Invalid
                }
            })?;

        if data.claims.user_id.is_empty() {
            return Err(TokenError::Invalid);
        }
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
