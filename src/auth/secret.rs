//! Signing secret providers for session tokens.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::token::TokenError;

/// Source of the HMAC key used to sign and verify session tokens.
pub trait SecretProvider: Send + Sync {
    /// Return the decoded signing key.
    fn signing_secret(&self) -> Result<Vec<u8>, TokenError>;
}

/// Decode a base64 signing secret.
///
/// Surrounding whitespace is ignored. An empty secret, or one that decodes to
/// zero bytes, is rejected.
pub fn decode_secret(encoded: &str) -> Result<Vec<u8>, TokenError> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Err(TokenError::MissingSecret("empty".to_string()));
    }
    let secret = STANDARD
        .decode(encoded)
        .map_err(|_| TokenError::InvalidSecret)?;
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }
    Ok(secret)
}

/// Reads the secret from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    var: String,
}

impl EnvSecretProvider {
    /// Create a provider reading the given environment variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SecretProvider for EnvSecretProvider {
    fn signing_secret(&self) -> Result<Vec<u8>, TokenError> {
        let encoded =
            std::env::var(&self.var).map_err(|_| TokenError::MissingSecret(self.var.clone()))?;
        decode_secret(&encoded)
    }
}

/// Holds a secret decoded once at construction.
#[derive(Clone)]
pub struct StaticSecretProvider {
    secret: Vec<u8>,
}

impl StaticSecretProvider {
    /// Create a provider from raw key bytes.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Create a provider from a base64-encoded secret.
    pub fn from_base64(encoded: &str) -> Result<Self, TokenError> {
        Ok(Self::new(decode_secret(encoded)?))
    }
}

impl SecretProvider for StaticSecretProvider {
    fn signing_secret(&self) -> Result<Vec<u8>, TokenError> {
        Ok(self.secret.clone())
    }
}

impl std::fmt::Debug for StaticSecretProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSecretProvider")
            .field("secret", &"[redacted]")
            .finish()
    }
}
