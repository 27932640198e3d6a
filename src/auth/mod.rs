//! Credential handling for the account service.
//!
//! This module provides salted password hashing, session token issuance and
//! verification, and the [`CredentialService`] that ties them to a user store.

mod password;
mod secret;
mod service;
mod token;

pub use password::{generate_salt, CredentialCodec, CredentialError, SALT_LEN};
pub use secret::{decode_secret, EnvSecretProvider, SecretProvider, StaticSecretProvider};
pub use service::CredentialService;
pub use token::{
    SessionClaims, TokenError, TokenIssuer, DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS,
};
