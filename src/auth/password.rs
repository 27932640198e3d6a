//! Salted password hashing and verification.
//!
//! Each stored credential is the Argon2id hash of `password ‖ salt`, where
//! `salt` is 16 random bytes kept next to the hash in the user record. The PHC
//! string produced by Argon2 carries its own parameters and internal salt, so
//! verification does not depend on the current hashing configuration.

use std::sync::Arc;

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand_core::{OsRng, RngCore};
use thiserror::Error;

use crate::config::HashingConfig;

/// Number of random bytes in a record salt.
pub const SALT_LEN: usize = 16;

/// Credential hashing errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The OS random source failed.
    #[error("random source unavailable: {0}")]
    RandomSource(String),

    /// Hashing parameters were rejected.
    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// The stored hash is not a valid PHC string.
    #[error("invalid password hash format")]
    InvalidHash,

    /// The stored record has no salt.
    #[error("stored salt is missing")]
    MissingSalt,
}

/// Generate a fresh record salt.
///
/// Returns 16 bytes from the OS random source, base64 encoded (24 characters).
pub fn generate_salt() -> Result<String, CredentialError> {
    let bytes = random_bytes()?;
    Ok(STANDARD.encode(bytes))
}

fn random_bytes() -> Result<[u8; SALT_LEN], CredentialError> {
    let mut bytes = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CredentialError::RandomSource(e.to_string()))?;
    Ok(bytes)
}

fn salted(password: &str, salt: &str) -> String {
    let mut value = String::with_capacity(password.len() + salt.len());
    value.push_str(password);
    value.push_str(salt);
    value
}

/// Argon2id hasher for salted credentials.
#[derive(Clone)]
pub struct CredentialCodec {
    argon2: Argon2<'static>,
    /// Hash of a random secret, checked when no stored record exists so that
    /// unknown users cost the same Argon2 work as known ones.
    decoy_hash: Arc<str>,
    decoy_salt: Arc<str>,
}

impl CredentialCodec {
    /// Create a codec with the given cost parameters.
    pub fn new(config: &HashingConfig) -> Result<Self, CredentialError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| CredentialError::InvalidParams(e.to_string()))?;

        let mut codec = Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            decoy_hash: Arc::from(""),
            decoy_salt: Arc::from(generate_salt()?),
        };
        let decoy_hash = codec.hash_password(&generate_salt()?, &codec.decoy_salt)?;
        codec.decoy_hash = Arc::from(decoy_hash);
        Ok(codec)
    }

    /// Hash `password ‖ salt`.
    ///
    /// Returns a PHC-formatted string that embeds the Argon2 parameters and a
    /// fresh internal salt.
    pub fn hash_password(&self, password: &str, salt: &str) -> Result<String, CredentialError> {
        let internal_salt = SaltString::encode_b64(&random_bytes()?)
            .map_err(|e| CredentialError::HashError(e.to_string()))?;

        let hash = self
            .argon2
            .hash_password(salted(password, salt).as_bytes(), &internal_salt)
            .map_err(|e| CredentialError::HashError(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Check a candidate password against a stored hash and salt.
    ///
    /// Returns `Ok(false)` for a wrong password and an error only when the
    /// stored data is malformed. The comparison is constant-time.
    pub fn validate_credentials(
        &self,
        stored_hash: &str,
        stored_salt: &str,
        candidate: &str,
    ) -> Result<bool, CredentialError> {
        if stored_salt.is_empty() {
            return Err(CredentialError::MissingSalt);
        }
        let parsed = PasswordHash::new(stored_hash).map_err(|_| CredentialError::InvalidHash)?;

        // Parameters come from the parsed hash, not from this codec
        match self
            .argon2
            .verify_password(salted(candidate, stored_salt).as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CredentialError::HashError(e.to_string())),
        }
    }

    /// Run a full verification of `candidate` against the decoy hash.
    ///
    /// Used when the user does not exist. Always `false`.
    pub fn verify_decoy(&self, candidate: &str) -> bool {
        matches!(
            self.validate_credentials(&self.decoy_hash, &self.decoy_salt, candidate),
            Ok(true)
        )
    }
}

impl Default for CredentialCodec {
    fn default() -> Self {
        Self::new(&HashingConfig::default()).expect("valid Argon2 params")
    }
}

impl std::fmt::Debug for CredentialCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCodec").finish_non_exhaustive()
    }
}
