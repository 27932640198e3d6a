//! Credential service.
//!
//! Orchestrates registration, login, password rotation and username lookup
//! over an injected [`UserStore`], and issues session tokens for successful
//! authentications.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::password::{generate_salt, CredentialCodec};
use super::secret::StaticSecretProvider;
use super::token::TokenIssuer;
use crate::config::Config;
use crate::db::{StoreError, UserRecord, UserStore};
use crate::{AccountError, Result};

/// Account operations exposed to the request layer.
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn UserStore>,
    codec: CredentialCodec,
    tokens: TokenIssuer,
}

impl CredentialService {
    /// Create a service from its parts.
    pub fn new(store: Arc<dyn UserStore>, codec: CredentialCodec, tokens: TokenIssuer) -> Self {
        Self {
            store,
            codec,
            tokens,
        }
    }

    /// Create a service from configuration.
    ///
    /// The signing secret is decoded once here. Hashing cost and token
    /// lifetime come from the `[hashing]` and `[token]` sections.
    pub fn from_config(store: Arc<dyn UserStore>, config: &Config) -> Result<Self> {
        let codec = CredentialCodec::new(&config.hashing)
            .map_err(|e| AccountError::Config(format!("hashing: {e}")))?;
        let secrets = StaticSecretProvider::from_base64(&config.token.secret)
            .map_err(|e| AccountError::Config(format!("token.secret: {e}")))?;
        let tokens = TokenIssuer::new(Arc::new(secrets)).with_ttl(config.token.expiry_secs);
        Ok(Self::new(store, codec, tokens))
    }

    /// Session token lifetime in seconds.
    pub fn token_ttl_secs(&self) -> u64 {
        self.tokens.ttl_secs()
    }

    /// Register a new user and return a session token for them.
    ///
    /// The token is signed before the record is written, so a signing failure
    /// leaves the store untouched and the registration can be retried.
    pub async fn register(&self, user_id: &str, username: &str, password: &str) -> Result<String> {
        require("user_id", user_id)?;
        require("username", username)?;
        require("password", password)?;

        let salt = generate_salt()?;
        let password_hash = self.codec.hash_password(password, &salt)?;
        let record = UserRecord::new(user_id, username, password_hash, salt);
        let token = self.tokens.issue(user_id)?;

        self.store.insert(&record).await.map_err(|e| {
            if let StoreError::Internal(msg) = &e {
                error!(user_id = %user_id, "Failed to store new user: {}", msg);
            }
            AccountError::from(e)
        })?;

        info!(user_id = %user_id, "User registered");
        Ok(token)
    }

    /// Authenticate a user and return a session token.
    ///
    /// An unknown user and a wrong password produce the same
    /// [`AccountError::Unauthorized`] after the same amount of hashing.
    pub async fn login(&self, user_id: &str, password: &str) -> Result<String> {
        require("user_id", user_id)?;
        require("password", password)?;

        self.authenticate(user_id, password).await?;

        info!(user_id = %user_id, "User logged in");
        Ok(self.tokens.issue(user_id)?)
    }

    /// Replace a user's password after checking the current one.
    ///
    /// Tokens issued before the change remain valid until they expire.
    pub async fn change_password(
        &self,
        user_id: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        require("user_id", user_id)?;
        require("old_password", old_password)?;
        require("new_password", new_password)?;

        self.authenticate(user_id, old_password).await?;

        let salt = generate_salt()?;
        let password_hash = self.codec.hash_password(new_password, &salt)?;

        self.store
            .update_password_fields(user_id, &password_hash, &salt)
            .await
            .map_err(|e| {
                if let StoreError::Internal(msg) = &e {
                    error!(user_id = %user_id, "Failed to update password: {}", msg);
                }
                AccountError::from(e)
            })?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Get the display name of a user.
    pub async fn lookup_username(&self, user_id: &str) -> Result<String> {
        require("user_id", user_id)?;
        let record = self.store.find_by_id(user_id).await?;
        Ok(record.username)
    }

    /// Issue a session token for a user.
    pub fn issue_token(&self, user_id: &str) -> Result<String> {
        require("user_id", user_id)?;
        Ok(self.tokens.issue(user_id)?)
    }

    /// Verify a session token and return the user ID it was issued for.
    pub fn verify_token(&self, token: &str) -> Result<String> {
        if token.is_empty() {
            return Err(AccountError::Unauthorized);
        }
        let claims = self.tokens.verify(token).map_err(|e| {
            let err = AccountError::from(e);
            if let AccountError::Internal(msg) = &err {
                error!("Token verification failed: {}", msg);
            }
            err
        })?;
        Ok(claims.user_id)
    }

    /// Check a user's password against the stored credentials.
    async fn authenticate(&self, user_id: &str, password: &str) -> Result<()> {
        let record = match self.store.find_by_id(user_id).await {
            Ok(record) => record,
            Err(StoreError::NotFound) => {
                self.codec.verify_decoy(password);
                return Err(AccountError::Unauthorized);
            }
            Err(e) => {
                error!(user_id = %user_id, "Failed to load user: {}", e);
                return Err(e.into());
            }
        };

        match self
            .codec
            .validate_credentials(&record.password_hash, &record.salt, password)
        {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(user_id = %user_id, "Authentication failed");
                Err(AccountError::Unauthorized)
            }
            Err(e) => {
                error!(user_id = %user_id, "Stored credentials are malformed: {}", e);
                Err(e.into())
            }
        }
    }
}

impl std::fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialService")
            .field("codec", &self.codec)
            .field("tokens", &self.tokens)
            .finish()
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AccountError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}
