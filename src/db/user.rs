//! User record model.

/// A persisted user account.
///
/// `password_hash` is always the hash of `password ‖ salt`; the two fields are
/// written together and never updated separately.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRecord {
    /// Unique user ID (primary key).
    pub user_id: String,
    /// Display name (not unique).
    pub username: String,
    /// Argon2 PHC hash of the salted password.
    pub password_hash: String,
    /// Base64 record salt.
    pub salt: String,
}

impl UserRecord {
    /// Create a new user record.
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        salt: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            password_hash: password_hash.into(),
            salt: salt.into(),
        }
    }

    /// Whether both halves of the credential pair are present.
    pub fn has_credentials(&self) -> bool {
        !self.password_hash.is_empty() && !self.salt.is_empty()
    }
}
