//! User store abstraction.
//!
//! The credential service talks to persistence only through [`UserStore`],
//! so the SQLite repository and the in-memory store are interchangeable.

use async_trait::async_trait;
use thiserror::Error;

use super::user::UserRecord;

/// User store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with the same user ID already exists.
    #[error("user already exists")]
    Conflict,

    /// No record with the given user ID.
    #[error("user not found")]
    NotFound,

    /// Backend failure.
    #[error("store error: {0}")]
    Internal(String),
}

/// Persistence operations required by the credential service.
///
/// Each write is atomic for its row: an insert either stores the whole record
/// or nothing, and a password update replaces hash and salt together.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new record. Fails with [`StoreError::Conflict`] on a duplicate user ID.
    async fn insert(&self, record: &UserRecord) -> Result<(), StoreError>;

    /// Look up a record by user ID.
    async fn find_by_id(&self, user_id: &str) -> Result<UserRecord, StoreError>;

    /// Replace the password hash and salt of an existing record.
    async fn update_password_fields(
        &self,
        user_id: &str,
        password_hash: &str,
        salt: &str,
    ) -> Result<(), StoreError>;
}
