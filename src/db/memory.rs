//! In-memory user store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{StoreError, UserStore};
use super::user::UserRecord;

/// [`UserStore`] backed by a `HashMap`, for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of a stored record.
    pub async fn get(&self, user_id: &str) -> Option<UserRecord> {
        self.users.read().await.get(user_id).cloned()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, record: &UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&record.user_id) {
            return Err(StoreError::Conflict);
        }
        users.insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<UserRecord, StoreError> {
        self.users
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_password_fields(
        &self,
        user_id: &str,
        password_hash: &str,
        salt: &str,
    ) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(user_id).ok_or(StoreError::NotFound)?;
        record.password_hash = password_hash.to_string();
        record.salt = salt.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryUserStore::new();
        let record = UserRecord::new("u1", "Alice", "hash", "salt");

        store.insert(&record).await.unwrap();

        assert_eq!(store.find_by_id("u1").await.unwrap(), record);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_duplicate() {
        let store = InMemoryUserStore::new();
        store
            .insert(&UserRecord::new("u1", "Alice", "hash", "salt"))
            .await
            .unwrap();

        let result = store
            .insert(&UserRecord::new("u1", "Mallory", "other", "other"))
            .await;

        assert_eq!(result, Err(StoreError::Conflict));
        assert_eq!(store.get("u1").await.unwrap().username, "Alice");
    }

    #[tokio::test]
    async fn test_find_missing() {
        let store = InMemoryUserStore::new();
        assert_eq!(store.find_by_id("nobody").await, Err(StoreError::NotFound));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_password_fields() {
        let store = InMemoryUserStore::new();
        store
            .insert(&UserRecord::new("u1", "Alice", "hash1", "salt1"))
            .await
            .unwrap();

        store
            .update_password_fields("u1", "hash2", "salt2")
            .await
            .unwrap();

        let record = store.get("u1").await.unwrap();
        assert_eq!(record.password_hash, "hash2");
        assert_eq!(record.salt, "salt2");
        assert_eq!(record.username, "Alice");
    }

    #[tokio::test]
    async fn test_update_missing() {
        let store = InMemoryUserStore::new();
        let result = store.update_password_fields("nobody", "hash", "salt").await;
        assert_eq!(result, Err(StoreError::NotFound));
    }
}
