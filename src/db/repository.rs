//! SQLite user repository.

use async_trait::async_trait;

use super::store::{StoreError, UserStore};
use super::user::UserRecord;
use super::DbPool;

/// [`UserStore`] backed by the SQLite `users` table.
///
/// Inserts and password updates each run in their own transaction.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    /// Create a new UserRepository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn internal(e: sqlx::Error) -> StoreError {
    StoreError::Internal(e.to_string())
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, record: &UserRecord) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(internal)?;

        sqlx::query(
            "INSERT INTO users (user_id, username, password_hash, salt) VALUES (?, ?, ?, ?)",
        )
        .bind(&record.user_id)
        .bind(&record.username)
        .bind(&record.password_hash)
        .bind(&record.salt)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Conflict,
            _ => internal(e),
        })?;

        tx.commit().await.map_err(internal)
    }

    async fn find_by_id(&self, user_id: &str) -> Result<UserRecord, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, username, password_hash, salt FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?
        .ok_or(StoreError::NotFound)
    }

    async fn update_password_fields(
        &self,
        user_id: &str,
        password_hash: &str,
        salt: &str,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(internal)?;

        let result = sqlx::query(
            "UPDATE users SET password_hash = ?, salt = ?, updated_at = datetime('now')
             WHERE user_id = ?",
        )
        .bind(password_hash)
        .bind(salt)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(internal)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await.map_err(internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup() -> (Database, UserRepository) {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool().clone());
        (db, repo)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (_db, repo) = setup().await;
        let record = UserRecord::new("u1", "Alice", "hash", "salt");

        repo.insert(&record).await.unwrap();

        assert_eq!(repo.find_by_id("u1").await.unwrap(), record);
    }

    #[tokio::test]
    async fn test_insert_duplicate_is_conflict() {
        let (_db, repo) = setup().await;
        repo.insert(&UserRecord::new("u1", "Alice", "hash", "salt"))
            .await
            .unwrap();

        let result = repo
            .insert(&UserRecord::new("u1", "Mallory", "other", "other"))
            .await;

        assert_eq!(result, Err(StoreError::Conflict));
        let stored = repo.find_by_id("u1").await.unwrap();
        assert_eq!(stored.username, "Alice");
        assert_eq!(stored.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_duplicate_usernames_allowed() {
        let (_db, repo) = setup().await;
        repo.insert(&UserRecord::new("u1", "Alice", "hash", "salt"))
            .await
            .unwrap();
        repo.insert(&UserRecord::new("u2", "Alice", "hash", "salt"))
            .await
            .unwrap();

        assert_eq!(repo.find_by_id("u2").await.unwrap().username, "Alice");
    }

    #[tokio::test]
    async fn test_insert_rejects_partial_credentials() {
        let (_db, repo) = setup().await;
        let result = repo.insert(&UserRecord::new("u1", "Alice", "hash", "")).await;

        assert!(matches!(result, Err(StoreError::Internal(_))));
        assert_eq!(repo.find_by_id("u1").await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_find_missing() {
        let (_db, repo) = setup().await;
        assert_eq!(repo.find_by_id("nobody").await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_update_password_fields() {
        let (_db, repo) = setup().await;
        repo.insert(&UserRecord::new("u1", "Alice", "hash1", "salt1"))
            .await
            .unwrap();

        repo.update_password_fields("u1", "hash2", "salt2")
            .await
            .unwrap();

        let record = repo.find_by_id("u1").await.unwrap();
        assert_eq!(record.password_hash, "hash2");
        assert_eq!(record.salt, "salt2");
        assert_eq!(record.username, "Alice");
    }

    #[tokio::test]
    async fn test_update_is_all_or_nothing() {
        let (_db, repo) = setup().await;
        repo.insert(&UserRecord::new("u1", "Alice", "hash1", "salt1"))
            .await
            .unwrap();

        // Empty salt violates the CHECK constraint; neither field changes
        let result = repo.update_password_fields("u1", "hash2", "").await;
        assert!(matches!(result, Err(StoreError::Internal(_))));

        let record = repo.find_by_id("u1").await.unwrap();
        assert_eq!(record.password_hash, "hash1");
        assert_eq!(record.salt, "salt1");
    }

    #[tokio::test]
    async fn test_update_missing() {
        let (_db, repo) = setup().await;
        let result = repo.update_password_fields("nobody", "hash", "salt").await;
        assert_eq!(result, Err(StoreError::NotFound));
    }
}
