//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;

use account_service::config::{Config, HashingConfig};
use account_service::web::{create_health_router, create_router, AppState};
use account_service::{CredentialService, Database, UserStore};

/// Base64 of a 32-byte test signing key.
pub const TEST_SECRET: &str = "dGVzdC1zaWduaW5nLWtleS0wMTIzNDU2Nzg5YWJjZGVm";

/// Configuration with a test secret and cheap hashing.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.token.secret = TEST_SECRET.to_string();
    config.hashing = HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    config
}

/// Build a credential service over the given store.
pub fn test_service(store: Arc<dyn UserStore>) -> Arc<CredentialService> {
    Arc::new(
        CredentialService::from_config(store, &test_config())
            .expect("Failed to create test service"),
    )
}

/// Create a test server backed by an in-memory SQLite database.
pub async fn create_test_server() -> (TestServer, Database) {
    let config = test_config();

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let service = test_service(Arc::new(db.user_repository()));

    let app_state = Arc::new(AppState::new(service, config.token.cookie_name.clone()));
    let router = create_router(app_state, &config.web.cors_origins).merge(create_health_router());

    let server = TestServer::new(router).expect("Failed to create test server");
    (server, db)
}
