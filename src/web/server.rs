//! HTTP server for the account service.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::auth::CredentialService;
use crate::config::Config;
use crate::{AccountError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// Web server for the user API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// CORS allowed origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, service: Arc<CredentialService>) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| AccountError::Config(format!("invalid server address: {e}")))?;

        let app_state = AppState::new(service, config.token.cookie_name.clone());

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins: config.web.cors_origins.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Build the full application router.
    pub fn router(&self) -> Router {
        create_router(self.app_state.clone(), &self.cors_origins).merge(create_health_router())
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> Result<()> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HashingConfig;
    use crate::db::InMemoryUserStore;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn create_test_config() -> Config {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.token.secret = "dGVzdC1zaWduaW5nLWtleS0wMTIzNDU2Nzg5YWJjZGVm".to_string();
        config.hashing = HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        };
        config
    }

    fn create_service(config: &Config) -> Arc<CredentialService> {
        Arc::new(
            CredentialService::from_config(Arc::new(InMemoryUserStore::new()), config).unwrap(),
        )
    }

    #[test]
    fn test_web_server_new() {
        let config = create_test_config();
        let server = WebServer::new(&config, create_service(&config)).unwrap();
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[test]
    fn test_web_server_invalid_host() {
        let mut config = create_test_config();
        config.server.host = "not a host".to_string();
        let result = WebServer::new(&config, create_service(&config));
        assert!(matches!(result, Err(AccountError::Config(_))));
    }

    #[tokio::test]
    async fn test_web_server_run() {
        let config = create_test_config();
        let server = WebServer::new(&config, create_service(&config)).unwrap();
        let addr = server.run_with_addr().await.unwrap();

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("OK"));
    }
}
