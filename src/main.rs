use std::sync::Arc;

use tracing::{error, info};

use account_service::{Config, CredentialService, Database, WebServer};

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = account_service::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        account_service::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = run(config).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> account_service::Result<()> {
    config.validate()?;

    info!("Account service starting");

    let db = Database::open(&config.database.url).await?;
    let store = Arc::new(db.user_repository());
    let service = Arc::new(CredentialService::from_config(store, &config)?);

    let server = WebServer::new(&config, service)?;
    info!("Server configured on {}", server.addr());
    server.run().await
}
