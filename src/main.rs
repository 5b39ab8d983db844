use std::sync::Arc;
use tracing::{error, info};

use image_retriever::config::Config;
use image_retriever::retrieval::HttpRetrievalClient;
use image_retriever::ui::{make_config, App, AppServices};

fn main() {
    // Use RUST_LOG env var if set, otherwise default to info level
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = match HttpRetrievalClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting image retriever against {}", config.backend_url);

    let services = AppServices {
        backend: Arc::new(client),
    };

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_config())
        .with_context(services)
        .launch(App);
}
