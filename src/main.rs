//! HTTP server for the Compa-Ratio Band Engine.
//!
//! Environment:
//! - `COMPA_CONFIG_DIR`: configuration directory (default `./config/default`)
//! - `COMPA_ENGINE_ADDR`: listen address (default `0.0.0.0:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use std::env;
use std::net::SocketAddr;

use compa_engine::api::{AppState, create_router};
use compa_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("COMPA_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind = env::var("COMPA_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = bind.parse()?;

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        config_name = %config.config().metadata().name,
        config_version = %config.config().metadata().version,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Compa engine listening");
    axum::serve(listener, app).await?;
    Ok(())
}
