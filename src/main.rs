//! HTTP server for the settlement engine.
//!
//! Reads `FINIQUITO_CONFIG_DIR` (default `./config/mx2026`) and
//! `SERVER_ADDR` (default `127.0.0.1:3000`). Log verbosity follows
//! `RUST_LOG`.

use std::env;
use std::error::Error;

use finiquito_engine::api::{AppState, create_router};
use finiquito_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/mx2026";
const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("FINIQUITO_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.into());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        reference_year = config.tables().statute.reference_year,
        uma = %config.economy().uma,
        "Loaded statute configuration"
    );

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&server_addr).await?;
    info!(addr = %server_addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
