//! Service entry point.

use std::sync::Arc;

use anyhow::Result;
use curve_exit_badge::config::Config;
use curve_exit_badge::server::{self, AppState};
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = Config::from_env();
    if config.helius_api_key.is_empty() {
        warn!("HELIUS_API_KEY is not set; provider calls will be rejected upstream");
    }

    info!(
        port = config.port,
        version = env!("CARGO_PKG_VERSION"),
        "starting curve-exit-badge"
    );

    let state = Arc::new(AppState::new(config)?);
    server::serve(state).await
}
