//! Shared application state.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::cache::ResultCache;
use crate::config::Config;
use crate::providers::HeliusClient;

/// Per-request timeout on outbound provider calls.
const HTTP_CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// State shared by every request handler.
pub struct AppState {
    pub config: Config,
    pub cache: ResultCache,
    pub helius: HeliusClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(HTTP_CLIENT_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        let helius = HeliusClient::new(http, &config);

        Ok(Self {
            config,
            cache: ResultCache::new(),
            helius,
        })
    }
}
