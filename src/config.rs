//! Process configuration from the environment.

use std::env;

/// Default listen port.
const DEFAULT_PORT: u16 = 3000;

/// Default base URL for the provider's enhanced-transactions REST API.
const DEFAULT_REST_URL: &str = "https://api-mainnet.helius-rpc.com";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub helius_api_key: String,
    /// Base URL of the enhanced-transactions REST API.
    pub helius_rest_url: String,
    /// Full URL of the JSON-RPC endpoint used for asset metadata.
    pub helius_rpc_url: String,
    /// Payment address surfaced in API responses.
    pub pay_to_address: String,
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment, applying service defaults.
    pub fn from_env() -> Self {
        let helius_api_key = env::var("HELIUS_API_KEY").unwrap_or_default();
        let helius_rpc_url = env::var("HELIUS_RPC_URL").unwrap_or_else(|_| {
            format!("https://mainnet.helius-rpc.com/?api-key={helius_api_key}")
        });

        Self {
            helius_rest_url: env::var("HELIUS_REST_URL")
                .unwrap_or_else(|_| DEFAULT_REST_URL.to_string()),
            helius_rpc_url,
            pay_to_address: env::var("PAY_TO_ADDRESS").unwrap_or_default(),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            helius_api_key,
        }
    }
}
