//! Helius client: enhanced-transactions REST API and DAS metadata RPC.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::ProviderError;
use crate::providers::{TokenMetadataSource, TransactionHistory};
use crate::types::{EnhancedTransaction, TokenMetadata};

/// Shared client for both Helius surfaces.
#[derive(Debug, Clone)]
pub struct HeliusClient {
    http: Client,
    rest_url: String,
    rpc_url: String,
    api_key: String,
}

impl HeliusClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            rest_url: config.helius_rest_url.clone(),
            rpc_url: config.helius_rpc_url.clone(),
            api_key: config.helius_api_key.clone(),
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::Status { status, body })
    }
}

#[async_trait]
impl TransactionHistory for HeliusClient {
    #[instrument(skip(self), fields(wallet = %wallet, before = before.unwrap_or("-")))]
    async fn history_page(
        &self,
        wallet: &str,
        before: Option<&str>,
    ) -> Result<Vec<EnhancedTransaction>, ProviderError> {
        let url = format!("{}/v0/addresses/{}/transactions", self.rest_url, wallet);
        let mut query: Vec<(&str, &str)> = vec![("api-key", self.api_key.as_str())];
        if let Some(before) = before {
            query.push(("before", before));
        }

        let response = self.http.get(&url).query(&query).send().await?;
        let response = Self::check_status(response).await?;
        let page: Vec<EnhancedTransaction> = response
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;

        debug!(transactions = page.len(), "fetched history page");
        Ok(page)
    }
}

#[async_trait]
impl TokenMetadataSource for HeliusClient {
    #[instrument(skip(self), fields(mint = %mint))]
    async fn token_metadata(&self, mint: &str) -> Result<Option<TokenMetadata>, ProviderError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": "getAsset",
            "method": "getAsset",
            "params": { "id": mint },
        });

        let response = self.http.post(&self.rpc_url).json(&request).send().await?;
        let response = Self::check_status(response).await?;
        let payload: Value = response
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;

        let Some(result) = payload.get("result").filter(|result| !result.is_null()) else {
            debug!("no asset record for mint");
            return Ok(None);
        };

        Ok(Some(extract_metadata(result)))
    }
}

/// Pull symbol, name and decimals out of a DAS asset record, preferring
/// `content.metadata` and falling back to `token_info`.
fn extract_metadata(result: &Value) -> TokenMetadata {
    let content_meta = result.pointer("/content/metadata");
    let token_info = result.get("token_info");

    let pick = |field: &str| -> Option<String> {
        content_meta
            .and_then(|meta| meta.get(field))
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .or_else(|| {
                token_info
                    .and_then(|info| info.get(field))
                    .and_then(Value::as_str)
                    .filter(|value| !value.is_empty())
            })
            .map(str::to_string)
    };

    TokenMetadata {
        symbol: pick("symbol").unwrap_or_else(|| "UNKNOWN".to_string()),
        name: pick("name").unwrap_or_else(|| "Unknown Token".to_string()),
        decimals: token_info
            .and_then(|info| info.get("decimals"))
            .and_then(Value::as_u64)
            .unwrap_or(6) as u8,
    }
}
