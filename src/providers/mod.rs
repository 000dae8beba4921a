//! External data providers.
//!
//! The scanner and result builder talk to providers only through the
//! traits here, so tests can substitute in-memory fixtures for the real
//! REST client.

pub mod helius;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{EnhancedTransaction, TokenMetadata};

/// Paged access to a wallet's enhanced transaction history.
#[async_trait]
pub trait TransactionHistory: Send + Sync {
    /// One page of the wallet's history, newest first. `before` is the
    /// pagination cursor (a signature from the previous page); an empty
    /// page means end of history.
    async fn history_page(
        &self,
        wallet: &str,
        before: Option<&str>,
    ) -> Result<Vec<EnhancedTransaction>, ProviderError>;
}

/// Token metadata lookup by mint.
#[async_trait]
pub trait TokenMetadataSource: Send + Sync {
    /// Metadata for a mint, or `None` when the provider has no record.
    async fn token_metadata(&self, mint: &str) -> Result<Option<TokenMetadata>, ProviderError>;
}

pub use helius::HeliusClient;
