//! Venue-attribution sell classifier.
//!
//! The core of the service: given a wallet and a token, find the first
//! qualifying sell in the wallet's history and attribute it to a known
//! trading venue with a weighted-evidence score.

pub mod builder;
pub mod delta;
pub mod detector;
pub mod scanner;
pub mod scoring;
pub mod types;
pub mod venues;

pub use scanner::MAX_PAGES;
pub use types::{SellDetection, VenueScore};

use crate::error::ClassifyError;
use crate::providers::{TokenMetadataSource, TransactionHistory};
use crate::types::ClassificationResult;

/// Scan `wallet`'s history and classify its exit from `token`.
pub async fn classify_exit(
    history: &dyn TransactionHistory,
    metadata: &dyn TokenMetadataSource,
    wallet: &str,
    token: &str,
) -> Result<ClassificationResult, ClassifyError> {
    let detection = scanner::scan_for_sell(history, wallet, token).await?;
    builder::build_result(metadata, wallet, token, &detection).await
}
