//! Sequential wallet-history scan.

use tracing::{debug, instrument};

use crate::classifier::detector;
use crate::classifier::types::SellDetection;
use crate::error::ClassifyError;
use crate::providers::TransactionHistory;

/// Upper bound on history pages fetched per scan.
pub const MAX_PAGES: u32 = 10;

/// Scan `wallet`'s history for the first qualifying sell of `token`.
///
/// Pages arrive newest-first; each page's last signature becomes the
/// cursor for the next. Transactions are evaluated strictly in provider
/// order and the scan stops at the first hit, so out-of-order evaluation
/// would change the result. The scan also stops after [`MAX_PAGES`] pages
/// or at an empty page (end of history). Provider failures abort the scan
/// immediately; there are no retries at this layer.
#[instrument(skip(history), fields(wallet = %wallet, token = %token))]
pub async fn scan_for_sell(
    history: &dyn TransactionHistory,
    wallet: &str,
    token: &str,
) -> Result<SellDetection, ClassifyError> {
    let mut before: Option<String> = None;
    let mut pages_scanned = 0u32;

    while pages_scanned < MAX_PAGES {
        let page = history.history_page(wallet, before.as_deref()).await?;
        if page.is_empty() {
            break;
        }

        for tx in &page {
            if let Some(detection) = detector::detect_sell(tx, wallet, token) {
                debug!(
                    signature = %detection.signature,
                    score = detection.winning_venue.score,
                    pages_scanned,
                    "qualifying sell found"
                );
                return Ok(detection);
            }
        }

        before = page.last().map(|tx| tx.signature.clone());
        pages_scanned += 1;
    }

    debug!(pages_scanned, "history exhausted without a qualifying sell");
    Err(ClassifyError::NoSellFound {
        wallet: wallet.to_string(),
        token: token.to_string(),
        pages_scanned,
    })
}
