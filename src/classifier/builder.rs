//! Final classification assembly.

use tracing::warn;

use crate::classifier::types::SellDetection;
use crate::classifier::venues;
use crate::error::ClassifyError;
use crate::providers::TokenMetadataSource;
use crate::types::{ClassificationResult, Confidence};

/// Winning score at or above this is HIGH confidence.
const CONFIDENCE_HIGH: u32 = 100;
/// Winning score at or above this (but below HIGH) is MEDIUM confidence.
const CONFIDENCE_MEDIUM: u32 = 50;

/// Sentinel symbol some providers return for unlabeled assets.
const UNKNOWN_SYMBOL: &str = "UNKNOWN";

/// Map a winning attribution score to a confidence tier. The floor for
/// any non-excluded venue is the top-level-instruction weight, so LOW
/// covers scores from 10 up to 49.
pub fn confidence_for_score(score: u32) -> Confidence {
    if score >= CONFIDENCE_HIGH {
        Confidence::High
    } else if score >= CONFIDENCE_MEDIUM {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Build the immutable classification result for a detected sell.
///
/// A winning venue missing from the registry is an internal-consistency
/// error: the scorer only ever scores registered venues.
pub async fn build_result(
    metadata: &dyn TokenMetadataSource,
    wallet: &str,
    token: &str,
    detection: &SellDetection,
) -> Result<ClassificationResult, ClassifyError> {
    let winning = &detection.winning_venue;
    let venue = venues::find(&winning.program_id).ok_or_else(|| ClassifyError::UnknownVenue {
        program_id: winning.program_id.clone(),
        score: winning.score,
    })?;

    let token_symbol = resolve_token_symbol(metadata, token).await;

    Ok(ClassificationResult {
        wallet: wallet.to_string(),
        token: token.to_string(),
        token_symbol,
        exit_type: venue.exit_type.to_string(),
        exit_venue: venue.exit_venue.to_string(),
        description: venue.description.to_string(),
        confidence: confidence_for_score(winning.score),
        sell_signature: detection.signature.clone(),
        sell_timestamp: detection.timestamp,
        badge_color: venue.badge_color,
        badge_title: venue.badge_title.to_string(),
    })
}

/// Display symbol for `mint`: the provider's symbol (upper-cased, capped
/// at 10 characters) or a truncated form of the mint address.
///
/// Lookup failure is display-only and never fails the request.
pub async fn resolve_token_symbol(metadata: &dyn TokenMetadataSource, mint: &str) -> String {
    match metadata.token_metadata(mint).await {
        Ok(Some(meta)) if !meta.symbol.is_empty() && meta.symbol != UNKNOWN_SYMBOL => {
            meta.symbol.to_uppercase().chars().take(10).collect()
        }
        Ok(_) => truncated_mint(mint),
        Err(err) => {
            warn!(%mint, error = %err, "metadata lookup failed, using truncated mint");
            truncated_mint(mint)
        }
    }
}

fn truncated_mint(mint: &str) -> String {
    if mint.len() <= 8 {
        return mint.to_string();
    }
    format!("{}...{}", &mint[..4], &mint[mint.len() - 4..])
}
