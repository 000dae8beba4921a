//! Request pipeline: cache lookup, scan, render, cache write.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, instrument};

use crate::badge::{self, BadgeInput};
use crate::cache::{CachedClassification, ResultCache};
use crate::classifier;
use crate::error::ClassifyError;
use crate::providers::{TokenMetadataSource, TransactionHistory};

/// Fixed time budget for the scan-plus-render work of one request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);

/// A served classification plus whether it came from the cache.
#[derive(Debug)]
pub struct ClassifyOutcome {
    pub entry: Arc<CachedClassification>,
    pub cached: bool,
}

/// Classify a (wallet, token) pair, serving from the cache when possible.
///
/// On a miss the scan and render run under [`REQUEST_TIMEOUT`]; on expiry
/// the partial work is discarded and nothing is cached. Two concurrent
/// misses for the same key may both compute; they write the same
/// immutable value, so the race is benign.
#[instrument(skip(history, metadata, cache), fields(wallet = %wallet, token = %token))]
pub async fn classify_with_cache(
    history: &dyn TransactionHistory,
    metadata: &dyn TokenMetadataSource,
    cache: &ResultCache,
    wallet: &str,
    token: &str,
) -> Result<ClassifyOutcome, ClassifyError> {
    if let Some(entry) = cache.get(wallet, token).await {
        return Ok(ClassifyOutcome {
            entry,
            cached: true,
        });
    }

    let work = async {
        let result = classifier::classify_exit(history, metadata, wallet, token).await?;
        let badge_base64 = badge::render_badge(&BadgeInput::from_result(&result));
        Ok::<_, ClassifyError>((result, badge_base64))
    };

    let (result, badge_base64) = tokio::time::timeout(REQUEST_TIMEOUT, work)
        .await
        .map_err(|_| ClassifyError::Timeout {
            seconds: REQUEST_TIMEOUT.as_secs(),
        })??;

    info!(
        exit_type = %result.exit_type,
        confidence = %result.confidence,
        "classification complete"
    );

    let entry = CachedClassification {
        result,
        badge_base64,
        cached_at: Utc::now().timestamp_millis(),
    };
    cache.insert(wallet, token, entry.clone()).await;

    Ok(ClassifyOutcome {
        entry: Arc::new(entry),
        cached: false,
    })
}
