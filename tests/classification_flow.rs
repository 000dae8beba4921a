//! End-to-end classification flow with scripted providers: cache
//! behavior, badge stability, timeout and degradation paths.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use curve_exit_badge::cache::ResultCache;
use curve_exit_badge::classifier::venues::PUMP_FUN_PROGRAM;
use curve_exit_badge::error::{ClassifyError, ProviderError};
use curve_exit_badge::pipeline::classify_with_cache;
use curve_exit_badge::providers::{TokenMetadataSource, TransactionHistory};
use curve_exit_badge::types::{Confidence, EnhancedTransaction, TokenMetadata};
use serde_json::json;

const WALLET: &str = "WaLLetAddr1111111111111111111111";
const MINT: &str = "AbcdEfghIjklMnopQrstUvwxMintAddr";

/// History provider handing out one fixed page, counting calls, with an
/// optional artificial delay.
struct OnePageHistory {
    page: Vec<EnhancedTransaction>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl OnePageHistory {
    fn new(page: Vec<EnhancedTransaction>) -> Self {
        Self {
            page,
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    fn slow(page: Vec<EnhancedTransaction>, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(page)
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionHistory for OnePageHistory {
    async fn history_page(
        &self,
        _wallet: &str,
        before: Option<&str>,
    ) -> Result<Vec<EnhancedTransaction>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        // Single page of history: any cursor means everything was served.
        if before.is_some() {
            return Ok(Vec::new());
        }
        Ok(self.page.clone())
    }
}

/// Metadata source with a canned answer and a call counter.
struct CannedMetadata {
    reply: Result<Option<TokenMetadata>, ()>,
    calls: AtomicUsize,
}

impl CannedMetadata {
    fn with_symbol(symbol: &str) -> Self {
        Self {
            reply: Ok(Some(TokenMetadata {
                symbol: symbol.to_string(),
                name: "Token".to_string(),
                decimals: 6,
            })),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            reply: Err(()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenMetadataSource for CannedMetadata {
    async fn token_metadata(&self, _mint: &str) -> Result<Option<TokenMetadata>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(meta) => Ok(meta.clone()),
            Err(()) => Err(ProviderError::Malformed("broken payload".to_string())),
        }
    }
}

fn tx(value: serde_json::Value) -> EnhancedTransaction {
    serde_json::from_value(value).expect("fixture should deserialize")
}

/// The canonical scenario: the wallet sold on the bonding curve, with the
/// provider's source tag and an inner instruction both pointing there.
fn curve_sell(signature: &str) -> EnhancedTransaction {
    tx(json!({
        "signature": signature,
        "timestamp": 1714003200,
        "slot": 250000000,
        "source": "PUMP_FUN",
        "accountData": [{
            "account": WALLET,
            "nativeBalanceChange": 75000000,
            "tokenBalanceChanges": [{
                "userAccount": WALLET,
                "mint": MINT,
                "rawTokenAmount": { "tokenAmount": "-1000000", "decimals": 6 }
            }]
        }],
        "innerInstructions": [{ "instructions": [{ "programId": PUMP_FUN_PROGRAM }] }]
    }))
}

fn plain_transfer(signature: &str) -> EnhancedTransaction {
    tx(json!({
        "signature": signature,
        "timestamp": 1714000000,
        "accountData": [{
            "account": WALLET,
            "nativeBalanceChange": -5000,
            "tokenBalanceChanges": [{
                "userAccount": WALLET,
                "mint": MINT,
                "rawTokenAmount": { "tokenAmount": "-400000", "decimals": 6 }
            }]
        }]
    }))
}

#[tokio::test]
async fn classifies_a_curve_exit_end_to_end() {
    let history = OnePageHistory::new(vec![plain_transfer("transfer1"), curve_sell("sellSig")]);
    let metadata = CannedMetadata::with_symbol("pepe");
    let cache = ResultCache::new();

    let outcome = classify_with_cache(&history, &metadata, &cache, WALLET, MINT)
        .await
        .expect("should classify");

    assert!(!outcome.cached);
    let result = &outcome.entry.result;
    assert_eq!(result.exit_type, "Curve Jeet");
    assert_eq!(result.exit_venue, "Pump.fun Bonding Curve");
    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(result.sell_signature, "sellSig");
    assert_eq!(result.token_symbol, "PEPE");
    assert!(outcome
        .entry
        .badge_base64
        .starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn second_request_is_served_from_cache_without_provider_calls() {
    let history = OnePageHistory::new(vec![curve_sell("sellSig")]);
    let metadata = CannedMetadata::with_symbol("pepe");
    let cache = ResultCache::new();

    let first = classify_with_cache(&history, &metadata, &cache, WALLET, MINT)
        .await
        .expect("first call");
    let history_calls = history.calls();
    let metadata_calls = metadata.calls();

    let second = classify_with_cache(&history, &metadata, &cache, WALLET, MINT)
        .await
        .expect("second call");

    assert!(second.cached);
    assert_eq!(history.calls(), history_calls, "no extra history calls");
    assert_eq!(metadata.calls(), metadata_calls, "no extra metadata calls");
    assert_eq!(first.entry.result, second.entry.result);
    assert_eq!(first.entry.badge_base64, second.entry.badge_base64);
}

#[tokio::test]
async fn exhausted_history_surfaces_not_found_and_caches_nothing() {
    let history = OnePageHistory::new(vec![plain_transfer("transfer1")]);
    let metadata = CannedMetadata::with_symbol("pepe");
    let cache = ResultCache::new();

    let err = classify_with_cache(&history, &metadata, &cache, WALLET, MINT)
        .await
        .expect_err("no sell to find");

    match err {
        ClassifyError::NoSellFound {
            wallet,
            token,
            pages_scanned,
        } => {
            assert_eq!(wallet, WALLET);
            assert_eq!(token, MINT);
            assert!(pages_scanned >= 1);
        }
        other => panic!("expected NoSellFound, got {other:?}"),
    }
    assert!(!cache.contains(WALLET, MINT));
    assert_eq!(metadata.calls(), 0, "no metadata lookup without a sell");
}

#[tokio::test(start_paused = true)]
async fn slow_scan_times_out_and_caches_nothing() {
    let history = OnePageHistory::slow(
        vec![curve_sell("sellSig")],
        Duration::from_secs(30),
    );
    let metadata = CannedMetadata::with_symbol("pepe");
    let cache = ResultCache::new();

    let err = classify_with_cache(&history, &metadata, &cache, WALLET, MINT)
        .await
        .expect_err("should time out");

    assert!(matches!(err, ClassifyError::Timeout { seconds: 25 }));
    assert!(!cache.contains(WALLET, MINT));
}

#[tokio::test]
async fn metadata_failure_degrades_to_truncated_mint() {
    let history = OnePageHistory::new(vec![curve_sell("sellSig")]);
    let metadata = CannedMetadata::failing();
    let cache = ResultCache::new();

    let outcome = classify_with_cache(&history, &metadata, &cache, WALLET, MINT)
        .await
        .expect("metadata failure must not fail the request");

    assert_eq!(outcome.entry.result.token_symbol, "Abcd...Addr");
    assert!(cache.contains(WALLET, MINT));
}
