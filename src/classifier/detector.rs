//! Sell detection for a single transaction.

use tracing::trace;

use crate::classifier::types::SellDetection;
use crate::classifier::{delta, scoring, venues};
use crate::types::EnhancedTransaction;

/// Decide whether `tx` is a qualifying sell of `token` by `wallet`.
///
/// Gates, in order, each a hard veto:
/// 1. the transaction did not fail on-chain;
/// 2. the wallet's holding of the token decreased;
/// 3. the wallet received value in exchange (SOL, wrapped SOL, or USDC),
///    otherwise this is a transfer out, not a sale;
/// 4. at least one known venue carries attribution evidence.
///
/// Pure function; no side effects, no network calls. The returned record
/// exposes every scored venue, not just the winner.
pub fn detect_sell(tx: &EnhancedTransaction, wallet: &str, token: &str) -> Option<SellDetection> {
    if tx.transaction_error.is_some() {
        return None;
    }

    let token_delta = delta::token_delta(tx, wallet, token);
    if token_delta >= 0.0 {
        return None;
    }

    let sol_delta = delta::native_delta(tx, wallet);
    let wsol_delta = delta::token_delta(tx, wallet, venues::WRAPPED_SOL_MINT);
    let usdc_delta = delta::token_delta(tx, wallet, venues::USDC_MINT);
    if sol_delta <= 0 && wsol_delta <= 0.0 && usdc_delta <= 0.0 {
        trace!(signature = %tx.signature, "token outflow without value inflow, skipping");
        return None;
    }

    let venue_scores = scoring::venue_scores(tx);
    let winning_venue = venue_scores.first()?.clone();

    Some(SellDetection {
        signature: tx.signature.clone(),
        timestamp: tx.timestamp,
        slot: tx.slot,
        token_delta,
        sol_delta,
        venue_scores,
        winning_venue,
    })
}
