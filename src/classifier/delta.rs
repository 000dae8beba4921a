//! Net balance-delta calculation for a single transaction.
//!
//! Pure functions over provided data; no network calls. Address equality
//! is exact, case-sensitive string comparison throughout: Solana addresses
//! are case-sensitive base58, so a lowercased compare would conflate
//! distinct accounts.

use crate::types::EnhancedTransaction;

/// Net signed change in `mint` held by `wallet` across `tx`, in raw units.
///
/// Primary source is the per-account token balance change list; a change
/// matches when its owner field or the enclosing account record equals the
/// wallet and its mint equals the target. The flattened transfer list is
/// consulted only when the transaction carries no account data at all.
pub fn token_delta(tx: &EnhancedTransaction, wallet: &str, mint: &str) -> f64 {
    if !tx.account_data.is_empty() {
        for account in &tx.account_data {
            for change in &account.token_balance_changes {
                let wallet_matches = change.user_account.as_deref() == Some(wallet)
                    || account.account == wallet;
                if wallet_matches && change.mint == mint {
                    return change
                        .raw_token_amount
                        .as_ref()
                        .and_then(|raw| raw.token_amount.parse::<f64>().ok())
                        .unwrap_or(0.0);
                }
            }
        }
        return 0.0;
    }

    let mut delta = 0.0;
    for transfer in &tx.token_transfers {
        if transfer.mint != mint {
            continue;
        }
        if transfer.from_user_account.as_deref() == Some(wallet) {
            delta -= transfer.token_amount;
        }
        if transfer.to_user_account.as_deref() == Some(wallet) {
            delta += transfer.token_amount;
        }
    }
    delta
}

/// Net lamport change for `wallet` across `tx`.
///
/// Primary source is the wallet's own account record; its native balance
/// change includes transaction fees, so a receiving transaction with no
/// other native inflow typically still shows negative. Falls back to the
/// native transfer list only when account data is absent entirely.
pub fn native_delta(tx: &EnhancedTransaction, wallet: &str) -> i64 {
    if !tx.account_data.is_empty() {
        return tx
            .account_data
            .iter()
            .find(|account| account.account == wallet)
            .map(|account| account.native_balance_change)
            .unwrap_or(0);
    }

    let mut delta = 0;
    for transfer in &tx.native_transfers {
        if transfer.from_user_account.as_deref() == Some(wallet) {
            delta -= transfer.amount;
        }
        if transfer.to_user_account.as_deref() == Some(wallet) {
            delta += transfer.amount;
        }
    }
    delta
}
