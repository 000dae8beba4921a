//! Shared types for the curve-exit classification service.

use serde::{Deserialize, Serialize};

/// A single enhanced transaction as reported by the indexing provider.
///
/// Only the fields the classifier consumes are modeled; anything else in
/// the provider payload is ignored during deserialization. Missing fields
/// default to empty so partial records still parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnhancedTransaction {
    /// Unique transaction signature.
    pub signature: String,
    /// Unix seconds.
    pub timestamp: i64,
    pub slot: u64,
    /// The provider's own venue guess, e.g. "PUMP_FUN".
    pub source: Option<String>,
    /// Present iff the transaction failed on-chain.
    pub transaction_error: Option<serde_json::Value>,
    /// Per-account balance changes. Primary source for delta calculation.
    pub account_data: Vec<AccountData>,
    /// Flattened token transfers. Fallback when account data is absent.
    pub token_transfers: Vec<TokenTransfer>,
    /// Flattened native transfers. Fallback when account data is absent.
    pub native_transfers: Vec<NativeTransfer>,
    /// Top-level instructions.
    pub instructions: Vec<Instruction>,
    /// Instructions nested inside other programs' calls.
    pub inner_instructions: Vec<InnerInstructionSet>,
}

/// Balance changes for one account touched by a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountData {
    pub account: String,
    /// Net lamport change, transaction fees included.
    pub native_balance_change: i64,
    pub token_balance_changes: Vec<TokenBalanceChange>,
}

/// One token balance change within an account record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenBalanceChange {
    /// Owning wallet of the token account, when the provider resolves it.
    pub user_account: Option<String>,
    pub token_account: Option<String>,
    pub mint: String,
    pub raw_token_amount: Option<RawTokenAmount>,
}

/// Signed raw-unit amount, delivered as a decimal string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTokenAmount {
    pub token_amount: String,
    pub decimals: u8,
}

/// Entry of the flattened token transfer list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenTransfer {
    pub from_user_account: Option<String>,
    pub to_user_account: Option<String>,
    pub mint: String,
    /// UI amount, already decimal-adjusted by the provider.
    pub token_amount: f64,
}

/// Entry of the flattened native transfer list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeTransfer {
    pub from_user_account: Option<String>,
    pub to_user_account: Option<String>,
    /// Lamports.
    pub amount: i64,
}

/// A single instruction reference; only the program matters here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Instruction {
    pub program_id: String,
}

/// One set of inner instructions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InnerInstructionSet {
    pub instructions: Vec<Instruction>,
}

/// Token metadata as resolved by the metadata provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

/// Confidence tier derived from the winning attribution score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "HIGH"),
            Confidence::Medium => write!(f, "MEDIUM"),
            Confidence::Low => write!(f, "LOW"),
        }
    }
}

/// Badge color scheme, one per venue tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Red,
    Gold,
    Platinum,
}

/// Classification request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyRequest {
    pub wallet: String,
    pub token: String,
}

/// The finalized exit classification for one (wallet, token) pair.
///
/// Built once on a cache miss and never mutated afterwards; the sell it
/// describes is a historical fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub wallet: String,
    pub token: String,
    pub token_symbol: String,
    pub exit_type: String,
    pub exit_venue: String,
    pub description: String,
    pub confidence: Confidence,
    pub sell_signature: String,
    /// Unix seconds of the qualifying sell.
    pub sell_timestamp: i64,
    pub badge_color: BadgeColor,
    pub badge_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enhanced_transaction_parses_provider_shape() {
        let tx: EnhancedTransaction = serde_json::from_value(json!({
            "signature": "5Nf6vstq",
            "timestamp": 1714000000,
            "slot": 250000000,
            "source": "PUMP_FUN",
            "transactionError": null,
            "accountData": [{
                "account": "WaLLetAddr",
                "nativeBalanceChange": -5000,
                "tokenBalanceChanges": [{
                    "userAccount": "WaLLetAddr",
                    "tokenAccount": "TokAcc",
                    "mint": "MintAddr",
                    "rawTokenAmount": { "tokenAmount": "-1000000", "decimals": 6 }
                }]
            }],
            "instructions": [{ "programId": "SomeProgram", "accounts": [], "data": "" }]
        }))
        .expect("provider payload should deserialize");

        assert_eq!(tx.signature, "5Nf6vstq");
        assert!(tx.transaction_error.is_none());
        assert_eq!(tx.account_data.len(), 1);
        assert_eq!(tx.account_data[0].native_balance_change, -5000);
        assert_eq!(
            tx.account_data[0].token_balance_changes[0]
                .raw_token_amount
                .as_ref()
                .unwrap()
                .token_amount,
            "-1000000"
        );
        assert_eq!(tx.instructions[0].program_id, "SomeProgram");
    }

    #[test]
    fn sparse_transaction_defaults_to_empty_collections() {
        let tx: EnhancedTransaction =
            serde_json::from_value(json!({ "signature": "abc", "timestamp": 1 })).unwrap();

        assert!(tx.account_data.is_empty());
        assert!(tx.token_transfers.is_empty());
        assert!(tx.inner_instructions.is_empty());
        assert!(tx.source.is_none());
    }

    #[test]
    fn confidence_serializes_screaming_case() {
        assert_eq!(serde_json::to_string(&Confidence::High).unwrap(), "\"HIGH\"");
        assert_eq!(Confidence::Medium.to_string(), "MEDIUM");
    }
}
