//! Types produced by the sell classifier.

use serde::Serialize;

/// Weighted evidence total for one venue in one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueScore {
    pub program_id: String,
    pub score: u32,
    /// Evidence tags in the order the signals were applied.
    pub sources: Vec<String>,
}

/// A qualifying sell found in one transaction.
#[derive(Debug, Clone, Serialize)]
pub struct SellDetection {
    pub signature: String,
    /// Unix seconds.
    pub timestamp: i64,
    pub slot: u64,
    /// Net change in the target token. Always negative for a detection.
    pub token_delta: f64,
    /// Net lamport change for the wallet, fees included.
    pub sol_delta: i64,
    /// All venues with nonzero evidence, highest score first.
    pub venue_scores: Vec<VenueScore>,
    /// The top entry of `venue_scores`.
    pub winning_venue: VenueScore,
}
