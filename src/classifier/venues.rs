//! Static venue registry.
//!
//! The venue universe is closed: three known trading venues, registered in
//! a fixed order at compile time. Registration order doubles as the
//! tie-break for equal attribution scores, so reordering this table
//! changes classification results.

use crate::types::BadgeColor;

/// Pump.fun bonding curve program.
pub const PUMP_FUN_PROGRAM: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";
/// PumpSwap AMM program, the post-migration venue.
pub const PUMP_SWAP_PROGRAM: &str = "pAMMBay6oceH9fJKBRHGP5D4bD4sWpmSwMn52FMfXEA";
/// Raydium V4 AMM program, the legacy migration venue.
pub const RAYDIUM_V4_PROGRAM: &str = "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8";

/// Wrapped SOL mint.
pub const WRAPPED_SOL_MINT: &str = "So11111111111111111111111111111111111111112";
/// USDC mint.
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

/// Attribution weight for the provider's own source classification.
pub const WEIGHT_PROVIDER_SOURCE: u32 = 100;
/// Attribution weight for an inner-instruction reference.
pub const WEIGHT_INNER_INSTRUCTION: u32 = 50;
/// Attribution weight for a top-level instruction reference.
pub const WEIGHT_INSTRUCTION: u32 = 10;

/// Exit classification metadata for one known venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueDescriptor {
    pub program_id: &'static str,
    pub exit_type: &'static str,
    pub exit_venue: &'static str,
    pub description: &'static str,
    pub badge_color: BadgeColor,
    pub badge_title: &'static str,
}

static VENUES: &[VenueDescriptor] = &[
    VenueDescriptor {
        program_id: PUMP_FUN_PROGRAM,
        exit_type: "Curve Jeet",
        exit_venue: "Pump.fun Bonding Curve",
        description: "You sold before the migration. Weak aura.",
        badge_color: BadgeColor::Red,
        badge_title: "PRE-MIGRATION EXIT",
    },
    VenueDescriptor {
        program_id: PUMP_SWAP_PROGRAM,
        exit_type: "PumpSwap Graduate",
        exit_venue: "PumpSwap AMM",
        description: "You held through migration. Diamond hands on PumpSwap.",
        badge_color: BadgeColor::Gold,
        badge_title: "PUMPSWAP GRADUATE",
    },
    VenueDescriptor {
        program_id: RAYDIUM_V4_PROGRAM,
        exit_type: "Raydium OG",
        exit_venue: "Raydium V4 AMM",
        description: "You held through legacy Raydium migration. True OG status.",
        badge_color: BadgeColor::Platinum,
        badge_title: "RAYDIUM OG",
    },
];

/// All known venues in registration order.
pub fn venues() -> &'static [VenueDescriptor] {
    VENUES
}

/// Descriptor for a program id, if it belongs to a known venue.
pub fn find(program_id: &str) -> Option<&'static VenueDescriptor> {
    VENUES.iter().find(|venue| venue.program_id == program_id)
}

/// Whether a program id belongs to the known venue universe.
pub fn is_known_program(program_id: &str) -> bool {
    find(program_id).is_some()
}

/// Map the provider's source tag to a venue program id.
pub fn program_for_source_tag(tag: &str) -> Option<&'static str> {
    match tag {
        "PUMP_FUN" => Some(PUMP_FUN_PROGRAM),
        "PUMP_SWAP" => Some(PUMP_SWAP_PROGRAM),
        "RAYDIUM" => Some(RAYDIUM_V4_PROGRAM),
        _ => None,
    }
}
