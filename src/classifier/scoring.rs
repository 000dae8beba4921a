//! Weighted venue attribution for a single transaction.

use crate::classifier::types::VenueScore;
use crate::classifier::venues;
use crate::types::EnhancedTransaction;

/// Score every known venue's evidence in `tx`.
///
/// Three independent, additive signals, each counted at most once per
/// venue: the provider's own source classification (weight 100, it already
/// accounts for full instruction context), inner instructions (weight 50,
/// strong direct evidence of participation), and top-level instructions
/// (weight 10, many transactions reference programs incidentally).
///
/// Venues with no evidence are omitted. The result is ordered by score
/// descending; the sort is stable, so equal scores keep registration order
/// and the first-registered venue wins a tie.
pub fn venue_scores(tx: &EnhancedTransaction) -> Vec<VenueScore> {
    let mut scores: Vec<VenueScore> = venues::venues()
        .iter()
        .map(|venue| VenueScore {
            program_id: venue.program_id.to_string(),
            score: 0,
            sources: Vec::new(),
        })
        .collect();

    if let Some(tag) = tx.source.as_deref() {
        if let Some(program_id) = venues::program_for_source_tag(tag) {
            if let Some(entry) = scores.iter_mut().find(|entry| entry.program_id == program_id) {
                entry.score += venues::WEIGHT_PROVIDER_SOURCE;
                entry.sources.push(format!("helius_source:{tag}"));
            }
        }
    }

    for set in &tx.inner_instructions {
        for instruction in &set.instructions {
            add_instruction_evidence(
                &mut scores,
                &instruction.program_id,
                "inner_ix",
                venues::WEIGHT_INNER_INSTRUCTION,
            );
        }
    }

    for instruction in &tx.instructions {
        add_instruction_evidence(
            &mut scores,
            &instruction.program_id,
            "instruction",
            venues::WEIGHT_INSTRUCTION,
        );
    }

    scores.retain(|entry| entry.score > 0);
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}

/// Add one instruction-category contribution for `program_id`, skipping
/// unknown programs and venues already credited in this category.
fn add_instruction_evidence(
    scores: &mut [VenueScore],
    program_id: &str,
    category: &str,
    weight: u32,
) {
    if !venues::is_known_program(program_id) {
        return;
    }
    let Some(entry) = scores.iter_mut().find(|entry| entry.program_id == program_id) else {
        return;
    };
    if entry.sources.iter().any(|source| source.starts_with(category)) {
        return;
    }
    entry.score += weight;
    let prefix = program_id.get(..8).unwrap_or(program_id);
    entry.sources.push(format!("{category}:{prefix}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::venues::{
        PUMP_FUN_PROGRAM, PUMP_SWAP_PROGRAM, RAYDIUM_V4_PROGRAM,
    };
    use serde_json::json;

    fn tx(value: serde_json::Value) -> EnhancedTransaction {
        serde_json::from_value(value).expect("fixture should deserialize")
    }

    #[test]
    fn all_three_signals_stack_to_160() {
        let tx = tx(json!({
            "signature": "sig",
            "source": "PUMP_FUN",
            "instructions": [{ "programId": PUMP_FUN_PROGRAM }],
            "innerInstructions": [{ "instructions": [{ "programId": PUMP_FUN_PROGRAM }] }]
        }));

        let scores = venue_scores(&tx);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 160);
        assert_eq!(scores[0].sources.len(), 3);
    }

    #[test]
    fn duplicate_occurrences_count_once_per_category() {
        let tx = tx(json!({
            "signature": "sig",
            "instructions": [
                { "programId": PUMP_SWAP_PROGRAM },
                { "programId": PUMP_SWAP_PROGRAM }
            ],
            "innerInstructions": [
                { "instructions": [
                    { "programId": PUMP_SWAP_PROGRAM },
                    { "programId": PUMP_SWAP_PROGRAM }
                ]},
                { "instructions": [{ "programId": PUMP_SWAP_PROGRAM }] }
            ]
        }));

        let scores = venue_scores(&tx);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 60);
    }

    #[test]
    fn unknown_programs_and_tags_score_nothing() {
        let tx = tx(json!({
            "signature": "sig",
            "source": "JUPITER",
            "instructions": [{ "programId": "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4" }]
        }));

        assert!(venue_scores(&tx).is_empty());
    }

    #[test]
    fn source_signal_outranks_instruction_signals() {
        let tx = tx(json!({
            "signature": "sig",
            "source": "PUMP_FUN",
            "instructions": [{ "programId": RAYDIUM_V4_PROGRAM }],
            "innerInstructions": [{ "instructions": [{ "programId": RAYDIUM_V4_PROGRAM }] }]
        }));

        let scores = venue_scores(&tx);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].program_id, PUMP_FUN_PROGRAM);
        assert_eq!(scores[0].score, 100);
        assert_eq!(scores[1].program_id, RAYDIUM_V4_PROGRAM);
        assert_eq!(scores[1].score, 60);
    }

    #[test]
    fn equal_scores_break_ties_by_registration_order() {
        // Raydium appears before PumpSwap in the instruction list, but
        // PumpSwap is registered earlier, so it must win the tie.
        let tx = tx(json!({
            "signature": "sig",
            "instructions": [
                { "programId": RAYDIUM_V4_PROGRAM },
                { "programId": PUMP_SWAP_PROGRAM }
            ]
        }));

        let scores = venue_scores(&tx);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].score, scores[1].score);
        assert_eq!(scores[0].program_id, PUMP_SWAP_PROGRAM);
    }

    #[test]
    fn evidence_tags_record_signal_origin() {
        let tx = tx(json!({
            "signature": "sig",
            "source": "RAYDIUM",
            "innerInstructions": [{ "instructions": [{ "programId": RAYDIUM_V4_PROGRAM }] }]
        }));

        let scores = venue_scores(&tx);
        assert_eq!(scores[0].sources[0], "helius_source:RAYDIUM");
        assert!(scores[0].sources[1].starts_with("inner_ix:"));
    }
}
