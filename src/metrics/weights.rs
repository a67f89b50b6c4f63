//! Scoring weights for the hybridization compatibility heuristic
//!
//! Every factor adds a fixed point delta to a base of 50. The defaults are the
//! values the Predict page has always shown; a custom set can be passed to
//! `CompatibilityScorer::with_weights` for what-if comparisons.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Starting score before any factor applies
    pub base: i32,
    pub pollination_match: i32,
    /// Genome sizes closer than this (strictly) earn `genome_close_bonus`
    pub genome_close_threshold: f64,
    pub genome_close_bonus: i32,
    /// Genome sizes further apart than this (strictly) take `genome_far_penalty`
    pub genome_far_threshold: f64,
    pub genome_far_penalty: i32,
    pub life_cycle_match: i32,
    /// Drought ratings within this distance (inclusive) earn `drought_close_bonus`
    pub drought_tolerance: u8,
    pub drought_close_bonus: i32,
    pub drought_far_penalty: i32,
    pub zone_match: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 50,
            pollination_match: 15,
            genome_close_threshold: 5000.0,
            genome_close_bonus: 10,
            genome_far_threshold: 10000.0,
            genome_far_penalty: -15,
            life_cycle_match: 10,
            drought_tolerance: 2,
            drought_close_bonus: 8,
            drought_far_penalty: -5,
            zone_match: 7,
        }
    }
}
