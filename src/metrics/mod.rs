//! Factor modules for compatibility scoring
//!
//! Each factor compares one attribute of the two parent profiles and returns a
//! signed point delta. The scorer sums them on top of the base score.

pub mod weights;
pub mod pollination;
pub mod genome;
pub mod life_cycle;
pub mod drought;
pub mod zone;

pub use weights::ScoringWeights;
pub use pollination::evaluate_pollination;
pub use genome::evaluate_genome_size;
pub use life_cycle::evaluate_life_cycle;
pub use drought::evaluate_drought;
pub use zone::evaluate_zone;

use crate::data::PlantProfile;
use serde::{Deserialize, Serialize};

/// The attributes compared by the scorer, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Pollination,
    GenomeSize,
    LifeCycle,
    DroughtResistance,
    ClimateZone,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::Pollination,
        Factor::GenomeSize,
        Factor::LifeCycle,
        Factor::DroughtResistance,
        Factor::ClimateZone,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Factor::Pollination => "Pollination Type",
            Factor::GenomeSize => "Genome Size",
            Factor::LifeCycle => "Life Cycle",
            Factor::DroughtResistance => "Drought Resistance",
            Factor::ClimateZone => "Climate Zone",
        }
    }
}

/// Signed contribution of one factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorImpact {
    pub factor: Factor,
    pub name: String,
    /// Points added to (or removed from) the score
    pub impact: i32,
    /// Whether the favourable condition held
    pub satisfied: bool,
    /// Human-readable reason, present only when satisfied
    pub reason: Option<String>,
    /// Compared values, e.g. "wind vs self"
    pub detail: String,
}

impl FactorImpact {
    pub fn satisfied(factor: Factor, impact: i32, reason: String, detail: String) -> Self {
        Self {
            factor,
            name: factor.display_name().to_string(),
            impact,
            satisfied: true,
            reason: Some(reason),
            detail,
        }
    }

    pub fn unsatisfied(factor: Factor, impact: i32, detail: String) -> Self {
        Self {
            factor,
            name: factor.display_name().to_string(),
            impact,
            satisfied: false,
            reason: None,
            detail,
        }
    }
}

/// Evaluate every factor for a pair, in `Factor::ALL` order
pub fn evaluate_all(a: &PlantProfile, b: &PlantProfile, weights: &ScoringWeights) -> [FactorImpact; 5] {
    [
        evaluate_pollination(a, b, weights),
        evaluate_genome_size(a, b, weights),
        evaluate_life_cycle(a, b, weights),
        evaluate_drought(a, b, weights),
        evaluate_zone(a, b, weights),
    ]
}
