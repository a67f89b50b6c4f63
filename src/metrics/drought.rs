//! Factor: drought-resistance rating distance
//!
//! Unlike the other factors this one always moves the score: ratings within
//! the tolerance earn a bonus, anything further apart takes a penalty.

use crate::data::PlantProfile;
use super::{Factor, FactorImpact, ScoringWeights};

pub fn evaluate_drought(a: &PlantProfile, b: &PlantProfile, weights: &ScoringWeights) -> FactorImpact {
    let diff = a.drought_rating.abs_diff(b.drought_rating);
    let detail = format!("{}/10 vs {}/10", a.drought_rating, b.drought_rating);

    if diff <= weights.drought_tolerance {
        FactorImpact::satisfied(
            Factor::DroughtResistance,
            weights.drought_close_bonus,
            format!("Similar drought resistance ({} vs {})", a.drought_rating, b.drought_rating),
            detail,
        )
    } else {
        FactorImpact::unsatisfied(Factor::DroughtResistance, weights.drought_far_penalty, detail)
    }
}
