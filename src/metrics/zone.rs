//! Factor: preferred climate zone

use crate::data::PlantProfile;
use super::{Factor, FactorImpact, ScoringWeights};

pub fn evaluate_zone(a: &PlantProfile, b: &PlantProfile, weights: &ScoringWeights) -> FactorImpact {
    let detail = format!("{} vs {}", a.zone, b.zone);

    if a.zone == b.zone {
        FactorImpact::satisfied(
            Factor::ClimateZone,
            weights.zone_match,
            format!("Same preferred zone ({})", a.zone),
            detail,
        )
    } else {
        FactorImpact::unsatisfied(Factor::ClimateZone, 0, detail)
    }
}
