//! Factor: life cycle (annual / perennial)

use crate::data::PlantProfile;
use super::{Factor, FactorImpact, ScoringWeights};

pub fn evaluate_life_cycle(a: &PlantProfile, b: &PlantProfile, weights: &ScoringWeights) -> FactorImpact {
    let detail = format!("{} vs {}", a.life_cycle.label(), b.life_cycle.label());

    if a.life_cycle == b.life_cycle {
        FactorImpact::satisfied(
            Factor::LifeCycle,
            weights.life_cycle_match,
            format!("Same life cycle ({})", a.life_cycle.label()),
            detail,
        )
    } else {
        FactorImpact::unsatisfied(Factor::LifeCycle, 0, detail)
    }
}
