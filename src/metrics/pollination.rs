//! Factor: pollination mechanism
//!
//! Parents sharing a pollination mechanism flower and shed pollen in a
//! compatible way. Match earns the bonus, mismatch contributes nothing.

use crate::data::PlantProfile;
use super::{Factor, FactorImpact, ScoringWeights};

pub fn evaluate_pollination(a: &PlantProfile, b: &PlantProfile, weights: &ScoringWeights) -> FactorImpact {
    let detail = format!("{} vs {}", a.pollination.label(), b.pollination.label());

    if a.pollination == b.pollination {
        FactorImpact::satisfied(
            Factor::Pollination,
            weights.pollination_match,
            format!("Same pollination type ({})", a.pollination.label()),
            detail,
        )
    } else {
        FactorImpact::unsatisfied(Factor::Pollination, 0, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClimateZone, LifeCycle, Pollination};

    fn profile(pollination: Pollination) -> PlantProfile {
        PlantProfile {
            pollination,
            genome_size: 1000.0,
            life_cycle: LifeCycle::Annual,
            drought_rating: 5,
            zone: ClimateZone::Northern,
        }
    }

    #[test]
    fn test_match_earns_bonus() {
        let w = ScoringWeights::default();
        let impact = evaluate_pollination(&profile(Pollination::Wind), &profile(Pollination::Wind), &w);
        assert_eq!(impact.impact, 15);
        assert!(impact.satisfied);
        assert_eq!(impact.reason.as_deref(), Some("Same pollination type (wind)"));
    }

    #[test]
    fn test_mismatch_is_neutral() {
        let w = ScoringWeights::default();
        let impact = evaluate_pollination(&profile(Pollination::Insect), &profile(Pollination::SelfPollinated), &w);
        assert_eq!(impact.impact, 0);
        assert!(!impact.satisfied);
        assert_eq!(impact.detail, "insect vs self");
    }
}
