//! Factor: genome-size distance
//!
//! Three bands on the absolute difference:
//! - below the close threshold → bonus
//! - above the far threshold → penalty
//! - in between → neutral

use crate::data::PlantProfile;
use crate::utils::format_thousands;
use super::{Factor, FactorImpact, ScoringWeights};

pub fn evaluate_genome_size(a: &PlantProfile, b: &PlantProfile, weights: &ScoringWeights) -> FactorImpact {
    let diff = (a.genome_size - b.genome_size).abs();
    let detail = format!("difference {} Mbp", format_thousands(diff));

    if diff < weights.genome_close_threshold {
        FactorImpact::satisfied(
            Factor::GenomeSize,
            weights.genome_close_bonus,
            format!("Similar genome size (difference {} Mbp)", format_thousands(diff)),
            detail,
        )
    } else if diff > weights.genome_far_threshold {
        FactorImpact::unsatisfied(Factor::GenomeSize, weights.genome_far_penalty, detail)
    } else {
        FactorImpact::unsatisfied(Factor::GenomeSize, 0, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClimateZone, LifeCycle, Pollination};

    fn profile(genome_size: f64) -> PlantProfile {
        PlantProfile {
            pollination: Pollination::Wind,
            genome_size,
            life_cycle: LifeCycle::Annual,
            drought_rating: 5,
            zone: ClimateZone::Northern,
        }
    }

    #[test]
    fn test_bands() {
        let w = ScoringWeights::default();
        assert_eq!(evaluate_genome_size(&profile(1000.0), &profile(5999.0), &w).impact, 10);
        assert_eq!(evaluate_genome_size(&profile(1000.0), &profile(6000.0), &w).impact, 0);
        assert_eq!(evaluate_genome_size(&profile(1000.0), &profile(11000.0), &w).impact, 0);
        assert_eq!(evaluate_genome_size(&profile(1000.0), &profile(11001.0), &w).impact, -15);
    }

    #[test]
    fn test_wheat_barley_penalty() {
        let w = ScoringWeights::default();
        let impact = evaluate_genome_size(&profile(17000.0), &profile(5100.0), &w);
        assert_eq!(impact.impact, -15);
        assert!(impact.reason.is_none());
        assert_eq!(impact.detail, "difference 11,900 Mbp");
    }
}
