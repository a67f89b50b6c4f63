//! Compatibility Scorer - hybridization success heuristic
//!
//! Maps a pair of plant profiles to a success percentage, a confidence bucket,
//! the reasons behind the score and a per-factor breakdown. The evaluation is
//! a pure function of the two profiles and the weights: no I/O, no state.
//!
//! All factors use equality or absolute differences, so the score is symmetric
//! in its arguments.

use crate::data::{BreedingData, PlantProfile, PlantRecord};
use crate::metrics::{evaluate_all, FactorImpact, ScoringWeights};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Confidence bucket derived from the success rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// >70 → High, >50 → Medium, otherwise Low
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s > 70 => Confidence::High,
            s if s > 50 => Confidence::Medium,
            _ => Confidence::Low,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Confidence::High => 0.9,
            Confidence::Medium => 0.75,
            Confidence::Low => 0.6,
        }
    }
}

/// Breeding compatibility level shown on the Predict page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityLevel {
    High,
    Moderate,
    Low,
}

impl CompatibilityLevel {
    /// ≥70 → High, ≥50 → Moderate, otherwise Low
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 70 => CompatibilityLevel::High,
            s if s >= 50 => CompatibilityLevel::Moderate,
            _ => CompatibilityLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompatibilityLevel::High => "High",
            CompatibilityLevel::Moderate => "Moderate",
            CompatibilityLevel::Low => "Low",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            CompatibilityLevel::High => "These species show high compatibility for hybridization.",
            CompatibilityLevel::Moderate => "Moderate compatibility. Additional testing recommended.",
            CompatibilityLevel::Low => "Low compatibility. Consider alternative combinations.",
        }
    }
}

/// Result of scoring one pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityScore {
    /// Success percentage, clamped to 0-100
    pub success_rate: u8,
    /// Sum of base and deltas before clamping
    pub raw_score: i32,
    pub confidence: f64,
    pub confidence_label: Confidence,
    pub compatibility: CompatibilityLevel,
    pub recommendation: String,
    /// One entry per satisfied factor
    pub reasons: SmallVec<[String; 5]>,
    /// Every factor with its signed impact
    pub factors: Vec<FactorImpact>,
}

/// Score for one unordered pair of reference plants (Ranking page)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairScore {
    pub plant_a_id: u32,
    pub plant_b_id: u32,
    pub plant_a: String,
    pub plant_b: String,
    pub success_rate: u8,
    pub confidence: f64,
    pub compatibility: CompatibilityLevel,
}

/// Main compatibility scorer
#[derive(Debug, Clone, Default)]
pub struct CompatibilityScorer {
    weights: ScoringWeights,
}

impl CompatibilityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a pair of profiles
    pub fn score(&self, a: &PlantProfile, b: &PlantProfile) -> CompatibilityScore {
        let factors = evaluate_all(a, b, &self.weights);

        let raw_score = self.weights.base + factors.iter().map(|f| f.impact).sum::<i32>();
        let success_rate = raw_score.clamp(0, 100) as u8;

        let reasons: SmallVec<[String; 5]> = factors
            .iter()
            .filter_map(|f| f.reason.clone())
            .collect();

        let confidence_label = Confidence::from_score(success_rate);
        let compatibility = CompatibilityLevel::from_score(success_rate);

        CompatibilityScore {
            success_rate,
            raw_score,
            confidence: confidence_label.value(),
            confidence_label,
            compatibility,
            recommendation: compatibility.recommendation().to_string(),
            reasons,
            factors: factors.to_vec(),
        }
    }

    /// Score when either side may be missing; absent input yields `None`
    pub fn score_optional(
        &self,
        a: Option<&PlantProfile>,
        b: Option<&PlantProfile>,
    ) -> Option<CompatibilityScore> {
        match (a, b) {
            (Some(a), Some(b)) => Some(self.score(a, b)),
            _ => None,
        }
    }

    /// Score two reference plants by id; unknown ids yield `None`
    pub fn score_ids(&self, data: &BreedingData, a_id: u32, b_id: u32) -> Option<CompatibilityScore> {
        let a = data.plant(a_id).map(PlantRecord::profile);
        let b = data.plant(b_id).map(PlantRecord::profile);
        self.score_optional(a.as_ref(), b.as_ref())
    }

    /// Score every unordered pair of distinct plants in parallel
    ///
    /// Sorted by descending success rate, then by (a, b) ids.
    pub fn rank_pairs(&self, data: &BreedingData) -> Vec<PairScore> {
        let plants = data.plants();

        let pairs: Vec<(usize, usize)> = (0..plants.len())
            .flat_map(|i| ((i + 1)..plants.len()).map(move |j| (i, j)))
            .collect();

        let mut scored: Vec<PairScore> = pairs
            .par_iter()
            .map(|&(i, j)| {
                let (a, b) = (&plants[i], &plants[j]);
                let score = self.score(&a.profile(), &b.profile());
                PairScore {
                    plant_a_id: a.id,
                    plant_b_id: b.id,
                    plant_a: a.common_name.clone(),
                    plant_b: b.common_name.clone(),
                    success_rate: score.success_rate,
                    confidence: score.confidence,
                    compatibility: score.compatibility,
                }
            })
            .collect();

        scored.sort_by(|x, y| {
            y.success_rate
                .cmp(&x.success_rate)
                .then_with(|| x.plant_a_id.cmp(&y.plant_a_id))
                .then_with(|| x.plant_b_id.cmp(&y.plant_b_id))
        });

        tracing::debug!("Ranked {} plant pairs", scored.len());
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClimateZone, LifeCycle, Pollination};
    use crate::metrics::Factor;
    use approx::assert_relative_eq;

    fn wheat() -> PlantProfile {
        PlantProfile {
            pollination: Pollination::Wind,
            genome_size: 17000.0,
            life_cycle: LifeCycle::Annual,
            drought_rating: 6,
            zone: ClimateZone::Northern,
        }
    }

    fn barley() -> PlantProfile {
        PlantProfile {
            pollination: Pollination::SelfPollinated,
            genome_size: 5100.0,
            life_cycle: LifeCycle::Annual,
            drought_rating: 8,
            zone: ClimateZone::HighPlateau,
        }
    }

    #[test]
    fn test_wheat_barley_example() {
        // 50 + 0 (pollination) - 15 (genome 11,900) + 10 (annual) + 8 (drought 2) + 0 (zone)
        let score = CompatibilityScorer::new().score(&wheat(), &barley());
        assert_eq!(score.success_rate, 53);
        assert_eq!(score.raw_score, 53);
        assert_eq!(score.confidence_label, Confidence::Medium);
        assert_relative_eq!(score.confidence, 0.75, epsilon = 1e-9);
        assert_eq!(score.compatibility, CompatibilityLevel::Moderate);
        assert_eq!(score.reasons.len(), 2);
        assert_eq!(score.reasons[0], "Same life cycle (annual)");
        assert_eq!(score.reasons[1], "Similar drought resistance (6 vs 8)");
    }

    #[test]
    fn test_identical_pair_scores_100() {
        let score = CompatibilityScorer::new().score(&wheat(), &wheat());
        assert_eq!(score.success_rate, 100);
        assert_eq!(score.confidence_label, Confidence::High);
        assert_eq!(score.reasons.len(), 5);
        assert!(score.factors.iter().all(|f| f.satisfied));
    }

    #[test]
    fn test_breakdown_order_and_impacts() {
        let score = CompatibilityScorer::new().score(&wheat(), &barley());
        let factors: Vec<Factor> = score.factors.iter().map(|f| f.factor).collect();
        assert_eq!(factors, Factor::ALL.to_vec());

        let impacts: Vec<i32> = score.factors.iter().map(|f| f.impact).collect();
        assert_eq!(impacts, vec![0, -15, 10, 8, 0]);
    }

    #[test]
    fn test_clamping_with_heavy_weights() {
        let weights = ScoringWeights {
            pollination_match: 200,
            ..ScoringWeights::default()
        };
        let score = CompatibilityScorer::with_weights(weights).score(&wheat(), &wheat());
        assert_eq!(score.success_rate, 100);
        assert!(score.raw_score > 100);

        let weights = ScoringWeights {
            base: -50,
            ..ScoringWeights::default()
        };
        let score = CompatibilityScorer::with_weights(weights).score(&wheat(), &barley());
        assert_eq!(score.success_rate, 0);
    }

    #[test]
    fn test_absent_input_yields_none() {
        let scorer = CompatibilityScorer::new();
        assert!(scorer.score_optional(None, Some(&wheat())).is_none());
        assert!(scorer.score_optional(Some(&wheat()), None).is_none());
        assert!(scorer.score_optional(None, None).is_none());
        assert!(scorer.score_optional(Some(&wheat()), Some(&barley())).is_some());
    }

    #[test]
    fn test_confidence_thresholds() {
        assert_eq!(Confidence::from_score(71), Confidence::High);
        assert_eq!(Confidence::from_score(70), Confidence::Medium);
        assert_eq!(Confidence::from_score(51), Confidence::Medium);
        assert_eq!(Confidence::from_score(50), Confidence::Low);
        assert_eq!(Confidence::from_score(0), Confidence::Low);
    }

    #[test]
    fn test_compatibility_thresholds() {
        assert_eq!(CompatibilityLevel::from_score(70), CompatibilityLevel::High);
        assert_eq!(CompatibilityLevel::from_score(69), CompatibilityLevel::Moderate);
        assert_eq!(CompatibilityLevel::from_score(50), CompatibilityLevel::Moderate);
        assert_eq!(CompatibilityLevel::from_score(49), CompatibilityLevel::Low);
    }

    #[test]
    fn test_rank_pairs_covers_every_pair_once() {
        let data = BreedingData::builtin().unwrap();
        let ranked = CompatibilityScorer::new().rank_pairs(&data);
        let n = data.len();
        assert_eq!(ranked.len(), n * (n - 1) / 2);

        for window in ranked.windows(2) {
            assert!(window[0].success_rate >= window[1].success_rate);
        }
        assert!(ranked.iter().all(|p| p.plant_a_id < p.plant_b_id));
    }

    #[test]
    fn test_score_ids_unknown_plant() {
        let data = BreedingData::builtin().unwrap();
        let scorer = CompatibilityScorer::new();
        assert!(scorer.score_ids(&data, 1, 999).is_none());
        assert_eq!(scorer.score_ids(&data, 1, 2).unwrap().success_rate, 53);
    }
}
