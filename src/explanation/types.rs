use serde::{Deserialize, Serialize};
use crate::data::ClimateZone;
use crate::metrics::FactorImpact;
use crate::scorer::CompatibilityLevel;

/// Complete breeding analysis report for a two-parent cross
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedingReport {
    pub title: String,
    pub executive_summary: ExecutiveSummary,
    pub parent_analysis: ParentAnalysis,
    pub trait_compatibility: TraitCompatibility,
    pub hybridization_prediction: HybridizationPrediction,
    pub expected_f1_characteristics: F1Expectations,
    pub improvement_recommendations: ImprovementPlan,
    pub environmental_adaptability: EnvironmentalAdaptability,
    pub risk_assessment: RiskAssessment,
    pub conclusion: Conclusion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub parent_species: Vec<String>,
    pub scientific_names: Vec<String>,
    pub success_probability: u8,
    pub confidence_level: f64,
    pub compatibility_rating: CompatibilityLevel,
    pub key_finding: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentAnalysis {
    pub plant_a: ParentProfile,
    pub plant_b: ParentProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentProfile {
    pub name: String,
    pub scientific_name: String,
    pub zone: ClimateZone,
    pub traits: Vec<String>,
    pub strengths: Vec<String>,
    pub limitations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitCompatibility {
    pub shared_traits: Vec<String>,
    pub similarity_percentage: f64,
    pub complementary_traits: Vec<String>,
    pub potential_conflicts: Vec<String>,
    pub trait_interactions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridizationPrediction {
    pub success_rate: u8,
    pub confidence: f64,
    pub reasons: Vec<String>,
    /// Per-factor signed impacts from the scorer
    pub factors: Vec<FactorImpact>,
    pub genetic_basis: String,
    pub expected_vigor: String,
    pub segregation_pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct F1Expectations {
    pub dominant_traits: Vec<String>,
    pub yield_prediction: String,
    pub quality_metrics: Vec<LabeledValue>,
    pub stress_tolerance: StressTolerance,
}

/// Generic label/value pair for small key tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

impl LabeledValue {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressTolerance {
    pub drought: String,
    pub heat: String,
    pub cold: String,
    pub disease: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementPlan {
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub selection_criteria: Vec<LabeledValue>,
    pub breeding_timeline: Vec<LabeledValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentalAdaptability {
    pub optimal_zones: Vec<String>,
    pub climate_requirements: String,
    pub soil_preferences: String,
    pub water_management: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskItem {
    pub risk: String,
    pub mitigation: String,
}

impl RiskItem {
    pub fn new(risk: &str, mitigation: &str) -> Self {
        Self {
            risk: risk.to_string(),
            mitigation: mitigation.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub technical_risks: Vec<RiskItem>,
    pub environmental_risks: Vec<RiskItem>,
    pub market_risks: Vec<RiskItem>,
    pub mitigation_strategies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conclusion {
    pub overall_recommendation: String,
    pub confidence_level: String,
    pub next_steps: Vec<String>,
    pub expected_timeline: String,
    pub investment_priority: String,
}
