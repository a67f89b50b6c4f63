use crate::catalog::{trait_similarity, TraitSimilarity};
use crate::data::{ClimateZone, PlantRecord};
use crate::explanation::types::*;
use crate::scorer::CompatibilityScore;
use crate::utils::humanize_trait;

/// Builds the nine-section breeding report for a cross
pub struct ReportGenerator;

impl ReportGenerator {
    /// Generate a complete report from both parents and their compatibility score
    pub fn generate(a: &PlantRecord, b: &PlantRecord, score: &CompatibilityScore) -> BreedingReport {
        let similarity = trait_similarity(a, b);
        let success = score.success_rate;
        let compatibility = score.compatibility.label();

        let executive_summary = ExecutiveSummary {
            parent_species: vec![a.common_name.clone(), b.common_name.clone()],
            scientific_names: vec![a.scientific_name.clone(), b.scientific_name.clone()],
            success_probability: success,
            confidence_level: score.confidence,
            compatibility_rating: score.compatibility,
            key_finding: format!(
                "The cross between {} and {} shows {} compatibility with a {}% predicted success rate.",
                a.common_name,
                b.common_name,
                compatibility.to_lowercase(),
                success
            ),
        };

        let parent_analysis = ParentAnalysis {
            plant_a: Self::parent_profile(a),
            plant_b: Self::parent_profile(b),
        };

        let trait_compatibility = TraitCompatibility {
            shared_traits: similarity.shared_traits.clone(),
            similarity_percentage: similarity.similarity,
            complementary_traits: Self::complementary_traits(a, b),
            potential_conflicts: Self::conflicts(a, b),
            trait_interactions: Self::trait_interactions(similarity.similarity).to_string(),
        };

        let hybridization_prediction = HybridizationPrediction {
            success_rate: success,
            confidence: score.confidence,
            reasons: score.reasons.to_vec(),
            factors: score.factors.clone(),
            genetic_basis: Self::genetic_basis(a, b, &similarity),
            expected_vigor: Self::hybrid_vigor(similarity.similarity).to_string(),
            segregation_pattern: "Expected Mendelian inheritance in F2 generation".to_string(),
        };

        let expected_f1_characteristics = F1Expectations {
            dominant_traits: Self::f1_traits(a, &similarity),
            yield_prediction: Self::yield_prediction(similarity.similarity).to_string(),
            quality_metrics: vec![
                LabeledValue::new("Protein content", "Expected stable or improved based on parent mid-range"),
                LabeledValue::new("Grain quality", "F1 typically shows intermediate to superior quality"),
                LabeledValue::new("Nutritional value", "Combination of parent nutritional profiles"),
            ],
            stress_tolerance: Self::stress_tolerance(a, b),
        };

        let improvement_recommendations = ImprovementPlan {
            short_term: Self::short_term(success, &similarity),
            long_term: vec![
                "Develop F2 population of 500+ plants for selection".to_string(),
                "Implement marker-assisted selection for target traits".to_string(),
                "Conduct multi-location trials across target zones".to_string(),
                "Establish pure line selection program by F4-F5".to_string(),
                "Initiate variety registration process after F6 stabilization".to_string(),
            ],
            selection_criteria: vec![
                LabeledValue::new("Primary traits", "Yield, disease resistance, climate adaptation"),
                LabeledValue::new("Secondary traits", "Quality metrics, stress tolerance, maturity period"),
                LabeledValue::new("Elimination criteria", "Severe disease susceptibility, poor vigor, off-types"),
                LabeledValue::new("Advancement threshold", "Top 10% based on multi-trait index"),
            ],
            breeding_timeline: Self::breeding_timeline(success),
        };

        let environmental_adaptability = EnvironmentalAdaptability {
            optimal_zones: Self::optimal_zones(a, b),
            climate_requirements: Self::climate_needs(a, b).to_string(),
            soil_preferences: "Well-drained loamy soil, pH 6.0-7.5, moderate to high fertility".to_string(),
            water_management: Self::water_needs(a, b).to_string(),
        };

        let risk_assessment = RiskAssessment {
            technical_risks: Self::technical_risks(success),
            environmental_risks: vec![
                RiskItem::new("Climate variability", "Multi-location testing and adaptive trait selection"),
                RiskItem::new("Pest and disease pressure", "Integrate resistance screening in early generations"),
            ],
            market_risks: vec![
                RiskItem::new("Market acceptance of new variety", "Farmer participatory trials and early stakeholder engagement"),
                RiskItem::new("Competing varieties", "Focus on unique trait combinations and performance advantages"),
            ],
            mitigation_strategies: vec![
                "Implement rigorous quality control throughout breeding process".to_string(),
                "Maintain genetic diversity in breeding populations".to_string(),
                "Use molecular markers for trait validation".to_string(),
                "Conduct regular performance evaluations".to_string(),
                "Establish backup crosses for genetic security".to_string(),
            ],
        };

        let conclusion = Conclusion {
            overall_recommendation: score.recommendation.clone(),
            confidence_level: compatibility.to_string(),
            next_steps: Self::next_steps(success),
            expected_timeline: Self::expected_timeline(success),
            investment_priority: Self::investment_priority(success).to_string(),
        };

        BreedingReport {
            title: format!(
                "Plant Breeding Analysis Report: {} × {}",
                a.common_name, b.common_name
            ),
            executive_summary,
            parent_analysis,
            trait_compatibility,
            hybridization_prediction,
            expected_f1_characteristics,
            improvement_recommendations,
            environmental_adaptability,
            risk_assessment,
            conclusion,
        }
    }

    fn parent_profile(plant: &PlantRecord) -> ParentProfile {
        ParentProfile {
            name: plant.common_name.clone(),
            scientific_name: plant.scientific_name.clone(),
            zone: plant.optimal_zone,
            traits: plant.traits.clone(),
            strengths: Self::strengths(plant),
            limitations: Self::limitations(plant),
        }
    }

    fn strengths(plant: &PlantRecord) -> Vec<String> {
        const STRENGTHS: [(&str, &str); 5] = [
            ("drought_resistance", "Excellent drought tolerance for water-scarce conditions"),
            ("high_yield", "Superior yield potential for commercial production"),
            ("disease_resistance", "Strong disease resistance reduces chemical inputs"),
            ("cold_tolerance", "Cold hardiness extends growing season"),
            ("heat_tolerance", "Heat tolerance suitable for warm climates"),
        ];

        let mut strengths: Vec<String> = STRENGTHS
            .iter()
            .filter(|(t, _)| plant.has_trait(t))
            .map(|(_, s)| s.to_string())
            .collect();

        if strengths.is_empty() {
            strengths.push(format!("Well-adapted to {} climate zone", plant.optimal_zone));
        }
        strengths
    }

    fn limitations(plant: &PlantRecord) -> Vec<String> {
        let mut limitations = Vec::new();

        if !plant.has_trait("drought_resistance") {
            limitations.push("May require consistent irrigation".to_string());
        }
        if !plant.has_trait("disease_resistance") {
            limitations.push("Susceptibility to common diseases may require monitoring".to_string());
        }
        if plant.optimal_zone == ClimateZone::Northern {
            limitations.push("Limited adaptability to extreme heat conditions".to_string());
        }

        if limitations.is_empty() {
            limitations.push("Zone-specific adaptation may limit geographic range".to_string());
        }
        limitations
    }

    fn complementary_traits(a: &PlantRecord, b: &PlantRecord) -> Vec<String> {
        let mut complementary = Vec::new();

        if a.has_trait("high_yield") && b.has_trait("disease_resistance") {
            complementary.push(
                "High yield from parent A + disease resistance from parent B = robust production".to_string(),
            );
        }
        if a.has_trait("drought_resistance") && b.has_trait("heat_tolerance") {
            complementary.push("Combined stress tolerance for challenging environments".to_string());
        }
        if a.has_trait("cold_tolerance") && b.has_trait("adaptability") {
            complementary.push("Extended geographic range potential".to_string());
        }

        if complementary.is_empty() {
            complementary.push("Shared traits may reinforce beneficial characteristics in offspring".to_string());
        }
        complementary
    }

    fn conflicts(a: &PlantRecord, b: &PlantRecord) -> Vec<String> {
        let mut conflicts = Vec::new();

        if a.optimal_zone != b.optimal_zone {
            conflicts.push(format!(
                "Different climate adaptations ({} vs {}) may require careful F2 selection",
                a.optimal_zone, b.optimal_zone
            ));
        }
        if !a.traits.iter().any(|t| b.has_trait(t)) {
            conflicts.push("Limited trait overlap may result in variable F1 expression".to_string());
        }

        if conflicts.is_empty() {
            conflicts.push("No major conflicts detected - favorable for hybridization".to_string());
        }
        conflicts
    }

    fn trait_interactions(similarity: f64) -> &'static str {
        if similarity > 60.0 {
            "High genetic similarity suggests stable trait inheritance with predictable outcomes."
        } else if similarity > 30.0 {
            "Moderate similarity allows for trait recombination and potential heterosis effects."
        } else {
            "Low similarity may lead to wide segregation in F2; careful selection required."
        }
    }

    fn genetic_basis(a: &PlantRecord, b: &PlantRecord, similarity: &TraitSimilarity) -> String {
        let shared = similarity.shared_traits.len();
        let mut explanation = format!("The prediction is based on {} shared genetic traits. ", shared);

        if a.optimal_zone == b.optimal_zone {
            explanation.push_str(
                "Both parents are adapted to the same climate zone, indicating compatible environmental gene networks. ",
            );
        }

        if shared >= 2 {
            explanation.push_str("Multiple shared traits suggest recent common ancestry and high crossability.");
        } else {
            explanation.push_str(
                "Limited trait overlap suggests genetic distance; F1 may show hybrid vigor but F2 segregation expected.",
            );
        }
        explanation
    }

    fn hybrid_vigor(similarity: f64) -> &'static str {
        if (30.0..=70.0).contains(&similarity) {
            "High - Optimal genetic distance for heterosis expression"
        } else if similarity > 70.0 {
            "Moderate - Close relatives may show less heterosis"
        } else {
            "Variable - Wide genetic distance may produce unpredictable results"
        }
    }

    fn f1_traits(a: &PlantRecord, similarity: &TraitSimilarity) -> Vec<String> {
        let mut traits: Vec<String> = similarity
            .shared_traits
            .iter()
            .map(|t| format!("{} (inherited from both parents)", humanize_trait(t)))
            .collect();

        traits.extend(
            similarity
                .unique_to_a
                .iter()
                .take(2)
                .map(|t| format!("{} (likely from {})", humanize_trait(t), a.common_name)),
        );

        if traits.is_empty() {
            traits.push("Variable trait expression expected".to_string());
        }
        traits
    }

    fn yield_prediction(similarity: f64) -> &'static str {
        if similarity > 60.0 {
            "Expected 10-20% yield improvement through hybrid vigor"
        } else if similarity > 30.0 {
            "Expected 15-30% yield improvement with optimal heterosis"
        } else {
            "Variable yield response; selection required in F2"
        }
    }

    fn stress_tolerance(a: &PlantRecord, b: &PlantRecord) -> StressTolerance {
        let either = |needle: &str| {
            a.traits.iter().chain(b.traits.iter()).any(|t| t.contains(needle))
        };
        let level = |present: bool| if present { "High" } else { "Moderate" }.to_string();

        StressTolerance {
            drought: level(either("drought_resistance")),
            heat: level(either("heat_tolerance")),
            cold: level(either("cold_tolerance")),
            disease: if either("disease_resistance") {
                "High".to_string()
            } else {
                "Requires monitoring".to_string()
            },
        }
    }

    fn short_term(success: u8, similarity: &TraitSimilarity) -> Vec<String> {
        let focus: Vec<String> = similarity
            .shared_traits
            .iter()
            .take(2)
            .map(|t| humanize_trait(t).to_lowercase())
            .collect();
        let monitor = if focus.is_empty() {
            "Monitor F1 for hybrid vigor".to_string()
        } else {
            format!("Monitor F1 for hybrid vigor and {}", focus.join(", "))
        };

        let mut recommendations = vec![
            "Conduct initial test crosses with 20-50 plants".to_string(),
            monitor,
            "Document phenotypic observations throughout growth cycle".to_string(),
            "Assess F1 uniformity and performance metrics".to_string(),
        ];

        if success < 60 {
            recommendations.push("Consider multiple crossing attempts to ensure success".to_string());
        }
        recommendations
    }

    /// Release year is 6 when success > 70, otherwise 7
    fn release_year(success: u8) -> u32 {
        if success > 70 { 6 } else { 7 }
    }

    fn breeding_timeline(success: u8) -> Vec<LabeledValue> {
        vec![
            LabeledValue::new("F1 generation", "Year 1 - Initial cross and F1 production"),
            LabeledValue::new("F2 generation", "Year 2 - Population development and initial selection"),
            LabeledValue::new("F3-F4", "Years 3-4 - Line advancement and trait fixation"),
            LabeledValue::new("F5-F6", "Years 5-6 - Yield trials and variety testing"),
            LabeledValue::new(
                "Release",
                &format!("Year {} - Variety release (subject to trials)", Self::release_year(success)),
            ),
        ]
    }

    fn optimal_zones(a: &PlantRecord, b: &PlantRecord) -> Vec<String> {
        if a.optimal_zone == b.optimal_zone {
            vec![a.optimal_zone.to_string(), "Adjacent transitional zones".to_string()]
        } else {
            vec![
                a.optimal_zone.to_string(),
                b.optimal_zone.to_string(),
                "Intermediate climate zones".to_string(),
            ]
        }
    }

    fn climate_needs(a: &PlantRecord, b: &PlantRecord) -> &'static str {
        let zones = [a.optimal_zone, b.optimal_zone];
        if zones.contains(&ClimateZone::Northern) {
            "Cool to moderate temperatures (15-25°C), adequate rainfall"
        } else if zones.contains(&ClimateZone::Sahara) {
            "High heat tolerance (25-40°C), minimal rainfall, drought-adapted"
        } else {
            "Moderate temperatures (18-28°C), seasonal rainfall patterns"
        }
    }

    fn water_needs(a: &PlantRecord, b: &PlantRecord) -> &'static str {
        if a.has_trait("drought_resistance") || b.has_trait("drought_resistance") {
            "Moderate water needs; 300-500mm annual rainfall or supplemental irrigation"
        } else {
            "Regular irrigation required; 500-800mm annual rainfall equivalent"
        }
    }

    fn technical_risks(success: u8) -> Vec<RiskItem> {
        let mut risks = Vec::new();
        if success < 60 {
            risks.push(RiskItem::new(
                "Lower success probability",
                "Increase crossing attempts, use experienced technicians",
            ));
        }
        risks.push(RiskItem::new(
            "F2 segregation variability",
            "Large F2 population (500+ plants) for adequate selection",
        ));
        risks
    }

    fn next_steps(success: u8) -> Vec<String> {
        let mut steps = vec![
            "Review parent materials and confirm trait characterization".to_string(),
            "Plan crossing schedule and resource allocation".to_string(),
            "Prepare field plots and experimental design".to_string(),
        ];

        if success > 70 {
            steps.push("Proceed with confidence to large-scale crossing program".to_string());
        } else {
            steps.push("Consider pilot crosses before full-scale program".to_string());
        }
        steps
    }

    fn expected_timeline(success: u8) -> String {
        let years = Self::release_year(success);
        format!("{}-{} years from initial cross to variety release", years, years + 2)
    }

    fn investment_priority(success: u8) -> &'static str {
        match success {
            s if s >= 80 => "High Priority - Excellent success probability justifies immediate investment",
            s if s >= 60 => "Medium-High Priority - Good success probability with managed risk",
            s if s >= 40 => "Medium Priority - Consider as part of diversified breeding portfolio",
            _ => "Low Priority - High risk; recommend alternative crosses",
        }
    }
}
