//! Deterministic keyword responder
//!
//! Answers questions from the reference table alone, with no network access.
//! Used when no LLM provider is configured and exposed as the
//! `answer_question` tool.

use crate::catalog::{rank_by, rank_position, RankMetric};
use crate::chatbot::keywords::{extract_keywords, Keywords, QuestionType, TraitKeyword};
use crate::data::{BreedingData, PlantRecord};
use crate::utils::format_thousands;
use std::fmt::Write;

/// Answer a free-text question; never fails, falls back to help text
pub fn answer(data: &BreedingData, question: &str) -> String {
    let kw = extract_keywords(data, question);
    let q = question.to_lowercase();
    let first_plant = kw.plants.first().and_then(|&id| data.plant(id));

    // Fragments: "wheat", "drought", "g"
    if question.split_whitespace().count() <= 2 {
        if let (Some(plant), true) = (first_plant, kw.traits.is_empty()) {
            return plant_card_short(plant);
        }
        if kw.plants.is_empty() && !kw.traits.is_empty() {
            if let Some(metric) = list_metric(kw.traits[0]) {
                return metric_list(data, metric, metric.title(), RankingStyle::Numbered);
            }
        } else if kw.is_empty() {
            return fragment_help(data);
        }
    }

    if q.contains("compare")
        || q.contains("vs")
        || q.contains("versus")
        || kw.question_type == QuestionType::Comparison
    {
        if let [a, b, ..] = kw.plants.as_slice() {
            if let (Some(a), Some(b)) = (data.plant(*a), data.plant(*b)) {
                return comparison(a, b);
            }
        }
    }

    if q.contains("better") || (q.contains("which") && (q.contains("one") || q.contains("is"))) {
        if let Some(plant) = first_plant {
            return crossing_partners(data, plant);
        }
        if q.contains("drought") {
            return best_for(data, RankMetric::Drought, "drought");
        }
        if q.contains("yield") {
            return best_for(data, RankMetric::Yield, "yield");
        }
    }

    if q.contains("characteristic") || q.contains("traits") || q.contains("properties") {
        return match first_plant {
            Some(plant) => characteristics(plant),
            None => concat!(
                "Available plant characteristics:\n",
                "• Genome size, Climate needs, Drought/Salinity/Disease resistance\n",
                "• Yield potential, Optimal zone\n\n",
                "Ask: 'What are the characteristics of [plant name]?'"
            )
            .to_string(),
        };
    }

    if q.contains("ranking") {
        if let Some(plant) = first_plant {
            return plant_rankings(data, plant);
        }
    }

    let response = general_answer(data, &kw, &q, first_plant);
    if response.is_empty() {
        fallback_help(data)
    } else {
        response
    }
}

// ============================================================================
// Templates
// ============================================================================

#[derive(Clone, Copy)]
enum RankingStyle {
    Numbered,
    Bulleted,
}

/// Traits that have a scored ranking in the table
fn list_metric(t: TraitKeyword) -> Option<RankMetric> {
    match t {
        TraitKeyword::Drought => Some(RankMetric::Drought),
        TraitKeyword::Yield => Some(RankMetric::Yield),
        _ => None,
    }
}

fn plant_card_short(plant: &PlantRecord) -> String {
    format!(
        "**{} {}**\n• Drought: {}/10\n• Yield: {}/10\n• Zone: {}\n• Genome: {} Mbp\n",
        plant.common_name,
        plant.icon,
        plant.resistance.drought,
        plant.yield_potential,
        plant.optimal_zone,
        format_thousands(plant.genome_size)
    )
}

fn metric_list(data: &BreedingData, metric: RankMetric, title: &str, style: RankingStyle) -> String {
    let mut out = format!("**{}:**\n", title);
    for entry in rank_by(data, metric) {
        let _ = match style {
            RankingStyle::Numbered => {
                writeln!(out, "{}. {}: {}/10", entry.rank, entry.name, entry.value)
            }
            RankingStyle::Bulleted => writeln!(out, "- {}: {}/10", entry.name, entry.value),
        };
    }
    out
}

fn fragment_help(data: &BreedingData) -> String {
    format!(
        "I can help with:\n\
         • Just say plant name: 'wheat', 'sorghum'\n\
         • Or trait: 'drought', 'yield'\n\
         • Or ask: 'ranking of sorghum', 'compare wheat barley'\n\
         \nPlants: {}",
        plant_names(data)
    )
}

fn fallback_help(data: &BreedingData) -> String {
    format!(
        "I can help with:\n\
         • Plant info: 'What is wheat?'\n\
         • Rankings: 'What is the ranking of sorghum?'\n\
         • Characteristics: 'What are the characteristics?'\n\
         • Comparisons: 'Compare wheat with barley'\n\
         • Best plants: 'Which is better for drought?'\n\
         \nAvailable: {}",
        plant_names(data)
    )
}

fn plant_names(data: &BreedingData) -> String {
    data.plants()
        .iter()
        .map(|p| p.common_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn comparison(a: &PlantRecord, b: &PlantRecord) -> String {
    let mut out = format!("**{} vs {}**\n\n", a.common_name, b.common_name);
    for plant in [a, b] {
        let _ = write!(
            out,
            "{} **{}:**\n  • Drought: {}/10\n  • Yield: {}/10\n  • Zone: {}\n\n",
            plant.icon,
            plant.common_name,
            plant.resistance.drought,
            plant.yield_potential,
            plant.optimal_zone
        );
    }

    // Ties go to the second plant
    let drought_winner = if a.resistance.drought > b.resistance.drought { a } else { b };
    let yield_winner = if a.yield_potential > b.yield_potential { a } else { b };
    let _ = writeln!(out, "✅ {} is better for drought", drought_winner.common_name);
    let _ = writeln!(out, "✅ {} has higher yield", yield_winner.common_name);
    out
}

fn crossing_partners(data: &BreedingData, plant: &PlantRecord) -> String {
    let mut out = format!(
        "**For crossing/breeding with {}:**\n\nBest compatibility partners would be plants from similar zones:\n",
        plant.common_name
    );
    for partner in data
        .plants()
        .iter()
        .filter(|p| p.optimal_zone == plant.optimal_zone && p.id != plant.id)
        .take(3)
    {
        let _ = writeln!(
            out,
            "• {} (same {} zone, yield: {}/10)",
            partner.common_name, partner.optimal_zone, partner.yield_potential
        );
    }
    out
}

fn best_for(data: &BreedingData, metric: RankMetric, label: &str) -> String {
    match rank_by(data, metric).first() {
        Some(best) => format!("✅ **Best for {}:** {} ({}/10)\n", label, best.name, best.value),
        None => fallback_help(data),
    }
}

fn characteristics(plant: &PlantRecord) -> String {
    format!(
        "**{} Characteristics:**\n\
         • Genome: {} Mbp\n\
         • Climate: {}, {}\n\
         • Drought Resistance: {}/10\n\
         • Salinity Resistance: {}/10\n\
         • Disease Resistance: {}/10\n\
         • Yield Potential: {}/10\n\
         • Optimal Zone: {}\n",
        plant.common_name,
        format_thousands(plant.genome_size),
        plant.temperature,
        plant.rainfall,
        plant.resistance.drought,
        plant.resistance.salinity,
        plant.resistance.disease,
        plant.yield_potential,
        plant.optimal_zone
    )
}

fn plant_rankings(data: &BreedingData, plant: &PlantRecord) -> String {
    let total = data.len();
    let drought_rank = rank_position(data, RankMetric::Drought, plant.id).unwrap_or(total);
    let yield_rank = rank_position(data, RankMetric::Yield, plant.id).unwrap_or(total);

    format!(
        "**{} Rankings:**\n\
         • Drought: #{}/{} ({}/10)\n\
         • Yield: #{}/{} ({}/10)\n\
         • Salinity: {}/10\n\
         • Disease: {}/10\n",
        plant.common_name,
        drought_rank,
        total,
        plant.resistance.drought,
        yield_rank,
        total,
        plant.yield_potential,
        plant.resistance.salinity,
        plant.resistance.disease
    )
}

fn plant_card(plant: &PlantRecord) -> String {
    format!(
        "**{} ({}) {}**\n\
         - Genome: {} Mbp\n\
         - Climate: {}, {} rainfall\n\
         - Drought: {}/10 ({})\n\
         - Salinity: {}/10\n\
         - Yield: {}/10\n\
         - Zone: {}\n",
        plant.common_name,
        plant.scientific_name,
        plant.icon,
        format_thousands(plant.genome_size),
        plant.temperature,
        plant.rainfall,
        plant.resistance.drought,
        plant.drought_tolerance,
        plant.resistance.salinity,
        plant.yield_potential,
        plant.optimal_zone
    )
}

/// Plant card, zone card, trait ranking, recommendation or trait listing
///
/// Returns an empty string when nothing applies.
fn general_answer(
    data: &BreedingData,
    kw: &Keywords,
    q: &str,
    first_plant: Option<&PlantRecord>,
) -> String {
    if let Some(plant) = first_plant {
        return plant_card(plant);
    }

    if let Some(&zone) = kw.zones.first() {
        return match data.zone(zone) {
            Some(z) => format!(
                "**{} Zone**\n- Rainfall: {}\n- Temperature: {}\n- Best Plants: {}\n- Suitability: {}/10\n",
                z.zone,
                z.rainfall,
                z.temperature,
                z.best_plants.join(", "),
                z.suitability
            ),
            None => String::new(),
        };
    }

    match kw.question_type {
        QuestionType::Ranking => {
            if kw.traits.contains(&TraitKeyword::Drought) {
                metric_list(data, RankMetric::Drought, "Drought Resistance Rankings", RankingStyle::Numbered)
            } else if kw.traits.contains(&TraitKeyword::Yield) {
                metric_list(data, RankMetric::Yield, "Yield Rankings", RankingStyle::Numbered)
            } else {
                String::new()
            }
        }
        QuestionType::Recommendation => {
            if q.contains("drought") {
                match rank_by(data, RankMetric::Drought).first() {
                    Some(best) => format!("**Best for Drought:** {} ({}/10)\n", best.name, best.value),
                    None => String::new(),
                }
            } else {
                // Zones were handled above, so nothing else to recommend on
                String::new()
            }
        }
        _ => match kw.traits.first().copied().and_then(list_metric) {
            Some(metric) => metric_list(data, metric, metric.title(), RankingStyle::Bulleted),
            None => String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> BreedingData {
        BreedingData::builtin().unwrap()
    }

    #[test]
    fn test_single_plant_word() {
        let response = answer(&data(), "sorghum");
        assert!(response.starts_with("**Sorghum 🌾**"));
        assert!(response.contains("• Drought: 9/10"));
        assert!(response.contains("• Genome: 730 Mbp"));
    }

    #[test]
    fn test_single_trait_word_ranks() {
        let response = answer(&data(), "drought");
        assert!(response.starts_with("**Drought Resistance:**"));
        assert!(response.contains("1. Sorghum: 9/10"));
        assert!(response.contains("6. Corn: 4/10"));
    }

    #[test]
    fn test_unrelated_input_gets_help() {
        let data = data();
        let response = answer(&data, "g");
        assert!(response.starts_with("I can help with:"));
        assert!(response.contains("Plants: Bread Wheat, Barley, Corn, Sorghum, Durum Wheat, Alfalfa"));

        let response = answer(&data, "hello there my friend");
        assert!(response.contains("Available: Bread Wheat"));
    }

    #[test]
    fn test_compare_two_plants() {
        let response = answer(&data(), "compare barley with corn please");
        assert!(response.starts_with("**Barley vs Corn**"));
        assert!(response.contains("✅ Barley is better for drought"));
        assert!(response.contains("✅ Corn has higher yield"));
    }

    #[test]
    fn test_which_is_better_for_drought() {
        let response = answer(&data(), "which one is better for drought");
        assert_eq!(response, "✅ **Best for drought:** Sorghum (9/10)\n");
    }

    #[test]
    fn test_ranking_of_plant() {
        let response = answer(&data(), "what is the ranking of corn");
        assert!(response.contains("**Corn Rankings:**"));
        assert!(response.contains("• Drought: #6/6 (4/10)"));
        assert!(response.contains("• Yield: #1/6 (9/10)"));
    }

    #[test]
    fn test_zone_card() {
        let response = answer(&data(), "tell me about the sahara zone");
        assert!(response.starts_with("**Sahara Zone**"));
        assert!(response.contains("- Best Plants: Sorghum"));
    }

    #[test]
    fn test_characteristics() {
        let response = answer(&data(), "what are the characteristics of alfalfa");
        assert!(response.starts_with("**Alfalfa Characteristics:**"));
        assert!(response.contains("• Climate: 15-28°C, 450-750mm"));
    }
}
