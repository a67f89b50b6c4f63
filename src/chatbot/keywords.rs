//! Keyword extraction for free-text questions
//!
//! Matching is plain case-insensitive substring search over English, French
//! and Arabic keywords, so single words and fragments still resolve.

use crate::data::{BreedingData, ClimateZone};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Recommendation,
    Ranking,
    Comparison,
    What,
    Characteristics,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKeyword {
    Drought,
    Salinity,
    Disease,
    Yield,
    Genome,
    Rainfall,
    Temperature,
}

const TRAIT_KEYWORDS: [(TraitKeyword, &[&str]); 7] = [
    (TraitKeyword::Drought, &["drought", "dry", "sécheresse", "sec", "جفاف"]),
    (TraitKeyword::Salinity, &["salinity", "salt", "salinité", "sel", "ملوحة"]),
    (
        TraitKeyword::Disease,
        &["disease", "resistance", "maladie", "résistance", "مرض", "مقاومة"],
    ),
    (TraitKeyword::Yield, &["yield", "production", "rendement", "إنتاج"]),
    (TraitKeyword::Genome, &["genome", "génome", "جينوم"]),
    (
        TraitKeyword::Rainfall,
        &["rain", "rainfall", "pluie", "précipitation", "أمطار"],
    ),
    (
        TraitKeyword::Temperature,
        &["temperature", "temp", "température", "حرارة"],
    ),
];

const ZONE_KEYWORDS: [(ClimateZone, &[&str]); 3] = [
    (
        ClimateZone::Northern,
        &["northern", "north", "coastal", "nord", "côtier", "شمال"],
    ),
    (
        ClimateZone::HighPlateau,
        &["plateau", "high plateau", "hauts plateaux", "الهضاب"],
    ),
    (
        ClimateZone::Sahara,
        &["sahara", "southern", "south", "desert", "sud", "صحراء", "جنوب"],
    ),
];

// Checked in order; first hit wins
const INTENT_KEYWORDS: [(QuestionType, &[&str]); 5] = [
    (
        QuestionType::Recommendation,
        &["best", "recommend", "meilleur", "recommand", "أفضل", "نصح"],
    ),
    (
        QuestionType::Ranking,
        &["rank", "ranking", "position", "classement", "ترتيب"],
    ),
    (
        QuestionType::Comparison,
        &["compare", "vs", "versus", "comparer", "مقارنة"],
    ),
    (
        QuestionType::What,
        &["what", "tell", "about", "info", "describe", "qu'est", "quoi", "ماذا", "ما هو"],
    ),
    (
        QuestionType::Characteristics,
        &["characteristic", "trait", "property", "caractéristique", "propriété", "خصائص"],
    ),
];

/// Entities and intent found in a question
#[derive(Debug, Clone, Serialize)]
pub struct Keywords {
    /// Matched plant ids, in table order
    pub plants: Vec<u32>,
    pub zones: Vec<ClimateZone>,
    pub traits: Vec<TraitKeyword>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub original: String,
}

impl Keywords {
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty() && self.zones.is_empty() && self.traits.is_empty()
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn mentions_plant(q: &str, common: &str, scientific: &str, aliases: &[String]) -> bool {
    let common = common.to_lowercase();
    let scientific = scientific.to_lowercase();

    q.contains(&common)
        || q.contains(&scientific)
        || common.split_whitespace().any(|w| q.contains(w))
        || scientific.split_whitespace().any(|w| q.contains(w))
        || aliases.iter().any(|a| q.contains(&a.to_lowercase()))
}

pub fn extract_keywords(data: &BreedingData, question: &str) -> Keywords {
    let q = question.to_lowercase();

    let plants: Vec<u32> = data
        .plants()
        .iter()
        .filter(|p| mentions_plant(&q, &p.common_name, &p.scientific_name, &p.aliases))
        .map(|p| p.id)
        .collect();

    let zones: Vec<ClimateZone> = ZONE_KEYWORDS
        .iter()
        .filter(|(_, words)| contains_any(&q, words))
        .map(|(zone, _)| *zone)
        .collect();

    let traits: Vec<TraitKeyword> = TRAIT_KEYWORDS
        .iter()
        .filter(|(_, words)| contains_any(&q, words))
        .map(|(t, _)| *t)
        .collect();

    let mut question_type = INTENT_KEYWORDS
        .iter()
        .find(|(_, words)| contains_any(&q, words))
        .map(|(kind, _)| *kind)
        .unwrap_or(QuestionType::General);

    // A bare plant name asks about the plant; a bare trait asks for a ranking
    if q.split_whitespace().count() <= 2 {
        if !plants.is_empty() {
            question_type = QuestionType::What;
        } else if !traits.is_empty() {
            question_type = QuestionType::Ranking;
        }
    }

    Keywords {
        plants,
        zones,
        traits,
        question_type,
        original: question.to_string(),
    }
}
