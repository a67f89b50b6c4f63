//! Catalog queries behind the dashboard pages
//!
//! - Encyclopedia: `search`
//! - Map: `plants_by_zone`, `zone_statistics`
//! - Compare: `trait_similarity`
//! - Ranking: `rank_by`
//! - Home: `recommendations`
//!
//! All functions are read-only views over `BreedingData`.

use crate::data::{BreedingData, ClimateZone, PlantRecord};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum number of plants returned by `recommendations`
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Lightweight plant reference for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSummary {
    pub id: u32,
    pub name: String,
    pub scientific_name: String,
}

impl From<&PlantRecord> for PlantSummary {
    fn from(plant: &PlantRecord) -> Self {
        Self {
            id: plant.id,
            name: plant.common_name.clone(),
            scientific_name: plant.scientific_name.clone(),
        }
    }
}

/// Case-insensitive substring search over common name, scientific name and zone
///
/// An empty (or whitespace-only) query matches nothing.
pub fn search<'a>(data: &'a BreedingData, query: &str) -> Vec<&'a PlantRecord> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    data.plants()
        .iter()
        .filter(|p| {
            p.common_name.to_lowercase().contains(&q)
                || p.scientific_name.to_lowercase().contains(&q)
                || p.optimal_zone.label().to_lowercase().contains(&q)
        })
        .collect()
}

pub fn plants_by_zone(data: &BreedingData, zone: ClimateZone) -> Vec<&PlantRecord> {
    data.plants()
        .iter()
        .filter(|p| p.optimal_zone == zone)
        .collect()
}

// ============================================================================
// Zone statistics (Map page)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitCount {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneStatistics {
    pub zone: ClimateZone,
    pub plant_count: usize,
    pub plants: Vec<PlantSummary>,
    /// Traits carried by at least two plants of the zone
    pub common_traits: Vec<TraitCount>,
}

pub fn zone_statistics(data: &BreedingData, zone: ClimateZone) -> ZoneStatistics {
    let zone_plants = plants_by_zone(data, zone);

    let mut trait_counts: FxHashMap<&str, usize> = FxHashMap::default();
    for plant in &zone_plants {
        for t in &plant.traits {
            *trait_counts.entry(t.as_str()).or_insert(0) += 1;
        }
    }

    let mut common_traits: Vec<TraitCount> = trait_counts
        .into_iter()
        .filter(|&(_, count)| count >= 2)
        .map(|(t, count)| TraitCount {
            trait_name: t.to_string(),
            count,
        })
        .collect();
    common_traits.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.trait_name.cmp(&b.trait_name)));

    ZoneStatistics {
        zone,
        plant_count: zone_plants.len(),
        plants: zone_plants.iter().map(|p| PlantSummary::from(*p)).collect(),
        common_traits,
    }
}

// ============================================================================
// Trait similarity (Compare page)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitSimilarity {
    pub shared_traits: Vec<String>,
    pub unique_to_a: Vec<String>,
    pub unique_to_b: Vec<String>,
    /// Jaccard index × 100, rounded to 2 decimals
    pub similarity: f64,
}

pub fn trait_similarity(a: &PlantRecord, b: &PlantRecord) -> TraitSimilarity {
    let traits_a = unique_in_order(&a.traits);
    let traits_b = unique_in_order(&b.traits);
    let set_a: FxHashSet<&str> = traits_a.iter().copied().collect();
    let set_b: FxHashSet<&str> = traits_b.iter().copied().collect();

    let shared_traits: Vec<String> = traits_a
        .iter()
        .filter(|t| set_b.contains(*t))
        .map(|t| t.to_string())
        .collect();
    let unique_to_a: Vec<String> = traits_a
        .iter()
        .filter(|t| !set_b.contains(*t))
        .map(|t| t.to_string())
        .collect();
    let unique_to_b: Vec<String> = traits_b
        .iter()
        .filter(|t| !set_a.contains(*t))
        .map(|t| t.to_string())
        .collect();

    let union = shared_traits.len() + unique_to_a.len() + unique_to_b.len();
    let similarity = if union == 0 {
        0.0
    } else {
        let pct = shared_traits.len() as f64 / union as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    };

    TraitSimilarity {
        shared_traits,
        unique_to_a,
        unique_to_b,
        similarity,
    }
}

/// Distinct traits, first occurrence wins
fn unique_in_order(traits: &[String]) -> Vec<&str> {
    let mut seen = FxHashSet::default();
    traits
        .iter()
        .map(String::as_str)
        .filter(|t| seen.insert(*t))
        .collect()
}

// ============================================================================
// Rankings (Ranking page)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMetric {
    Drought,
    Salinity,
    Disease,
    Yield,
    Genome,
    Diversity,
}

impl RankMetric {
    pub fn value(&self, plant: &PlantRecord) -> f64 {
        match self {
            RankMetric::Drought => plant.resistance.drought as f64,
            RankMetric::Salinity => plant.resistance.salinity as f64,
            RankMetric::Disease => plant.resistance.disease as f64,
            RankMetric::Yield => plant.yield_potential as f64,
            RankMetric::Genome => plant.genome_size,
            RankMetric::Diversity => plant.genetic_diversity as f64,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RankMetric::Drought => "Drought Resistance",
            RankMetric::Salinity => "Salinity Resistance",
            RankMetric::Disease => "Disease Resistance",
            RankMetric::Yield => "Yield Potential",
            RankMetric::Genome => "Genome Size",
            RankMetric::Diversity => "Genetic Diversity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ranking metric: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for RankMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drought" => Ok(RankMetric::Drought),
            "salinity" => Ok(RankMetric::Salinity),
            "disease" => Ok(RankMetric::Disease),
            "yield" => Ok(RankMetric::Yield),
            "genome" => Ok(RankMetric::Genome),
            "diversity" => Ok(RankMetric::Diversity),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based position
    pub rank: usize,
    pub id: u32,
    pub name: String,
    pub icon: String,
    pub value: f64,
}

/// Rank all plants by a metric, highest first; ties keep table order
pub fn rank_by(data: &BreedingData, metric: RankMetric) -> Vec<RankingEntry> {
    let mut plants: Vec<&PlantRecord> = data.plants().iter().collect();
    // sort_by is stable
    plants.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));

    plants
        .into_iter()
        .enumerate()
        .map(|(i, p)| RankingEntry {
            rank: i + 1,
            id: p.id,
            name: p.common_name.clone(),
            icon: p.icon.clone(),
            value: metric.value(p),
        })
        .collect()
}

/// 1-based position of a plant in a metric ranking
pub fn rank_position(data: &BreedingData, metric: RankMetric, plant_id: u32) -> Option<usize> {
    rank_by(data, metric)
        .iter()
        .find(|e| e.id == plant_id)
        .map(|e| e.rank)
}

// ============================================================================
// Recommendations (Home page)
// ============================================================================

/// Filter by zone and by trait substring, keep the first five
pub fn recommendations<'a>(
    data: &'a BreedingData,
    zone: Option<ClimateZone>,
    target_trait: Option<&str>,
) -> Vec<&'a PlantRecord> {
    let target = target_trait
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty());

    data.plants()
        .iter()
        .filter(|p| zone.map_or(true, |z| p.optimal_zone == z))
        .filter(|p| match &target {
            Some(t) => p.traits.iter().any(|pt| pt.to_lowercase().contains(t.as_str())),
            None => true,
        })
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn data() -> BreedingData {
        BreedingData::builtin().unwrap()
    }

    #[test]
    fn test_search_matches_names_and_zone() {
        let data = data();
        let wheat: Vec<u32> = search(&data, "wheat").iter().map(|p| p.id).collect();
        assert_eq!(wheat, vec![1, 5]);

        let triticum: Vec<u32> = search(&data, "TRITICUM").iter().map(|p| p.id).collect();
        assert_eq!(triticum, vec![1, 5]);

        let sahara: Vec<u32> = search(&data, "sahara").iter().map(|p| p.id).collect();
        assert_eq!(sahara, vec![4]);

        assert!(search(&data, "   ").is_empty());
    }

    #[test]
    fn test_zone_statistics_common_traits() {
        let data = data();
        let stats = zone_statistics(&data, ClimateZone::HighPlateau);
        assert_eq!(stats.plant_count, 2);
        assert_eq!(stats.common_traits.len(), 1);
        assert_eq!(stats.common_traits[0].trait_name, "drought_resistance");
        assert_eq!(stats.common_traits[0].count, 2);

        let sahara = zone_statistics(&data, ClimateZone::Sahara);
        assert_eq!(sahara.plant_count, 1);
        assert!(sahara.common_traits.is_empty());
    }

    #[test]
    fn test_trait_similarity_jaccard() {
        let data = data();
        let wheat = data.plant(1).unwrap();
        let barley = data.plant(2).unwrap();
        let sim = trait_similarity(wheat, barley);

        // shared {drought_resistance}, union of 5
        assert_eq!(sim.shared_traits, vec!["drought_resistance".to_string()]);
        assert_eq!(sim.unique_to_a.len(), 2);
        assert_eq!(sim.unique_to_b.len(), 2);
        assert_relative_eq!(sim.similarity, 20.0, epsilon = 1e-9);

        let self_sim = trait_similarity(wheat, wheat);
        assert_relative_eq!(self_sim.similarity, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_trait_similarity_empty_traits() {
        let data = data();
        let mut a = data.plant(1).unwrap().clone();
        let mut b = data.plant(2).unwrap().clone();
        a.traits.clear();
        b.traits.clear();
        assert_relative_eq!(trait_similarity(&a, &b).similarity, 0.0);
    }

    #[test]
    fn test_trait_similarity_counts_repeated_traits_once() {
        let data = data();
        let mut a = data.plant(1).unwrap().clone();
        let mut b = data.plant(2).unwrap().clone();
        a.traits = vec!["x".to_string(), "y".to_string(), "x".to_string()];
        b.traits = vec!["x".to_string()];

        let sim = trait_similarity(&a, &b);
        assert_eq!(sim.shared_traits, vec!["x"]);
        assert_eq!(sim.unique_to_a, vec!["y"]);
        assert!(sim.unique_to_b.is_empty());
        assert_relative_eq!(sim.similarity, 50.0);

        b.traits = vec!["z".to_string(), "x".to_string(), "z".to_string()];
        let sim = trait_similarity(&a, &b);
        assert_eq!(sim.unique_to_b, vec!["z"]);
        assert_relative_eq!(sim.similarity, 33.33);
    }

    #[test]
    fn test_rank_by_drought() {
        let data = data();
        let ranking = rank_by(&data, RankMetric::Drought);
        assert_eq!(ranking[0].name, "Sorghum");
        assert_eq!(ranking[1].name, "Barley");
        // Durum Wheat and Alfalfa tie at 7; table order keeps Durum first
        assert_eq!(ranking[2].name, "Durum Wheat");
        assert_eq!(ranking[3].name, "Alfalfa");
        assert_eq!(ranking.last().unwrap().name, "Corn");
        assert_eq!(rank_position(&data, RankMetric::Yield, 3), Some(1));
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("Yield".parse::<RankMetric>(), Ok(RankMetric::Yield));
        assert!("height".parse::<RankMetric>().is_err());
    }

    #[test]
    fn test_recommendations_filters() {
        let data = data();
        let northern: Vec<u32> = recommendations(&data, Some(ClimateZone::Northern), None)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(northern, vec![1, 3, 6]);

        let heat: Vec<u32> = recommendations(&data, None, Some("heat"))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(heat, vec![3, 4, 5]);

        assert_eq!(recommendations(&data, None, None).len(), MAX_RECOMMENDATIONS);
    }
}
