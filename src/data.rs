//! Reference Data Loading
//!
//! Holds the static plant and climate-zone tables that every dashboard page,
//! the compatibility scorer and the chatbot read from. The table ships inside
//! the binary (`data/reference_data.json`) and can be replaced at startup by a
//! JSON file with the same shape.
//!
//! Records are immutable after load: nothing is created or destroyed at runtime.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const BUILTIN_TABLE: &str = include_str!("../data/reference_data.json");

/// How pollen reaches the stigma
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollination {
    Wind,
    #[serde(rename = "self")]
    SelfPollinated,
    Insect,
}

impl Pollination {
    pub fn label(&self) -> &'static str {
        match self {
            Pollination::Wind => "wind",
            Pollination::SelfPollinated => "self",
            Pollination::Insect => "insect",
        }
    }
}

/// Life-cycle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeCycle {
    Annual,
    Perennial,
}

impl LifeCycle {
    pub fn label(&self) -> &'static str {
        match self {
            LifeCycle::Annual => "annual",
            LifeCycle::Perennial => "perennial",
        }
    }
}

/// Climate zones shown on the Map page
///
/// Serialized as its label; deserialized through `FromStr`, so data files may
/// use any casing or `high_plateau`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ClimateZone {
    Northern,
    #[serde(rename = "High Plateau")]
    HighPlateau,
    Sahara,
}

impl ClimateZone {
    pub const ALL: [ClimateZone; 3] = [
        ClimateZone::Northern,
        ClimateZone::HighPlateau,
        ClimateZone::Sahara,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClimateZone::Northern => "Northern",
            ClimateZone::HighPlateau => "High Plateau",
            ClimateZone::Sahara => "Sahara",
        }
    }

    /// Climate description used in the chatbot platform context
    pub fn climate(&self) -> &'static str {
        match self {
            ClimateZone::Northern => "temperate climate",
            ClimateZone::HighPlateau => "continental climate",
            ClimateZone::Sahara => "arid climate",
        }
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for zone labels that don't name a known zone
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown climate zone: {0}")]
pub struct UnknownZone(pub String);

impl FromStr for ClimateZone {
    type Err = UnknownZone;

    /// Case-insensitive; accepts "high plateau", "high_plateau" and "high-plateau"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "northern" => Ok(ClimateZone::Northern),
            "high plateau" => Ok(ClimateZone::HighPlateau),
            "sahara" => Ok(ClimateZone::Sahara),
            _ => Err(UnknownZone(s.to_string())),
        }
    }
}

impl TryFrom<String> for ClimateZone {
    type Error = UnknownZone;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Resistance ratings (0-10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resistance {
    pub drought: u8,
    pub salinity: u8,
    pub disease: u8,
}

/// Attributes consumed by the compatibility scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlantProfile {
    pub pollination: Pollination,
    pub genome_size: f64,
    pub life_cycle: LifeCycle,
    /// Drought-resistance rating, 0-10
    pub drought_rating: u8,
    pub zone: ClimateZone,
}

/// Full reference row for one plant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantRecord {
    pub id: u32,
    pub scientific_name: String,
    pub common_name: String,
    pub icon: String,
    /// Genome size in Mbp
    pub genome_size: f64,
    pub rainfall: String,
    pub temperature: String,
    pub drought_tolerance: String,
    pub resistance: Resistance,
    pub optimal_zone: ClimateZone,
    pub yield_potential: u8,
    pub genetic_diversity: u8,
    pub pollination: Pollination,
    pub life_cycle: LifeCycle,
    #[serde(default)]
    pub traits: Vec<String>,
    /// Other-language names matched by the chatbot
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Externally computed grouping id, opaque
    #[serde(default)]
    pub cluster: Option<u32>,
}

impl PlantRecord {
    pub fn profile(&self) -> PlantProfile {
        PlantProfile {
            pollination: self.pollination,
            genome_size: self.genome_size,
            life_cycle: self.life_cycle,
            drought_rating: self.resistance.drought,
            zone: self.optimal_zone,
        }
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t == name)
    }
}

/// Climate zone description row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub zone: ClimateZone,
    pub rainfall: String,
    pub temperature: String,
    pub soil: String,
    pub best_plants: Vec<String>,
    pub suitability: f64,
}

#[derive(Deserialize)]
struct RawTable {
    plants: Vec<PlantRecord>,
    zones: Vec<ZoneRecord>,
}

/// Main data holder
///
/// Plants keep table order; lookups go through the id index.
#[derive(Debug)]
pub struct BreedingData {
    plants: Vec<PlantRecord>,
    zones: Vec<ZoneRecord>,
    by_id: FxHashMap<u32, usize>,
}

impl BreedingData {
    /// Load the table compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TABLE).context("Failed to parse built-in reference data")
    }

    /// Load a replacement table from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference data: {:?}", path))?;

        Self::from_json(&contents)
            .with_context(|| format!("Failed to parse reference data: {:?}", path))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let raw: RawTable = serde_json::from_str(contents)?;
        Self::from_records(raw.plants, raw.zones)
    }

    pub fn from_records(plants: Vec<PlantRecord>, zones: Vec<ZoneRecord>) -> Result<Self> {
        let mut by_id = FxHashMap::default();

        for (idx, plant) in plants.iter().enumerate() {
            if by_id.insert(plant.id, idx).is_some() {
                anyhow::bail!("Duplicate plant id {}", plant.id);
            }
            check_ratings(plant)?;
        }

        for zone in &zones {
            if !(0.0..=10.0).contains(&zone.suitability) {
                anyhow::bail!(
                    "Zone {} has suitability {} outside 0-10",
                    zone.zone,
                    zone.suitability
                );
            }
        }

        tracing::debug!("Loaded {} plants, {} zones", plants.len(), zones.len());

        Ok(Self {
            plants,
            zones,
            by_id,
        })
    }

    pub fn plants(&self) -> &[PlantRecord] {
        &self.plants
    }

    pub fn zones(&self) -> &[ZoneRecord] {
        &self.zones
    }

    pub fn plant(&self, id: u32) -> Option<&PlantRecord> {
        self.by_id.get(&id).map(|&idx| &self.plants[idx])
    }

    pub fn zone(&self, zone: ClimateZone) -> Option<&ZoneRecord> {
        self.zones.iter().find(|z| z.zone == zone)
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

/// All 0-10 ratings of a plant
fn check_ratings(plant: &PlantRecord) -> Result<()> {
    let ratings = [
        ("drought", plant.resistance.drought),
        ("salinity", plant.resistance.salinity),
        ("disease", plant.resistance.disease),
        ("yield potential", plant.yield_potential),
        ("genetic diversity", plant.genetic_diversity),
    ];
    for (name, value) in ratings {
        if value > 10 {
            anyhow::bail!("Plant {} has {} rating {} outside 0-10", plant.id, name, value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let data = BreedingData::builtin().unwrap();
        assert_eq!(data.len(), 6);
        assert_eq!(data.zones().len(), 3);

        let wheat = data.plant(1).unwrap();
        assert_eq!(wheat.common_name, "Bread Wheat");
        assert_eq!(wheat.pollination, Pollination::Wind);
        assert_eq!(wheat.optimal_zone, ClimateZone::Northern);
        assert_eq!(wheat.cluster, Some(1));
    }

    fn one_plant_table(zone: &str) -> String {
        format!(
            r#"{{
                "plants": [{{
                    "id": 1, "scientific_name": "Triticum aestivum", "common_name": "Bread Wheat",
                    "icon": "🌾", "genome_size": 17000, "rainfall": "300-800mm",
                    "temperature": "10-25°C", "drought_tolerance": "Moderate",
                    "resistance": {{"drought": 6, "salinity": 4, "disease": 7}},
                    "optimal_zone": "{}", "yield_potential": 8, "genetic_diversity": 7,
                    "pollination": "wind", "life_cycle": "annual"
                }}],
                "zones": []
            }}"#,
            zone
        )
    }

    #[test]
    fn test_zone_labels_in_data_files_are_lenient() {
        for (label, expected) in [
            ("northern", ClimateZone::Northern),
            ("high_plateau", ClimateZone::HighPlateau),
            ("High Plateau", ClimateZone::HighPlateau),
            ("SAHARA", ClimateZone::Sahara),
        ] {
            let data = BreedingData::from_json(&one_plant_table(label)).unwrap();
            assert_eq!(data.plant(1).unwrap().optimal_zone, expected);
        }
        assert!(BreedingData::from_json(&one_plant_table("tundra")).is_err());
    }

    #[test]
    fn test_zone_serializes_as_label() {
        let json = serde_json::to_string(&ClimateZone::HighPlateau).unwrap();
        assert_eq!(json, "\"High Plateau\"");
    }

    #[test]
    fn test_out_of_range_ratings_rejected() {
        let data = BreedingData::builtin().unwrap();
        let base = data.plants()[0].clone();

        let mut salty = base.clone();
        salty.resistance.salinity = 11;
        let mut fertile = base.clone();
        fertile.yield_potential = 12;
        let mut diverse = base.clone();
        diverse.genetic_diversity = 200;
        let mut sturdy = base;
        sturdy.resistance.disease = 11;

        for plant in [salty, fertile, diverse, sturdy] {
            assert!(BreedingData::from_records(vec![plant], vec![]).is_err());
        }
    }

    #[test]
    fn test_zone_parsing() {
        assert_eq!("northern".parse::<ClimateZone>(), Ok(ClimateZone::Northern));
        assert_eq!("High_Plateau".parse::<ClimateZone>(), Ok(ClimateZone::HighPlateau));
        assert_eq!(" SAHARA ".parse::<ClimateZone>(), Ok(ClimateZone::Sahara));
        assert!("tundra".parse::<ClimateZone>().is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let data = BreedingData::builtin().unwrap();
        let mut plants = data.plants().to_vec();
        plants.push(plants[0].clone());
        assert!(BreedingData::from_records(plants, vec![]).is_err());
    }

    #[test]
    fn test_profile_projection() {
        let data = BreedingData::builtin().unwrap();
        let alfalfa = data.plant(6).unwrap().profile();
        assert_eq!(alfalfa.pollination, Pollination::Insect);
        assert_eq!(alfalfa.life_cycle, LifeCycle::Perennial);
        assert_eq!(alfalfa.drought_rating, 7);
    }
}
