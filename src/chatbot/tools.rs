//! Tool registry exposed to LLM providers and the `/api/tools` endpoints
//!
//! Every tool takes a JSON object of arguments and returns a JSON value.
//! Argument objects are deserialized into typed structs, so a missing or
//! mistyped field is reported as `ToolError::InvalidArguments`.

use crate::catalog::{
    plants_by_zone, recommendations, search, trait_similarity, zone_statistics, PlantSummary,
};
use crate::chatbot::responder;
use crate::data::{BreedingData, ClimateZone, PlantRecord};
use crate::explanation::ReportGenerator;
use crate::scorer::CompatibilityScorer;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool '{0}' not found")]
    UnknownTool(String),

    #[error("Invalid arguments for '{tool}': {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to serialize tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Description sent to providers
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON schema of the argument object
    pub parameters: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tool {
    SearchPlants,
    GetPlantDetails,
    GetPlantsByZone,
    CalculateTraitSimilarity,
    PredictHybridization,
    GetZoneStatistics,
    GetRecommendations,
    GenerateDetailedReport,
    AnswerQuestion,
}

impl Tool {
    const ALL: [Tool; 9] = [
        Tool::SearchPlants,
        Tool::GetPlantDetails,
        Tool::GetPlantsByZone,
        Tool::CalculateTraitSimilarity,
        Tool::PredictHybridization,
        Tool::GetZoneStatistics,
        Tool::GetRecommendations,
        Tool::GenerateDetailedReport,
        Tool::AnswerQuestion,
    ];

    fn name(&self) -> &'static str {
        match self {
            Tool::SearchPlants => "search_plants",
            Tool::GetPlantDetails => "get_plant_details",
            Tool::GetPlantsByZone => "get_plants_by_zone",
            Tool::CalculateTraitSimilarity => "calculate_trait_similarity",
            Tool::PredictHybridization => "predict_hybridization",
            Tool::GetZoneStatistics => "get_zone_statistics",
            Tool::GetRecommendations => "get_recommendations",
            Tool::GenerateDetailedReport => "generate_detailed_report",
            Tool::AnswerQuestion => "answer_question",
        }
    }

    fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|t| t.name() == name)
    }

    fn definition(&self) -> ToolDefinition {
        let pair_schema = || {
            json!({
                "type": "object",
                "properties": {
                    "plant_a_id": {"type": "integer", "description": "First plant ID"},
                    "plant_b_id": {"type": "integer", "description": "Second plant ID"}
                },
                "required": ["plant_a_id", "plant_b_id"]
            })
        };
        let zone_schema = || {
            json!({
                "type": "object",
                "properties": {
                    "zone": {
                        "type": "string",
                        "enum": ["Northern", "High Plateau", "Sahara"],
                        "description": "Climate zone"
                    }
                },
                "required": ["zone"]
            })
        };

        let (description, parameters) = match self {
            Tool::SearchPlants => (
                "Search for plants by common name, scientific name or climate zone",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {"type": "string", "description": "Search term"}
                    },
                    "required": ["query"]
                }),
            ),
            Tool::GetPlantDetails => (
                "Get the full reference record of a plant",
                json!({
                    "type": "object",
                    "properties": {
                        "plant_id": {"type": "integer", "description": "Plant ID"}
                    },
                    "required": ["plant_id"]
                }),
            ),
            Tool::GetPlantsByZone => ("List the plants whose optimal zone is the given zone", zone_schema()),
            Tool::CalculateTraitSimilarity => (
                "Compare the trait sets of two plants (shared, unique, Jaccard similarity %)",
                pair_schema(),
            ),
            Tool::PredictHybridization => (
                "Predict hybridization success between two plants with confidence and factor breakdown",
                pair_schema(),
            ),
            Tool::GetZoneStatistics => (
                "Plant count, plant list and common traits of a climate zone",
                zone_schema(),
            ),
            Tool::GetRecommendations => (
                "Recommend up to five plants filtered by zone and/or desired trait",
                json!({
                    "type": "object",
                    "properties": {
                        "zone": {"type": "string", "description": "Climate zone"},
                        "target_trait": {"type": "string", "description": "Desired trait, e.g. drought"}
                    }
                }),
            ),
            Tool::GenerateDetailedReport => (
                "Generate a comprehensive nine-section breeding analysis report for a cross",
                pair_schema(),
            ),
            Tool::AnswerQuestion => (
                "Answer any question about plants, zones and traits from the reference data",
                json!({
                    "type": "object",
                    "properties": {
                        "question": {"type": "string", "description": "User's question"}
                    },
                    "required": ["question"]
                }),
            ),
        };

        ToolDefinition {
            name: self.name(),
            description,
            parameters,
        }
    }
}

// ============================================================================
// Argument types
// ============================================================================

#[derive(Deserialize)]
struct QueryArgs {
    query: String,
}

#[derive(Deserialize)]
struct PlantArgs {
    plant_id: u32,
}

#[derive(Deserialize)]
struct ZoneArgs {
    zone: String,
}

#[derive(Deserialize)]
struct PairArgs {
    plant_a_id: u32,
    plant_b_id: u32,
}

#[derive(Deserialize, Default)]
struct RecommendationArgs {
    zone: Option<String>,
    target_trait: Option<String>,
}

#[derive(Deserialize)]
struct QuestionArgs {
    question: String,
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Clone)]
pub struct ToolRegistry {
    data: Arc<BreedingData>,
    scorer: CompatibilityScorer,
}

impl ToolRegistry {
    pub fn new(data: Arc<BreedingData>, scorer: CompatibilityScorer) -> Self {
        Self { data, scorer }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        Tool::ALL.iter().map(Tool::definition).collect()
    }

    /// Run a tool by name; `args` must be a JSON object (null is treated as `{}`)
    pub fn execute(&self, name: &str, args: &Value) -> Result<Value, ToolError> {
        let tool = Tool::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tracing::debug!("Executing tool {} with {}", name, args);

        let data = self.data.as_ref();
        let result = match tool {
            Tool::SearchPlants => {
                let args: QueryArgs = parse_args(tool, args)?;
                json!(search(data, &args.query))
            }
            Tool::GetPlantDetails => {
                let args: PlantArgs = parse_args(tool, args)?;
                serde_json::to_value(self.plant(args.plant_id)?)?
            }
            Tool::GetPlantsByZone => {
                let args: ZoneArgs = parse_args(tool, args)?;
                let zone = parse_zone(tool, &args.zone)?;
                json!(plants_by_zone(data, zone))
            }
            Tool::CalculateTraitSimilarity => {
                let args: PairArgs = parse_args(tool, args)?;
                let (a, b) = self.pair(&args)?;
                json!({
                    "plant_a": a.common_name,
                    "plant_b": b.common_name,
                    "similarity": trait_similarity(a, b),
                })
            }
            Tool::PredictHybridization => {
                let args: PairArgs = parse_args(tool, args)?;
                let (a, b) = self.pair(&args)?;
                let score = self.scorer.score(&a.profile(), &b.profile());
                json!({
                    "plant_a": a.common_name,
                    "plant_b": b.common_name,
                    "prediction": score,
                })
            }
            Tool::GetZoneStatistics => {
                let args: ZoneArgs = parse_args(tool, args)?;
                let zone = parse_zone(tool, &args.zone)?;
                serde_json::to_value(zone_statistics(data, zone))?
            }
            Tool::GetRecommendations => {
                let args: RecommendationArgs = if args.is_null() {
                    RecommendationArgs::default()
                } else {
                    parse_args(tool, args)?
                };
                let zone = args
                    .zone
                    .as_deref()
                    .filter(|z| !z.trim().is_empty())
                    .map(|z| parse_zone(tool, z))
                    .transpose()?;
                let plants: Vec<PlantSummary> =
                    recommendations(data, zone, args.target_trait.as_deref())
                        .into_iter()
                        .map(PlantSummary::from)
                        .collect();
                json!(plants)
            }
            Tool::GenerateDetailedReport => {
                let args: PairArgs = parse_args(tool, args)?;
                let (a, b) = self.pair(&args)?;
                let score = self.scorer.score(&a.profile(), &b.profile());
                serde_json::to_value(ReportGenerator::generate(a, b, &score))?
            }
            Tool::AnswerQuestion => {
                let args: QuestionArgs = parse_args(tool, args)?;
                Value::String(responder::answer(data, &args.question))
            }
        };

        Ok(result)
    }

    fn plant(&self, id: u32) -> Result<&PlantRecord, ToolError> {
        self.data
            .plant(id)
            .ok_or_else(|| ToolError::NotFound(format!("Plant {} not found", id)))
    }

    fn pair(&self, args: &PairArgs) -> Result<(&PlantRecord, &PlantRecord), ToolError> {
        Ok((self.plant(args.plant_a_id)?, self.plant(args.plant_b_id)?))
    }
}

fn parse_args<T: DeserializeOwned>(tool: Tool, args: &Value) -> Result<T, ToolError> {
    let args = if args.is_null() { json!({}) } else { args.clone() };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments {
        tool: tool.name().to_string(),
        message: e.to_string(),
    })
}

fn parse_zone(tool: Tool, raw: &str) -> Result<ClimateZone, ToolError> {
    raw.parse().map_err(|e: crate::data::UnknownZone| ToolError::InvalidArguments {
        tool: tool.name().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ToolRegistry {
        let data = Arc::new(BreedingData::builtin().unwrap());
        ToolRegistry::new(data, CompatibilityScorer::new())
    }

    #[test]
    fn test_definitions_cover_all_tools() {
        let defs = registry().definitions();
        assert_eq!(defs.len(), 9);
        assert_eq!(defs[0].name, "search_plants");
        assert!(defs.iter().all(|d| d.parameters["type"] == "object"));
        assert!(defs.iter().any(|d| d.name == "answer_question"));
    }

    #[test]
    fn test_search_plants() {
        let result = registry()
            .execute("search_plants", &json!({"query": "wheat"}))
            .unwrap();
        let ids: Vec<u64> = result
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn test_predict_hybridization() {
        let result = registry()
            .execute("predict_hybridization", &json!({"plant_a_id": 1, "plant_b_id": 2}))
            .unwrap();
        assert_eq!(result["prediction"]["success_rate"], 53);
        assert_eq!(result["plant_b"], "Barley");
    }

    #[test]
    fn test_zone_statistics_accepts_loose_zone_names() {
        let result = registry()
            .execute("get_zone_statistics", &json!({"zone": "high_plateau"}))
            .unwrap();
        assert_eq!(result["plant_count"], 2);
    }

    #[test]
    fn test_recommendations_without_arguments() {
        let registry = registry();
        let all = registry.execute("get_recommendations", &Value::Null).unwrap();
        assert_eq!(all.as_array().unwrap().len(), 5);

        let heat = registry
            .execute("get_recommendations", &json!({"target_trait": "heat"}))
            .unwrap();
        assert_eq!(heat.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_errors() {
        let registry = registry();
        assert!(matches!(
            registry.execute("launch_rocket", &json!({})),
            Err(ToolError::UnknownTool(_))
        ));
        assert!(matches!(
            registry.execute("get_plant_details", &json!({"plant_id": "one"})),
            Err(ToolError::InvalidArguments { .. })
        ));
        assert!(matches!(
            registry.execute("get_plant_details", &json!({"plant_id": 99})),
            Err(ToolError::NotFound(_))
        ));
        assert!(matches!(
            registry.execute("get_plants_by_zone", &json!({"zone": "Atlantis"})),
            Err(ToolError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn test_answer_question_and_report() {
        let registry = registry();
        let answer = registry
            .execute("answer_question", &json!({"question": "drought"}))
            .unwrap();
        assert!(answer.as_str().unwrap().contains("1. Sorghum: 9/10"));

        let report = registry
            .execute("generate_detailed_report", &json!({"plant_a_id": 1, "plant_b_id": 2}))
            .unwrap();
        assert_eq!(report["executive_summary"]["success_probability"], 53);
    }
}
