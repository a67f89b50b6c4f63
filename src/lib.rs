//! Plant Breeding Assistant
//!
//! Hybridization scoring, catalog queries, breeding reports and a chatbot
//! over a small reference table of crop plants.
//!
//! - `data`: reference records and the built-in table
//! - `metrics`: the five pairwise factors (pollination, genome, life cycle, drought, zone)
//! - `scorer`: `CompatibilityScorer`, a pure function of two plant profiles
//! - `catalog`: search, zone statistics, trait similarity, rankings, recommendations
//! - `explanation`: nine-section breeding report with Markdown, JSON and HTML formatters
//! - `chatbot`: keyword responder, tool registry, LLM providers and sessions
//! - `api_server`: Axum router (feature `api`)

pub mod utils;
pub mod data;
pub mod metrics;
pub mod scorer;
pub mod catalog;
pub mod explanation;
pub mod chatbot;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use data::{BreedingData, ClimateZone, LifeCycle, PlantProfile, PlantRecord, Pollination, ZoneRecord};
pub use metrics::{Factor, FactorImpact, ScoringWeights};
pub use scorer::{CompatibilityLevel, CompatibilityScore, CompatibilityScorer, Confidence, PairScore};
pub use explanation::{BreedingReport, ReportGenerator};
pub use config::ServerConfig;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
