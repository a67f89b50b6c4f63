//! Breeding report generation and rendering
//!
//! `ReportGenerator` turns a scored pair into a structured nine-section
//! report; the formatters render it as Markdown, JSON or standalone HTML.

pub mod types;
pub mod generator;
pub mod formatters;

pub use types::{
    BreedingReport, Conclusion, EnvironmentalAdaptability, ExecutiveSummary, F1Expectations,
    HybridizationPrediction, ImprovementPlan, LabeledValue, ParentAnalysis, ParentProfile,
    RiskAssessment, RiskItem, StressTolerance, TraitCompatibility,
};
pub use generator::ReportGenerator;
pub use formatters::{HtmlFormatter, JsonFormatter, MarkdownFormatter};
