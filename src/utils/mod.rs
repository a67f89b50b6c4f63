//! Utility modules
//!
//! Contains shared functionality used across the scorer, reports and chatbot:
//! - Text: trait display names, number formatting, HTML escaping

pub mod text;

// Re-export commonly used helpers
pub use text::{escape_html, format_thousands, humanize_trait};
