//! # Meal-Plan Recipe Import
//!
//! Recipe text ingestion for a household meal-planning application: converts
//! free-form recipe text or scraped-site payloads into structured records,
//! parses ingredient lines into quantity/unit/name/preparation components,
//! and fuzzy-matches parsed names against a canonical ingredient catalog.

pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
pub mod import;
pub mod line_parser;
pub mod matcher;
pub mod segmenter;
pub mod similarity;
pub mod vocabulary;

// Re-export types for easier access
pub use catalog::{CanonicalIngredient, IngredientCatalog, InMemoryCatalog};
pub use import::{ImportPreview, RecipeImporter, ScrapedRecipe};
pub use line_parser::{IngredientLineParser, ParsedIngredientLine};
pub use matcher::{IngredientMatch, IngredientMatcher, MatcherConfig};
pub use segmenter::{ParsedRecipe, RecipeTextSegmenter};
