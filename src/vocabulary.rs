//! # Parsing Vocabularies
//!
//! This module owns the word lists the line parser, segmenter and matcher are
//! built from: measurement units, preparation verbs, leading modifier words,
//! matching stopwords and section header keywords.
//!
//! The vocabularies are explicit configuration data rather than hidden
//! globals so locale-specific lists can be substituted later without touching
//! algorithm code. They can be loaded from a JSON file (see
//! `config/vocabulary.json`) or fall back to the built-in English defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};

/// Word lists driving ingredient line parsing, recipe segmentation and
/// ingredient matching, loaded from JSON or built-in defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VocabularyConfig {
    /// Measurement units and size adjectives recognized after a quantity,
    /// fully enumerated (singular, plural and abbreviated forms)
    pub units: Vec<String>,
    /// Words/phrases that qualify trailing comma text as a preparation
    pub preparation_words: Vec<String>,
    /// Leading modifier words stripped before catalog matching, tested in
    /// list order against the start of the cleaned name
    pub modifier_prefixes: Vec<String>,
    /// Words ignored when collecting significant words for candidate search
    pub stopwords: Vec<String>,
    /// Section header keywords that open the ingredients block
    pub ingredient_headers: Vec<String>,
    /// Section header keywords that open the instructions block
    pub instruction_headers: Vec<String>,
    /// Additional header keywords recognized (and skipped) inside the
    /// ingredients block, e.g. "notes"
    pub extra_section_headers: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        let to_vec = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            units: to_vec(&[
                "cup",
                "cups",
                "tbsp",
                "tbsps",
                "tsp",
                "tsps",
                "tablespoon",
                "tablespoons",
                "teaspoon",
                "teaspoons",
                "oz",
                "ounce",
                "ounces",
                "lb",
                "lbs",
                "pound",
                "pounds",
                "g",
                "gram",
                "grams",
                "kg",
                "kilogram",
                "kilograms",
                "ml",
                "milliliter",
                "milliliters",
                "l",
                "liter",
                "liters",
                "clove",
                "cloves",
                "can",
                "cans",
                "package",
                "packages",
                "pkg",
                "pkgs",
                "pinch",
                "pinches",
                "bunch",
                "bunches",
                "head",
                "heads",
                "stalk",
                "stalks",
                "piece",
                "pieces",
                "pc",
                "pcs",
                "slice",
                "slices",
                "stick",
                "sticks",
                "large",
                "medium",
                "small",
                "whole",
                "sprig",
                "sprigs",
                "leaf",
                "leaves",
                "handful",
                "handfuls",
            ]),
            preparation_words: to_vec(&[
                "diced",
                "chopped",
                "minced",
                "sliced",
                "cubed",
                "crushed",
                "grated",
                "shredded",
                "julienned",
                "melted",
                "softened",
                "divided",
                "optional",
                "to taste",
                "for garnish",
                "peeled",
                "seeded",
                "cored",
                "trimmed",
                "halved",
                "quartered",
            ]),
            modifier_prefixes: to_vec(&[
                "fresh",
                "dried",
                "frozen",
                "organic",
                "large",
                "small",
                "medium",
                "ripe",
                "raw",
                "cooked",
                "canned",
                "whole",
                "ground",
                "extra-virgin",
                "extra virgin",
                "low-sodium",
                "unsalted",
                "salted",
            ]),
            stopwords: to_vec(&[
                "fresh", "dried", "frozen", "organic", "large", "small", "medium", "the", "a",
                "an", "of", "for", "to",
            ]),
            ingredient_headers: to_vec(&["ingredients", "what you need", "you will need"]),
            instruction_headers: to_vec(&[
                "instructions",
                "directions",
                "method",
                "steps",
                "preparation",
            ]),
            extra_section_headers: to_vec(&["notes", "tips"]),
        }
    }
}

impl VocabularyConfig {
    /// Validate vocabulary configuration
    pub fn validate(&self) -> AppResult<()> {
        let validate_words = |words: &[String], category: &str| -> AppResult<()> {
            if words.is_empty() {
                return Err(AppError::Config(format!("{} cannot be empty", category)));
            }
            for (i, word) in words.iter().enumerate() {
                if word.trim().is_empty() {
                    return Err(AppError::Config(format!(
                        "{}[{}] cannot be empty",
                        category, i
                    )));
                }
                if word.chars().any(|c| c.is_control()) {
                    return Err(AppError::Config(format!(
                        "{}[{}] '{}' contains control characters",
                        category, i, word
                    )));
                }
            }
            Ok(())
        };

        validate_words(&self.units, "units")?;
        validate_words(&self.preparation_words, "preparation_words")?;
        validate_words(&self.modifier_prefixes, "modifier_prefixes")?;
        validate_words(&self.stopwords, "stopwords")?;
        validate_words(&self.ingredient_headers, "ingredient_headers")?;
        validate_words(&self.instruction_headers, "instruction_headers")?;
        // extra_section_headers may legitimately be empty

        Ok(())
    }

    /// All section header keywords recognized while scanning the ingredients
    /// block (ingredients + instructions + extras)
    pub fn all_section_headers(&self) -> Vec<String> {
        let mut headers = Vec::new();
        headers.extend(self.ingredient_headers.iter().cloned());
        headers.extend(self.instruction_headers.iter().cloned());
        headers.extend(self.extra_section_headers.iter().cloned());
        headers
    }
}

/// Load vocabulary configuration from a JSON file
///
/// Tries `VOCABULARY_CONFIG_PATH` first, then a set of fallback paths, and
/// returns the built-in English defaults when no file is found or parseable.
pub fn load_vocabulary_config() -> VocabularyConfig {
    // First, try to get path from environment variable
    if let Ok(config_path) = std::env::var("VOCABULARY_CONFIG_PATH") {
        info!(
            "Loading vocabulary config from environment variable: {}",
            config_path
        );
        match fs::read_to_string(&config_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!("Successfully loaded vocabulary config from: {}", config_path);
                    return config;
                }
                Err(e) => {
                    warn!(
                        "Failed to parse vocabulary config from '{}': {}. Falling back to default paths.",
                        config_path, e
                    );
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read vocabulary config from '{}': {}. Falling back to default paths.",
                    config_path, e
                );
            }
        }
    }

    // Fallback to well-known paths
    let possible_paths = [
        "/app/config/vocabulary.json", // Docker path
        "config/vocabulary.json",      // Local development path
        "../config/vocabulary.json",   // Test path
    ];

    for config_path in &possible_paths {
        match fs::read_to_string(config_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(
                        "Successfully loaded vocabulary config from fallback path: {}",
                        config_path
                    );
                    return config;
                }
                Err(e) => {
                    warn!(
                        "Failed to parse vocabulary config at '{}': {}. Trying next path.",
                        config_path, e
                    );
                    continue;
                }
            },
            Err(_) => continue, // Try next path
        }
    }

    debug!("No vocabulary config file found, using built-in defaults");
    VocabularyConfig::default()
}
