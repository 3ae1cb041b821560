//! # Ingredient Line Parser
//!
//! Parses a single raw ingredient line into quantity, unit, name and
//! preparation components using an ordered regex cascade.
//!
//! ## Parsing pipeline
//!
//! Each step consumes a prefix or suffix of the remaining text and never
//! re-scans what an earlier step committed to:
//!
//! 1. Strip a leading bullet glyph or numbered-list marker
//! 2. Extract the quantity (integer, decimal, fraction, mixed number or
//!    range), keeping its literal textual form
//! 3. Extract one unit token from the configured unit vocabulary
//! 4. Extract the preparation: a trailing parenthetical, or trailing comma
//!    text that contains a known preparation word
//! 5. Whatever remains, trimmed, is the ingredient name
//!
//! The cascade is greedy-first and non-backtracking: once a step commits to a
//! match it does not reconsider, even if a later step would have produced a
//! "better" overall parse. If nothing is recognized the whole cleaned line
//! becomes the name and parsing never fails.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

use crate::errors::AppResult;
use crate::vocabulary::{load_vocabulary_config, VocabularyConfig};

/// A parsed ingredient line, produced once per input line and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredientLine {
    /// The original line exactly as supplied
    pub raw_text: String,
    /// Quantity in its original textual form (e.g. "2", "1 1/2", "1 - 2")
    pub quantity: Option<String>,
    /// Lower-cased unit token from the unit vocabulary
    pub unit: Option<String>,
    /// Remaining text after quantity/unit/preparation were stripped
    pub name: String,
    /// Preparation text (e.g. "diced", "minced")
    pub preparation: Option<String>,
}

lazy_static! {
    /// Leading bullet glyphs
    static ref BULLET_RE: Regex =
        Regex::new(r"^[-*•◦▪▸►]\s*").expect("bullet pattern should be valid");
    /// Leading numbered-list markers ("1. "); whitespace after the dot is
    /// required so decimal quantities like "2.5" survive
    static ref NUMBERED_RE: Regex =
        Regex::new(r"^\d+\.\s+").expect("numbered-list pattern should be valid");
    /// Leading quantity: integer, decimal, simple fraction, mixed number or
    /// numeric range, captured literally
    static ref QUANTITY_RE: Regex =
        Regex::new(r"^(\d+(?:\s+\d+)?(?:[/.]\d+)?(?:\s*-\s*\d+(?:[/.]\d+)?)?)\s*")
            .expect("quantity pattern should be valid");
    /// Trailing parenthetical preparation, e.g. "(minced)"
    static ref PAREN_PREP_RE: Regex =
        Regex::new(r"\(([^)]+)\)\s*$").expect("parenthetical pattern should be valid");
    /// Trailing comma segment that may be a preparation
    static ref COMMA_PREP_RE: Regex =
        Regex::new(r",\s*([\w\s]+)$").expect("comma pattern should be valid");
    /// Default vocabulary, loaded once
    static ref DEFAULT_VOCABULARY: VocabularyConfig = load_vocabulary_config();
    /// Default unit regex compiled once from the default vocabulary
    static ref DEFAULT_UNIT_REGEX: Regex =
        Regex::new(&build_unit_pattern(&DEFAULT_VOCABULARY.units))
            .expect("default unit pattern should be valid");
}

/// Build the unit-matching regex pattern from a unit vocabulary
///
/// Units are deduplicated, sorted longest-first (so "cups" wins over "cup" and
/// "kilograms" over "kg"-style prefixes), regex-escaped and joined into a
/// case-insensitive anchored alternation. A unit must be followed by
/// whitespace, which keeps bare trailing tokens ("2 cups") in the name.
fn build_unit_pattern(units: &[String]) -> String {
    let unique_units: HashSet<&String> = units.iter().collect();
    let mut sorted_units: Vec<&String> = unique_units.into_iter().collect();

    // Sort by length descending, then alphabetically for consistency
    sorted_units.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let escaped_units: Vec<String> = sorted_units
        .into_iter()
        .map(|unit| regex::escape(unit))
        .collect();

    format!(r"(?i)^({})\s+", escaped_units.join("|"))
}

/// Ingredient line parser with a compiled unit pattern and preparation
/// vocabulary
pub struct IngredientLineParser {
    /// Compiled anchored unit alternation
    unit_pattern: Regex,
    /// Lower-cased preparation words gating the trailing-comma step
    preparation_words: Vec<String>,
}

impl IngredientLineParser {
    /// Create a parser from the default (or file-loaded) vocabulary
    pub fn new() -> Self {
        Self {
            unit_pattern: DEFAULT_UNIT_REGEX.clone(),
            preparation_words: DEFAULT_VOCABULARY
                .preparation_words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }

    /// Create a parser from an explicit vocabulary
    pub fn from_vocabulary(vocabulary: &VocabularyConfig) -> AppResult<Self> {
        vocabulary.validate()?;

        let pattern = Regex::new(&build_unit_pattern(&vocabulary.units)).map_err(|e| {
            crate::errors::AppError::Config(format!("invalid unit vocabulary: {}", e))
        })?;

        Ok(Self {
            unit_pattern: pattern,
            preparation_words: vocabulary
                .preparation_words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        })
    }

    /// Parse one raw ingredient line into its components
    ///
    /// Never fails: when nothing is recognizable the quantity, unit and
    /// preparation stay empty and the cleaned line becomes the name.
    pub fn parse_line(&self, line: &str) -> ParsedIngredientLine {
        let raw_text = line.to_string();
        let mut rest = line.trim();

        // Step 1: strip list decorations
        if let Some(m) = BULLET_RE.find(rest) {
            rest = &rest[m.end()..];
        }
        if let Some(m) = NUMBERED_RE.find(rest) {
            rest = &rest[m.end()..];
        }

        // Step 2: quantity, kept in its literal textual form. Fraction
        // normalization happens downstream at creation time, not here.
        let mut quantity = None;
        if let Some(cap) = QUANTITY_RE.captures(rest) {
            let full = cap.get(0).expect("full match is always present");
            let qty = cap.get(1).expect("quantity group is always present");
            quantity = Some(qty.as_str().trim().to_string());
            rest = &rest[full.end()..];
        }

        // Step 3: unit, immediately after the quantity (or at line start)
        let mut unit = None;
        if let Some(cap) = self.unit_pattern.captures(rest) {
            let full = cap.get(0).expect("full match is always present");
            let u = cap.get(1).expect("unit group is always present");
            unit = Some(u.as_str().to_lowercase());
            rest = &rest[full.end()..];
        }

        // Step 4a: trailing parenthetical preparation
        let mut preparation = None;
        if let Some(cap) = PAREN_PREP_RE.captures(rest) {
            let full = cap.get(0).expect("full match is always present");
            let prep = cap.get(1).expect("preparation group is always present");
            preparation = Some(prep.as_str().trim().to_string());
            rest = rest[..full.start()].trim_end();
        }

        // Step 4b: trailing comma text, only when it contains a known
        // preparation word; otherwise the comma text stays in the name
        if preparation.is_none() {
            if let Some(cap) = COMMA_PREP_RE.captures(rest) {
                let full = cap.get(0).expect("full match is always present");
                let prep_text = cap
                    .get(1)
                    .expect("preparation group is always present")
                    .as_str()
                    .trim();
                let prep_lower = prep_text.to_lowercase();
                if self.preparation_words.iter().any(|pw| prep_lower.contains(pw)) {
                    preparation = Some(prep_text.to_string());
                    rest = rest[..full.start()].trim_end();
                } else {
                    trace!(
                        "Comma text '{}' has no preparation word, keeping it in the name",
                        prep_text
                    );
                }
            }
        }

        // Step 5: remainder is the name
        let parsed = ParsedIngredientLine {
            raw_text,
            quantity,
            unit,
            name: rest.trim().to_string(),
            preparation,
        };

        debug!(
            quantity = ?parsed.quantity,
            unit = ?parsed.unit,
            name = %parsed.name,
            preparation = ?parsed.preparation,
            "Parsed ingredient line"
        );

        parsed
    }

    /// The compiled unit pattern, exposed for diagnostics
    pub fn unit_pattern_str(&self) -> &str {
        self.unit_pattern.as_str()
    }
}

impl Default for IngredientLineParser {
    fn default() -> Self {
        Self::new()
    }
}
