//! # Recipe Text Segmenter
//!
//! Splits a pasted recipe blob into title, ingredients and instructions
//! sections, extracts prep/cook time and servings from the header area, and
//! runs the ingredient line parser over the ingredients body.
//!
//! The expected input is the loosely-structured "Ingredients: / Instructions:"
//! format common on food blogs. The only failure mode is empty input;
//! everything else degrades gracefully to partial or empty fields.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::line_parser::{IngredientLineParser, ParsedIngredientLine};
use crate::vocabulary::{load_vocabulary_config, VocabularyConfig};

/// A structured recipe produced from one import attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecipe {
    /// Recipe title (first non-empty line)
    pub name: String,
    /// Free-text description; the pasted-text path leaves this empty
    pub description: String,
    /// Newline-joined instruction steps, metadata lines excluded
    pub instructions: String,
    /// Parsed ingredient lines in original order
    pub ingredient_lines: Vec<ParsedIngredientLine>,
    /// Preparation time in minutes, when stated in the header area
    pub prep_time_minutes: Option<i32>,
    /// Cooking time in minutes, when stated in the header area
    pub cook_time_minutes: Option<i32>,
    /// Servings, when stated in the header area
    pub servings: Option<i32>,
}

/// Keywords anchoring prep-time extraction in the header blob
const PREP_TIME_KEYWORDS: [&str; 2] = ["prep", "preparation"];
/// Keywords anchoring cook-time extraction in the header blob
const COOK_TIME_KEYWORDS: [&str; 2] = ["cook", "cooking"];

lazy_static! {
    /// Lines that look like metadata (time, servings, yield) and are excluded
    /// from the instructions body
    static ref METADATA_RES: Vec<Regex> = [
        r"prep\s*time",
        r"cook\s*time",
        r"total\s*time",
        r"serves?\s*\d",
        r"servings?\s*:",
        r"yield\s*:",
        r"makes?\s*\d",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("metadata pattern should be valid"))
    .collect();
    static ref SERVINGS_RES: Vec<Regex> = [
        r"(?i)(?:serves?|servings?|yield|makes?)\s*[:\s]*(\d+)",
        r"(?i)(\d+)\s*(?:servings?|portions?)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("servings pattern should be valid"))
    .collect();
}

/// Recipe text segmenter owning a line parser and the section header
/// keyword sets
pub struct RecipeTextSegmenter {
    parser: IngredientLineParser,
    /// Lower-cased keywords opening the ingredients section
    ingredient_headers: Vec<String>,
    /// Lower-cased keywords opening the instructions section
    instruction_headers: Vec<String>,
    /// Every recognized section header, for skipping headers inside bodies
    all_headers: Vec<String>,
}

impl RecipeTextSegmenter {
    /// Create a segmenter from the default (or file-loaded) vocabulary
    pub fn new() -> Self {
        let vocabulary = load_vocabulary_config();
        Self {
            parser: IngredientLineParser::new(),
            ingredient_headers: lowercase_all(&vocabulary.ingredient_headers),
            instruction_headers: lowercase_all(&vocabulary.instruction_headers),
            all_headers: lowercase_all(&vocabulary.all_section_headers()),
        }
    }

    /// Create a segmenter from an explicit vocabulary
    pub fn from_vocabulary(vocabulary: &VocabularyConfig) -> AppResult<Self> {
        Ok(Self {
            parser: IngredientLineParser::from_vocabulary(vocabulary)?,
            ingredient_headers: lowercase_all(&vocabulary.ingredient_headers),
            instruction_headers: lowercase_all(&vocabulary.instruction_headers),
            all_headers: lowercase_all(&vocabulary.all_section_headers()),
        })
    }

    /// Parse unstructured recipe text into structured fields
    ///
    /// Expected format (flexible): title on the first non-empty line, an
    /// "Ingredients:" section followed by the ingredient list, an
    /// "Instructions:"/"Directions:" section followed by steps, and optional
    /// prep/cook time and servings near the top.
    ///
    /// Fails only when the input is empty or whitespace-only.
    pub fn parse_recipe_text(&self, raw_text: &str) -> AppResult<ParsedRecipe> {
        let lines: Vec<&str> = raw_text
            .trim()
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(AppError::Parsing("No text provided".to_string()));
        }

        // Title is the first line before any section header
        let name = lines[0].to_string();

        let ingredients_start = find_section(&lines, &self.ingredient_headers);
        let instructions_start = find_section(&lines, &self.instruction_headers);
        debug!(
            ?ingredients_start,
            ?instructions_start,
            line_count = lines.len(),
            "Located section headers"
        );

        // Ingredients body: lines strictly between the two headers
        let mut ingredient_lines: Vec<ParsedIngredientLine> = Vec::new();
        if let Some(start) = ingredients_start {
            let end = instructions_start.unwrap_or(lines.len());
            for line in lines
                .iter()
                .skip(start + 1)
                .take(end.saturating_sub(start + 1))
            {
                if self.is_ingredient_line(line) {
                    ingredient_lines.push(self.parser.parse_line(line));
                }
            }
        }

        // Instructions body: everything after the header, minus metadata lines
        let mut instructions = String::new();
        if let Some(start) = instructions_start {
            let body: Vec<&str> = lines
                .iter()
                .skip(start + 1)
                .filter(|line| !is_metadata_line(line))
                .copied()
                .collect();
            instructions = body.join("\n");
        }

        // Times and servings live in the header area, before the ingredients
        let header_end = ingredients_start.unwrap_or(lines.len());
        let header_text = lines[..header_end.min(10)].join(" ");
        let prep_time_minutes = extract_time(&header_text, &PREP_TIME_KEYWORDS);
        let cook_time_minutes = extract_time(&header_text, &COOK_TIME_KEYWORDS);
        let servings = extract_servings(&header_text);

        // Fallback: no header-bounded ingredients found, scan every line after
        // the title for something that looks like an ingredient
        if ingredient_lines.is_empty() {
            debug!("No ingredients section found, falling back to line scan");
            for line in lines.iter().skip(1) {
                if looks_like_ingredient(line) {
                    ingredient_lines.push(self.parser.parse_line(line));
                }
            }
        }

        info!(
            recipe_name = %name,
            ingredient_count = ingredient_lines.len(),
            has_instructions = !instructions.is_empty(),
            "Segmented recipe text"
        );

        Ok(ParsedRecipe {
            name,
            description: String::new(),
            instructions,
            ingredient_lines,
            prep_time_minutes,
            cook_time_minutes,
            servings,
        })
    }

    /// Check that a line in the ingredients body is an ingredient and not a
    /// stray section header or noise
    fn is_ingredient_line(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        let normalized = lower.trim_end_matches(':').trim();
        if self.all_headers.iter().any(|h| h == normalized) {
            return false;
        }
        line.chars().count() > 2
    }
}

impl Default for RecipeTextSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

/// Find the line index where a section starts (first occurrence wins)
///
/// A line matches a keyword case-insensitively, ignoring trailing colons, or
/// when it starts with `"<keyword>:"` (e.g. "Ingredients: 2 cups flour").
fn find_section(lines: &[&str], keywords: &[String]) -> Option<usize> {
    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        let normalized = lower.trim_end_matches(':').trim();
        for kw in keywords {
            if normalized == kw.as_str() || normalized.starts_with(&format!("{}:", kw)) {
                return Some(i);
            }
        }
    }
    None
}

/// Check whether a line looks like metadata (time, servings, yield)
fn is_metadata_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    METADATA_RES.iter().any(|re| re.is_match(&lower))
}

/// Check whether a line looks like an ingredient: starts with a digit or a
/// bullet glyph
fn looks_like_ingredient(line: &str) -> bool {
    match line.chars().next() {
        Some(c) => c.is_ascii_digit() || "-*•◦▪▸►".contains(c),
        None => false,
    }
}

/// Extract a time in minutes from text near the given keywords
///
/// Values stated in hours are converted to minutes.
fn extract_time(text: &str, keywords: &[&str]) -> Option<i32> {
    for kw in keywords {
        let patterns = [
            (
                format!(r"(?i){}\s*(?:time)?[\s:]*(\d+)\s*(?:minutes?|mins?|m)\b", kw),
                1,
            ),
            (
                format!(r"(?i){}\s*(?:time)?[\s:]*(\d+)\s*(?:hours?|hrs?|h)\b", kw),
                60,
            ),
            (format!(r"(?i)(\d+)\s*(?:minutes?|mins?|m)\s*{}", kw), 1),
        ];
        for (pattern, multiplier) in &patterns {
            let re = Regex::new(pattern).expect("time pattern should be valid");
            if let Some(cap) = re.captures(text) {
                // Absurd values that overflow the minutes conversion are
                // treated as unparseable rather than panicking
                let minutes = cap
                    .get(1)
                    .and_then(|m| m.as_str().parse::<i32>().ok())
                    .and_then(|value| value.checked_mul(*multiplier));
                if let Some(minutes) = minutes {
                    return Some(minutes);
                }
            }
        }
    }
    None
}

/// Extract a servings count from text
fn extract_servings(text: &str) -> Option<i32> {
    for re in SERVINGS_RES.iter() {
        if let Some(cap) = re.captures(text) {
            if let Some(value) = cap.get(1).and_then(|m| m.as_str().parse::<i32>().ok()) {
                return Some(value);
            }
        }
    }
    None
}
