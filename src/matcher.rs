//! # Ingredient Matcher
//!
//! Resolves parsed ingredient names against the canonical ingredient catalog:
//! exact match first, then fuzzy and partial-word matching, producing
//! confidence-scored suggestions for human confirmation.
//!
//! This is a best-effort, recall-oriented linear scan over catalog candidates,
//! not an index-backed search. That is acceptable because catalogs are
//! household-scale (tens to low thousands of rows), and it keeps the scoring
//! (especially the word-overlap component) exactly reproducible. Do not
//! silently upgrade to an index; the match semantics are load-bearing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

use crate::catalog::{CanonicalIngredient, IngredientCatalog};
use crate::errors::{AppError, AppResult};
use crate::line_parser::ParsedIngredientLine;
use crate::similarity::similarity_ratio;
use crate::vocabulary::{load_vocabulary_config, VocabularyConfig};

/// A parsed line resolved against the catalog, one per input line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientMatch {
    /// The original ingredient line text
    pub raw_text: String,
    /// Quantity as parsed, in its literal textual form
    pub parsed_quantity: Option<String>,
    /// Unit as parsed (lower-cased)
    pub parsed_unit: Option<String>,
    /// Name as parsed, before modifier stripping
    pub parsed_name: String,
    /// Preparation as parsed
    pub parsed_preparation: Option<String>,
    /// The confidently-matched catalog entry, if any
    pub matched_ingredient: Option<CanonicalIngredient>,
    /// Confidence in `[0, 1]`; exactly 1.0 only for case-insensitive exact
    /// name matches
    pub match_confidence: f64,
    /// Candidates above the suggestion floor, highest-confidence first
    pub suggested_ingredients: Vec<CanonicalIngredient>,
    /// True exactly when `matched_ingredient` is absent; the UI should offer
    /// to create a new catalog entry
    pub needs_creation: bool,
}

/// Tunable thresholds and caps for ingredient matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum score for a candidate to become the matched ingredient
    pub confidence_threshold: f64,
    /// Candidates must score strictly above this to be suggested
    pub suggestion_floor: f64,
    /// Maximum number of suggestions kept per line
    pub max_suggestions: usize,
    /// Cap on substring/word candidates gathered from the catalog
    pub search_candidate_limit: usize,
    /// Rows scanned when the candidate search comes back empty. An arbitrary
    /// but deterministic bound; tunable, not load-bearing.
    pub fallback_scan_limit: usize,
    /// Weight applied to the word-overlap score before combining with the
    /// similarity ratio
    pub word_overlap_weight: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.7,
            suggestion_floor: 0.3,
            max_suggestions: 5,
            search_candidate_limit: 20,
            fallback_scan_limit: 100,
            word_overlap_weight: 0.9,
        }
    }
}

impl MatcherConfig {
    /// Validate matcher configuration parameters
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(AppError::Config(
                "confidence_threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.suggestion_floor) {
            return Err(AppError::Config(
                "suggestion_floor must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.suggestion_floor > self.confidence_threshold {
            return Err(AppError::Config(
                "suggestion_floor cannot be greater than confidence_threshold".to_string(),
            ));
        }

        if self.max_suggestions == 0 {
            return Err(AppError::Config(
                "max_suggestions must be greater than 0".to_string(),
            ));
        }

        if self.search_candidate_limit == 0 {
            return Err(AppError::Config(
                "search_candidate_limit must be greater than 0".to_string(),
            ));
        }

        if self.fallback_scan_limit == 0 {
            return Err(AppError::Config(
                "fallback_scan_limit must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.word_overlap_weight) {
            return Err(AppError::Config(
                "word_overlap_weight must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Matches parsed ingredient names against the canonical catalog
pub struct IngredientMatcher {
    config: MatcherConfig,
    /// Leading modifier words stripped before matching, in vocabulary order
    modifier_prefixes: Vec<String>,
    /// Words skipped when collecting significant words
    stopwords: HashSet<String>,
}

impl IngredientMatcher {
    /// Create a matcher with default thresholds and the default vocabulary
    pub fn new() -> Self {
        let vocabulary = load_vocabulary_config();
        Self {
            config: MatcherConfig::default(),
            modifier_prefixes: vocabulary
                .modifier_prefixes
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            stopwords: vocabulary
                .stopwords
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }

    /// Create a matcher with explicit configuration and vocabulary
    pub fn with_config(config: MatcherConfig, vocabulary: &VocabularyConfig) -> AppResult<Self> {
        config.validate()?;
        vocabulary.validate()?;

        Ok(Self {
            config,
            modifier_prefixes: vocabulary
                .modifier_prefixes
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            stopwords: vocabulary
                .stopwords
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        })
    }

    /// Match parsed ingredient lines against the catalog, one result per
    /// input line, order preserved
    ///
    /// Never fails: an empty catalog simply yields `needs_creation` results
    /// with confidence 0.0 and no suggestions.
    pub fn match_ingredients(
        &self,
        parsed: &[ParsedIngredientLine],
        catalog: &dyn IngredientCatalog,
    ) -> Vec<IngredientMatch> {
        parsed
            .iter()
            .map(|line| self.match_one(line, catalog))
            .collect()
    }

    fn match_one(
        &self,
        parsed: &ParsedIngredientLine,
        catalog: &dyn IngredientCatalog,
    ) -> IngredientMatch {
        let name = parsed.name.clone();
        let cleaned = self.clean_ingredient_name(&name);

        // Exact match first: confidence is exactly 1.0 only here
        if let Some(exact) = catalog.find_exact(&cleaned) {
            debug!(name = %name, matched = %exact.name, "Exact catalog match");
            return IngredientMatch {
                raw_text: parsed.raw_text.clone(),
                parsed_quantity: parsed.quantity.clone(),
                parsed_unit: parsed.unit.clone(),
                parsed_name: name,
                parsed_preparation: parsed.preparation.clone(),
                matched_ingredient: Some(exact.clone()),
                match_confidence: 1.0,
                suggested_ingredients: vec![exact],
                needs_creation: false,
            };
        }

        // Gather candidates by substring or significant-word equality, with a
        // bounded full scan as the last resort
        let words = self.significant_words(&cleaned);
        let mut candidates = catalog.search(&cleaned, &words, self.config.search_candidate_limit);
        if candidates.is_empty() {
            candidates = catalog.list_all(self.config.fallback_scan_limit);
        }
        trace!(
            name = %cleaned,
            candidate_count = candidates.len(),
            "Scoring catalog candidates"
        );

        // Score: max of the similarity ratio and the weighted word overlap
        let name_words: HashSet<&str> = cleaned.split_whitespace().collect();
        let mut scored: Vec<(CanonicalIngredient, f64)> = candidates
            .into_iter()
            .map(|candidate| {
                let candidate_lower = candidate.name.to_lowercase();
                let ratio = similarity_ratio(&cleaned, &candidate_lower);

                let candidate_words: HashSet<&str> = candidate_lower.split_whitespace().collect();
                let common = name_words.intersection(&candidate_words).count();
                let word_score = common as f64 / name_words.len().max(1) as f64;

                let score = ratio.max(word_score * self.config.word_overlap_weight);
                (candidate, score)
            })
            .collect();

        // Stable sort: ties keep catalog order deterministic
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let top_matches: Vec<(CanonicalIngredient, f64)> = scored
            .into_iter()
            .take(self.config.max_suggestions)
            .collect();

        let best_score = top_matches.first().map(|(_, score)| *score).unwrap_or(0.0);
        let matched_ingredient = top_matches
            .first()
            .filter(|(_, score)| *score >= self.config.confidence_threshold)
            .map(|(candidate, _)| candidate.clone());

        let suggested_ingredients: Vec<CanonicalIngredient> = top_matches
            .iter()
            .filter(|(_, score)| *score > self.config.suggestion_floor)
            .map(|(candidate, _)| candidate.clone())
            .collect();

        debug!(
            name = %name,
            best_score = best_score,
            matched = ?matched_ingredient.as_ref().map(|m| m.name.as_str()),
            suggestion_count = suggested_ingredients.len(),
            "Fuzzy catalog match"
        );

        let needs_creation = matched_ingredient.is_none();
        IngredientMatch {
            raw_text: parsed.raw_text.clone(),
            parsed_quantity: parsed.quantity.clone(),
            parsed_unit: parsed.unit.clone(),
            parsed_name: name,
            parsed_preparation: parsed.preparation.clone(),
            matched_ingredient,
            match_confidence: best_score,
            suggested_ingredients,
            needs_creation,
        }
    }

    /// Clean an ingredient name for matching: lower-case, then strip leading
    /// modifier words in vocabulary order
    fn clean_ingredient_name(&self, name: &str) -> String {
        let mut cleaned = name.to_lowercase().trim().to_string();

        for modifier in &self.modifier_prefixes {
            let prefix = format!("{} ", modifier);
            if let Some(stripped) = cleaned.strip_prefix(&prefix) {
                cleaned = stripped.to_string();
            }
        }

        cleaned.trim().to_string()
    }

    /// Individual words of the cleaned name that might match catalog entries:
    /// longer than two characters and not a stopword
    fn significant_words(&self, cleaned: &str) -> Vec<String> {
        cleaned
            .split_whitespace()
            .filter(|word| word.chars().count() > 2 && !self.stopwords.contains(*word))
            .map(|word| word.to_string())
            .collect()
    }
}

impl Default for IngredientMatcher {
    fn default() -> Self {
        Self::new()
    }
}
