//! # Recipe Import Orchestration
//!
//! Thin coordination layer over the segmenter, line parser and matcher:
//! builds a confirmation preview from pasted text or a scraped-site payload,
//! and materializes confirmed matches into catalog and recipe records.
//!
//! Network fetching and HTML scraping are not done here; a scraping
//! collaborator hands over a [`ScrapedRecipe`] payload and this module accepts
//! whatever partial data it recovered (including an empty ingredient list)
//! without failing.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPool;
use tracing::{debug, info};

use crate::catalog::{CanonicalIngredient, IngredientCatalog};
use crate::db;
use crate::errors::AppResult;
use crate::line_parser::IngredientLineParser;
use crate::matcher::{IngredientMatch, IngredientMatcher, MatcherConfig};
use crate::segmenter::{ParsedRecipe, RecipeTextSegmenter};
use crate::vocabulary::VocabularyConfig;

/// Recipe payload recovered by a URL-scraping collaborator
///
/// Ingredients arrive as raw strings; everything else is metadata the scraper
/// could or could not recover. All fields may be partial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedRecipe {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
}

/// Parsed recipe plus per-line match results, presented to the user for
/// confirmation before anything is persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPreview {
    pub recipe: ParsedRecipe,
    pub matches: Vec<IngredientMatch>,
}

/// One confirmed ingredient choice from the preview UI
///
/// Either an existing catalog entry (`ingredient_id`) or a name for a new one
/// (`create_name`); quantity/unit/preparation carry the user's adjustments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientSelection {
    pub ingredient_id: Option<i64>,
    pub create_name: Option<String>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub preparation: Option<String>,
}

/// Recipe fields confirmed for creation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub source_url: String,
}

/// Coordinates segmentation, line parsing and matching into import previews
pub struct RecipeImporter {
    segmenter: RecipeTextSegmenter,
    parser: IngredientLineParser,
    matcher: IngredientMatcher,
}

impl RecipeImporter {
    /// Create an importer with default configuration and vocabulary
    pub fn new() -> Self {
        Self {
            segmenter: RecipeTextSegmenter::new(),
            parser: IngredientLineParser::new(),
            matcher: IngredientMatcher::new(),
        }
    }

    /// Create an importer with explicit matcher configuration and vocabulary
    pub fn with_config(config: MatcherConfig, vocabulary: &VocabularyConfig) -> AppResult<Self> {
        Ok(Self {
            segmenter: RecipeTextSegmenter::from_vocabulary(vocabulary)?,
            parser: IngredientLineParser::from_vocabulary(vocabulary)?,
            matcher: IngredientMatcher::with_config(config, vocabulary)?,
        })
    }

    /// Build an import preview from pasted recipe text
    ///
    /// Fails only when the text is empty or whitespace-only.
    pub fn preview_from_text(
        &self,
        raw_text: &str,
        catalog: &dyn IngredientCatalog,
    ) -> AppResult<ImportPreview> {
        let recipe = self.segmenter.parse_recipe_text(raw_text)?;
        let matches = self.matcher.match_ingredients(&recipe.ingredient_lines, catalog);

        info!(
            recipe_name = %recipe.name,
            ingredient_count = recipe.ingredient_lines.len(),
            "Built import preview from pasted text"
        );

        Ok(ImportPreview { recipe, matches })
    }

    /// Build an import preview from a scraped-site payload
    ///
    /// Each raw ingredient string goes through the line parser, then the whole
    /// batch through the matcher. Never fails; a payload with no ingredients
    /// simply previews with no matches.
    pub fn preview_from_scraped(
        &self,
        scraped: &ScrapedRecipe,
        catalog: &dyn IngredientCatalog,
    ) -> ImportPreview {
        let ingredient_lines = scraped
            .ingredients
            .iter()
            .map(|line| self.parser.parse_line(line))
            .collect::<Vec<_>>();
        let matches = self.matcher.match_ingredients(&ingredient_lines, catalog);

        info!(
            recipe_name = %scraped.name,
            ingredient_count = ingredient_lines.len(),
            "Built import preview from scraped payload"
        );

        ImportPreview {
            recipe: ParsedRecipe {
                name: scraped.name.clone(),
                description: scraped.description.clone(),
                instructions: scraped.instructions.clone(),
                ingredient_lines,
                prep_time_minutes: scraped.prep_time_minutes,
                cook_time_minutes: scraped.cook_time_minutes,
                servings: scraped.servings,
            },
            matches,
        }
    }
}

impl Default for RecipeImporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a textual quantity into a numeric value at creation time
///
/// Handles mixed numbers ("1 1/2"), simple fractions ("1/2") and plain
/// numbers ("2", "1.5"). Anything unparseable (including ranges, which have
/// no single numeric value) and zero denominators yield `None`. Parse time
/// keeps the literal text; this is the only place quantities become numbers.
pub fn parse_quantity_value(quantity: &str) -> Option<f64> {
    let quantity = quantity.trim();

    if quantity.contains(' ') && quantity.contains('/') {
        // Mixed number like "1 1/2"
        let (whole_str, fraction_str) = quantity.split_once(' ')?;
        let whole: f64 = whole_str.trim().parse().ok()?;
        let (numerator_str, denominator_str) = fraction_str.trim().split_once('/')?;
        let numerator: f64 = numerator_str.trim().parse().ok()?;
        let denominator: f64 = denominator_str.trim().parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        Some(whole + numerator / denominator)
    } else if quantity.contains('/') {
        // Simple fraction like "1/2"
        let (numerator_str, denominator_str) = quantity.split_once('/')?;
        let numerator: f64 = numerator_str.trim().parse().ok()?;
        let denominator: f64 = denominator_str.trim().parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        Some(numerator / denominator)
    } else {
        quantity.parse().ok()
    }
}

/// Title-case an ingredient name for catalog creation ("olive oil" →
/// "Olive Oil", "extra-virgin" → "Extra-Virgin")
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut at_word_start = true;

    for ch in name.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }

    result
}

/// Materialize a confirmed import: create the recipe, reuse or create catalog
/// ingredients, and link them in original order with the user-adjusted fields
///
/// Selections with neither an existing ingredient nor a creation name are
/// skipped. Servings default to 4 when absent.
pub async fn create_recipe_from_import(
    pool: &PgPool,
    recipe: &NewRecipe,
    selections: &[IngredientSelection],
) -> Result<i64> {
    let recipe_id = db::create_recipe(
        pool,
        &recipe.name,
        &recipe.description,
        &recipe.instructions,
        recipe.prep_time_minutes,
        recipe.cook_time_minutes,
        recipe.servings.unwrap_or(4),
        &recipe.source_url,
    )
    .await?;

    for (position, selection) in selections.iter().enumerate() {
        let mut ingredient: Option<CanonicalIngredient> = None;

        if let Some(ingredient_id) = selection.ingredient_id {
            ingredient = db::read_ingredient(pool, ingredient_id).await?;
        }

        if ingredient.is_none() {
            if let Some(create_name) = &selection.create_name {
                let name = title_case(create_name.trim());
                let id = db::create_ingredient(pool, &name, selection.unit.as_deref()).await?;
                debug!(ingredient_id = %id, name = %name, "Created new catalog ingredient");
                ingredient = Some(CanonicalIngredient {
                    id,
                    name,
                    default_unit: selection.unit.clone(),
                });
            }
        }

        if let Some(ingredient) = ingredient {
            let quantity = selection.quantity.as_deref().and_then(parse_quantity_value);
            db::add_recipe_ingredient(
                pool,
                recipe_id,
                ingredient.id,
                quantity,
                selection.unit.as_deref().unwrap_or(""),
                selection.preparation.as_deref().unwrap_or(""),
                position as i32,
            )
            .await?;
        }
    }

    info!(
        recipe_id = %recipe_id,
        ingredient_count = selections.len(),
        "Recipe import materialized"
    );
    Ok(recipe_id)
}
