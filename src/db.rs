use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::Row;
use tracing::{debug, info};

use crate::catalog::{CanonicalIngredient, InMemoryCatalog};

/// Represents a recipe in the database
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub servings: i32,
    pub source_url: String,
    pub created_at: DateTime<Utc>,
}

/// Represents an ingredient row linked into a recipe
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredient {
    pub id: i64,
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub quantity: Option<f64>,
    pub unit: String,
    pub preparation: String,
    pub position: i32,
}

/// Initialize the database schema
pub async fn init_database_schema(pool: &PgPool) -> Result<()> {
    info!("Initializing database schema");

    // Create ingredients catalog table
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS ingredients (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) UNIQUE NOT NULL,
            default_unit VARCHAR(50),
            created_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create ingredients table")?;

    // Create recipes table
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS recipes (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            instructions TEXT NOT NULL DEFAULT '',
            prep_time_minutes INTEGER,
            cook_time_minutes INTEGER,
            servings INTEGER NOT NULL DEFAULT 4,
            source_url TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create recipes table")?;

    // Create recipe_ingredients link table
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS recipe_ingredients (
            id BIGSERIAL PRIMARY KEY,
            recipe_id BIGINT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            ingredient_id BIGINT NOT NULL REFERENCES ingredients(id),
            quantity DOUBLE PRECISION,
            unit VARCHAR(50) NOT NULL DEFAULT '',
            preparation VARCHAR(255) NOT NULL DEFAULT '',
            position INTEGER NOT NULL DEFAULT 0
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create recipe_ingredients table")?;

    // Create indexes for performance
    sqlx::query("CREATE INDEX IF NOT EXISTS ingredients_name_lower_idx ON ingredients (LOWER(name))")
        .execute(pool)
        .await
        .context("Failed to create ingredients name index")?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS recipe_ingredients_recipe_id_idx ON recipe_ingredients(recipe_id)",
    )
    .execute(pool)
    .await
    .context("Failed to create recipe_ingredients recipe_id index")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Create a new canonical ingredient in the catalog
pub async fn create_ingredient(
    pool: &PgPool,
    name: &str,
    default_unit: Option<&str>,
) -> Result<i64> {
    debug!(name = %name, "Creating new ingredient");

    let row =
        sqlx::query("INSERT INTO ingredients (name, default_unit) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(default_unit)
            .fetch_one(pool)
            .await
            .context("Failed to insert new ingredient")?;

    let ingredient_id: i64 = row.get(0);
    debug!(ingredient_id = %ingredient_id, "Ingredient created successfully");

    Ok(ingredient_id)
}

/// Read a canonical ingredient by ID
pub async fn read_ingredient(pool: &PgPool, ingredient_id: i64) -> Result<Option<CanonicalIngredient>> {
    debug!(ingredient_id = %ingredient_id, "Reading ingredient");

    let row = sqlx::query("SELECT id, name, default_unit FROM ingredients WHERE id = $1")
        .bind(ingredient_id)
        .fetch_optional(pool)
        .await
        .context("Failed to read ingredient")?;

    Ok(row.map(|row| CanonicalIngredient {
        id: row.get(0),
        name: row.get(1),
        default_unit: row.get(2),
    }))
}

/// Find a canonical ingredient by case-insensitive exact name
pub async fn find_ingredient_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<CanonicalIngredient>> {
    debug!(name = %name, "Finding ingredient by name");

    let row =
        sqlx::query("SELECT id, name, default_unit FROM ingredients WHERE LOWER(name) = LOWER($1)")
            .bind(name)
            .fetch_optional(pool)
            .await
            .context("Failed to find ingredient by name")?;

    Ok(row.map(|row| CanonicalIngredient {
        id: row.get(0),
        name: row.get(1),
        default_unit: row.get(2),
    }))
}

/// List catalog ingredients in insertion order, up to a limit
pub async fn list_ingredients(pool: &PgPool, limit: i64) -> Result<Vec<CanonicalIngredient>> {
    debug!(limit = %limit, "Listing ingredients");

    let rows = sqlx::query("SELECT id, name, default_unit FROM ingredients ORDER BY id LIMIT $1")
        .bind(limit)
        .fetch_all(pool)
        .await
        .context("Failed to list ingredients")?;

    let ingredients: Vec<CanonicalIngredient> = rows
        .into_iter()
        .map(|row| CanonicalIngredient {
            id: row.get(0),
            name: row.get(1),
            default_unit: row.get(2),
        })
        .collect();

    debug!("Found {} ingredients", ingredients.len());
    Ok(ingredients)
}

/// Search catalog ingredients by name substring, ordered by name
///
/// Queries shorter than two characters return nothing.
pub async fn search_ingredients(
    pool: &PgPool,
    query: &str,
    limit: i64,
) -> Result<Vec<CanonicalIngredient>> {
    if query.chars().count() < 2 {
        return Ok(Vec::new());
    }

    debug!(query = %query, "Searching ingredients");

    let pattern = format!("%{}%", query);
    let rows = sqlx::query(
        "SELECT id, name, default_unit FROM ingredients WHERE name ILIKE $1 ORDER BY name LIMIT $2",
    )
    .bind(&pattern)
    .bind(limit)
    .fetch_all(pool)
    .await
    .context("Failed to search ingredients")?;

    Ok(rows
        .into_iter()
        .map(|row| CanonicalIngredient {
            id: row.get(0),
            name: row.get(1),
            default_unit: row.get(2),
        })
        .collect())
}

/// Load the full catalog into an in-memory snapshot for the matcher
///
/// The matcher is synchronous by design; one snapshot per import attempt
/// keeps its catalog view consistent and its scoring reproducible.
pub async fn load_catalog_snapshot(pool: &PgPool) -> Result<InMemoryCatalog> {
    let rows = sqlx::query("SELECT id, name, default_unit FROM ingredients ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to load ingredient catalog")?;

    let entries: Vec<CanonicalIngredient> = rows
        .into_iter()
        .map(|row| CanonicalIngredient {
            id: row.get(0),
            name: row.get(1),
            default_unit: row.get(2),
        })
        .collect();

    info!("Loaded catalog snapshot with {} ingredients", entries.len());
    Ok(InMemoryCatalog::new(entries))
}

/// Create a new recipe row
#[allow(clippy::too_many_arguments)]
pub async fn create_recipe(
    pool: &PgPool,
    name: &str,
    description: &str,
    instructions: &str,
    prep_time_minutes: Option<i32>,
    cook_time_minutes: Option<i32>,
    servings: i32,
    source_url: &str,
) -> Result<i64> {
    debug!(name = %name, "Creating new recipe");

    let row = sqlx::query(
        "INSERT INTO recipes (name, description, instructions, prep_time_minutes, cook_time_minutes, servings, source_url)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
    )
    .bind(name)
    .bind(description)
    .bind(instructions)
    .bind(prep_time_minutes)
    .bind(cook_time_minutes)
    .bind(servings)
    .bind(source_url)
    .fetch_one(pool)
    .await
    .context("Failed to insert new recipe")?;

    let recipe_id: i64 = row.get(0);
    debug!(recipe_id = %recipe_id, "Recipe created successfully");

    Ok(recipe_id)
}

/// Read a recipe from the database by ID
pub async fn read_recipe(pool: &PgPool, recipe_id: i64) -> Result<Option<Recipe>> {
    debug!(recipe_id = %recipe_id, "Reading recipe");

    let row = sqlx::query(
        "SELECT id, name, description, instructions, prep_time_minutes, cook_time_minutes, servings, source_url, created_at
         FROM recipes WHERE id = $1",
    )
    .bind(recipe_id)
    .fetch_optional(pool)
    .await
    .context("Failed to read recipe")?;

    Ok(row.map(|row| Recipe {
        id: row.get(0),
        name: row.get(1),
        description: row.get(2),
        instructions: row.get(3),
        prep_time_minutes: row.get(4),
        cook_time_minutes: row.get(5),
        servings: row.get(6),
        source_url: row.get(7),
        created_at: row.get(8),
    }))
}

/// Link an ingredient into a recipe's ingredient list
pub async fn add_recipe_ingredient(
    pool: &PgPool,
    recipe_id: i64,
    ingredient_id: i64,
    quantity: Option<f64>,
    unit: &str,
    preparation: &str,
    position: i32,
) -> Result<i64> {
    debug!(recipe_id = %recipe_id, ingredient_id = %ingredient_id, "Adding recipe ingredient");

    let row = sqlx::query(
        "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity, unit, preparation, position)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(recipe_id)
    .bind(ingredient_id)
    .bind(quantity)
    .bind(unit)
    .bind(preparation)
    .bind(position)
    .fetch_one(pool)
    .await
    .context("Failed to insert recipe ingredient")?;

    Ok(row.get(0))
}

/// List a recipe's ingredient rows in display order
pub async fn list_recipe_ingredients(
    pool: &PgPool,
    recipe_id: i64,
) -> Result<Vec<RecipeIngredient>> {
    debug!(recipe_id = %recipe_id, "Listing recipe ingredients");

    let rows = sqlx::query(
        "SELECT id, recipe_id, ingredient_id, quantity, unit, preparation, position
         FROM recipe_ingredients WHERE recipe_id = $1 ORDER BY position",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
    .context("Failed to list recipe ingredients")?;

    Ok(rows
        .into_iter()
        .map(|row| RecipeIngredient {
            id: row.get(0),
            recipe_id: row.get(1),
            ingredient_id: row.get(2),
            quantity: row.get(3),
            unit: row.get(4),
            preparation: row.get(5),
            position: row.get(6),
        })
        .collect())
}
