use anyhow::{Context, Result};
use mealplan_import::catalog::InMemoryCatalog;
use mealplan_import::config::AppConfig;
use mealplan_import::db;
use mealplan_import::errors::error_logging;
use mealplan_import::import::RecipeImporter;
use sqlx::postgres::PgPool;
use std::env;
use std::io::Read;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Read the recipe text: from the file given as the first argument, or from
/// stdin when no argument is present
fn read_input() -> Result<String> {
    match env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read '{}'", path))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read recipe text from stdin")?;
            Ok(text)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error_logging::log_config_error(&e, "environment", "load");
            return Err(anyhow::anyhow!(e));
        }
    };

    // Load the catalog from Postgres when configured; otherwise match against
    // an empty catalog (every line comes back needs-creation)
    let catalog = if config.database.url.is_empty() {
        warn!("DATABASE_URL not set, matching against an empty catalog");
        InMemoryCatalog::empty()
    } else {
        info!("Initializing database connection");
        let pool = match PgPool::connect(&config.database.url).await {
            Ok(pool) => pool,
            Err(e) => {
                error_logging::log_database_error(&e, "connect", None);
                return Err(e).context("Failed to connect to database");
            }
        };
        db::init_database_schema(&pool).await?;
        db::load_catalog_snapshot(&pool).await?
    };

    let text = read_input()?;

    let importer = RecipeImporter::with_config(config.matcher.clone(), &config.vocabulary)
        .map_err(|e| anyhow::anyhow!(e))?;
    let preview = match importer.preview_from_text(&text, &catalog) {
        Ok(preview) => preview,
        Err(e) => {
            error_logging::log_import_error(&e, "preview_from_text", None, None);
            return Err(anyhow::anyhow!(e));
        }
    };

    println!("{}", serde_json::to_string_pretty(&preview)?);

    Ok(())
}
