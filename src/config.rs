//! # Unified Application Configuration
//!
//! Centralized configuration for the import pipeline: database connection
//! settings, matcher thresholds and parsing vocabularies, loaded from
//! environment variables with sensible defaults and validated before use.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::matcher::MatcherConfig;
use crate::vocabulary::{load_vocabulary_config, VocabularyConfig};

/// Database configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// An empty URL is allowed: the pipeline runs without persistence (the
    /// CLI falls back to an empty in-memory catalog).
    pub fn validate(&self) -> AppResult<()> {
        if !self.url.is_empty()
            && !self.url.starts_with("postgresql://")
            && !self.url.starts_with("postgres://")
        {
            return Err(AppError::Config(
                "DATABASE_URL must start with 'postgresql://' or 'postgres://'".to_string(),
            ));
        }

        if self.max_connections == 0 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS cannot be 0".to_string(),
            ));
        }

        if self.max_connections > 100 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS cannot be greater than 100".to_string(),
            ));
        }

        if self.connect_timeout_secs == 0 {
            return Err(AppError::Config(
                "DATABASE_CONNECT_TIMEOUT_SECS cannot be 0".to_string(),
            ));
        }

        if self.connect_timeout_secs > 300 {
            return Err(AppError::Config(
                "DATABASE_CONNECT_TIMEOUT_SECS cannot be greater than 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub matcher: MatcherConfig,
    pub vocabulary: VocabularyConfig,
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> AppResult<Self> {
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_default(),
            max_connections: parse_env_var("DATABASE_MAX_CONNECTIONS", 10)?,
            connect_timeout_secs: parse_env_var("DATABASE_CONNECT_TIMEOUT_SECS", 30)?,
        };

        let matcher = MatcherConfig {
            confidence_threshold: parse_env_var("MATCHER_CONFIDENCE_THRESHOLD", 0.7)?,
            suggestion_floor: parse_env_var("MATCHER_SUGGESTION_FLOOR", 0.3)?,
            max_suggestions: parse_env_var("MATCHER_MAX_SUGGESTIONS", 5)?,
            search_candidate_limit: parse_env_var("MATCHER_SEARCH_CANDIDATE_LIMIT", 20)?,
            fallback_scan_limit: parse_env_var("MATCHER_FALLBACK_SCAN_LIMIT", 100)?,
            word_overlap_weight: parse_env_var("MATCHER_WORD_OVERLAP_WEIGHT", 0.9)?,
        };

        let config = Self {
            database,
            matcher,
            vocabulary: load_vocabulary_config(),
        };

        config.validate()?;
        debug!("Application configuration loaded from environment");
        Ok(config)
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> AppResult<()> {
        self.database.validate()?;
        self.matcher.validate()?;
        self.vocabulary.validate()?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            matcher: MatcherConfig::default(),
            vocabulary: VocabularyConfig::default(),
        }
    }
}

fn parse_env_var<T: std::str::FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: '{}'", key, value))),
        Err(_) => Ok(default),
    }
}
