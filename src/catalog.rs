//! # Ingredient Catalog Access
//!
//! Read-only access to the canonical ingredient catalog, expressed as a trait
//! so the matcher stays a pure synchronous text transformation. The database
//! layer materializes an [`InMemoryCatalog`] snapshot (see
//! `db::load_catalog_snapshot`); tests and the offline CLI path build one
//! directly.

use serde::{Deserialize, Serialize};

/// A deduplicated, catalog-level ingredient entity (e.g. "Garlic"), distinct
/// from any one recipe's phrasing of it ("2 cloves garlic, minced")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalIngredient {
    pub id: i64,
    /// Unique display name
    pub name: String,
    /// Preferred unit when the recipe line does not state one
    pub default_unit: Option<String>,
}

/// Lookup/search capability over the canonical ingredient catalog
pub trait IngredientCatalog {
    /// Case-insensitive full-string name match
    fn find_exact(&self, name: &str) -> Option<CanonicalIngredient>;

    /// Entries whose name contains `substring` (case-insensitive), or whose
    /// name equals one of `words` (case-insensitive), up to `limit`
    fn search(&self, substring: &str, words: &[String], limit: usize) -> Vec<CanonicalIngredient>;

    /// The first `limit` entries in deterministic catalog order
    fn list_all(&self, limit: usize) -> Vec<CanonicalIngredient>;
}

/// Catalog held in memory with a stable entry order
///
/// Serves as the snapshot form of the database catalog: the import
/// orchestrator loads all rows once per import and hands the matcher this
/// synchronous view.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: Vec<CanonicalIngredient>,
}

impl InMemoryCatalog {
    pub fn new(entries: Vec<CanonicalIngredient>) -> Self {
        Self { entries }
    }

    /// An empty catalog; every match degrades to needs-creation
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CanonicalIngredient] {
        &self.entries
    }
}

impl IngredientCatalog for InMemoryCatalog {
    fn find_exact(&self, name: &str) -> Option<CanonicalIngredient> {
        let needle = name.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.name.to_lowercase() == needle)
            .cloned()
    }

    fn search(&self, substring: &str, words: &[String], limit: usize) -> Vec<CanonicalIngredient> {
        let needle = substring.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                let name = entry.name.to_lowercase();
                name.contains(&needle) || words.iter().any(|word| &name == word)
            })
            .take(limit)
            .cloned()
            .collect()
    }

    fn list_all(&self, limit: usize) -> Vec<CanonicalIngredient> {
        self.entries.iter().take(limit).cloned().collect()
    }
}
