use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::category::CanonicalCategory;
use crate::core::types::CategoryId;

#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("Failed to read taxonomy: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse taxonomy: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate category id in taxonomy: {0}")]
    DuplicateId(CategoryId),

    #[error("Category '{0}' has an empty name")]
    EmptyName(CategoryId),

    #[error("Category id '{0}' is reserved for unmapped headings")]
    ReservedId(CategoryId),
}

/// Taxonomy format version for compatibility checking
pub const TAXONOMY_VERSION: &str = "1.0.0";

/// Serializable taxonomy format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyData {
    pub version: String,
    pub created_at: String,
    pub categories: Vec<CanonicalCategory>,
}

/// The ordered canonical category table.
///
/// Built once and then only read; the resolver and engine borrow it.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    /// All canonical categories in display order
    pub categories: Vec<CanonicalCategory>,

    /// Index: category id -> position in `categories`
    id_to_index: HashMap<CategoryId, usize>,
}

impl CategoryTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            id_to_index: HashMap::new(),
        }
    }

    /// Build a table from categories in display order
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::DuplicateId` or `TaxonomyError::EmptyName` for
    /// malformed entries.
    pub fn from_categories(
        categories: impl IntoIterator<Item = CanonicalCategory>,
    ) -> Result<Self, TaxonomyError> {
        let mut table = Self::new();
        for category in categories {
            table.add_category(category)?;
        }
        Ok(table)
    }

    /// Load the embedded default taxonomy
    pub fn load_embedded() -> Result<Self, TaxonomyError> {
        // Validated at compile time via build.rs
        const EMBEDDED_TAXONOMY: &str =
            include_str!("../../taxonomy/canonical_categories.json");
        Self::from_json(EMBEDDED_TAXONOMY)
    }

    /// Load a taxonomy from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, TaxonomyError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a taxonomy from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let data: TaxonomyData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != TAXONOMY_VERSION {
            tracing::warn!(
                "Taxonomy version mismatch (expected {}, found {})",
                TAXONOMY_VERSION,
                data.version
            );
        }

        Self::from_categories(data.categories)
    }

    /// Append a category at the end of the display order
    pub fn add_category(&mut self, category: CanonicalCategory) -> Result<(), TaxonomyError> {
        if category.name.trim().is_empty() {
            return Err(TaxonomyError::EmptyName(category.id));
        }
        if category.id.is_unknown() {
            return Err(TaxonomyError::ReservedId(category.id));
        }
        if self.id_to_index.contains_key(&category.id) {
            return Err(TaxonomyError::DuplicateId(category.id));
        }

        self.id_to_index
            .insert(category.id.clone(), self.categories.len());
        self.categories.push(category);
        Ok(())
    }

    /// Get a category by id
    pub fn get(&self, id: &CategoryId) -> Option<&CanonicalCategory> {
        self.id_to_index.get(id).map(|&idx| &self.categories[idx])
    }

    /// Display position of a category; `None` for ids outside the table
    pub fn position(&self, id: &CategoryId) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    /// Export the table to JSON
    pub fn to_json(&self) -> Result<String, TaxonomyError> {
        let data = TaxonomyData {
            version: TAXONOMY_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            categories: self.categories.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of categories in the table
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalCategory> {
        self.categories.iter()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_taxonomy() {
        let table = CategoryTable::load_embedded().unwrap();
        assert_eq!(table.len(), 12);
        assert_eq!(table.categories[0].id, CategoryId::new("preamble"));
        assert_eq!(table.categories[11].id, CategoryId::new("transitory"));
    }

    #[test]
    fn test_get_by_id() {
        let table = CategoryTable::load_embedded().unwrap();

        let judicial = table.get(&CategoryId::new("judicial"));
        assert!(judicial.is_some());
        assert_eq!(judicial.unwrap().name, "Judiciary");
        assert_eq!(table.position(&CategoryId::new("judicial")), Some(7));
    }

    #[test]
    fn test_get_nonexistent() {
        let table = CategoryTable::load_embedded().unwrap();
        assert!(table.get(&CategoryId::new("astrology")).is_none());
        assert!(table.position(&CategoryId::unknown()).is_none());
    }

    #[test]
    fn test_to_json_round_trips() {
        let table = CategoryTable::load_embedded().unwrap();
        let json = table.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"categories\""));
        assert!(json.contains("transitory"));

        let reloaded = CategoryTable::from_json(&json).unwrap();
        assert_eq!(reloaded.categories, table.categories);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = CategoryTable::from_categories([
            CanonicalCategory::new("a", "Alpha"),
            CanonicalCategory::new("a", "Again"),
        ]);
        assert!(matches!(result, Err(TaxonomyError::DuplicateId(_))));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = CategoryTable::from_categories([CanonicalCategory::new("a", "  ")]);
        assert!(matches!(result, Err(TaxonomyError::EmptyName(_))));
    }

    #[test]
    fn test_unknown_id_reserved() {
        let result = CategoryTable::from_categories([CanonicalCategory::new("unknown", "Other")]);
        assert!(matches!(result, Err(TaxonomyError::ReservedId(_))));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            CategoryTable::from_json("{not json"),
            Err(TaxonomyError::ParseError(_))
        ));
    }
}
