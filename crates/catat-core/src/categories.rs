//! Category normalization table
//!
//! Maps free-text tokens (Indonesian and English synonyms) to canonical
//! [`Category`] values. The table is configuration data, not code:
//!
//! 1. An override file (explicit path, or `CATAT_CATEGORIES`), if present
//! 2. Embedded defaults compiled into the binary (`config/categories.toml`)
//!
//! Lookup is an exact match on the lower-cased token; anything unknown
//! falls back to `Lain-lain`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::Category;

/// Embedded default table (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/categories.toml");

/// Raw config file shape
#[derive(Debug, Deserialize)]
struct TableConfig {
    tokens: HashMap<String, String>,
}

/// Token-to-category normalization table
#[derive(Debug, Clone)]
pub struct CategoryTable {
    map: HashMap<String, Category>,
}

impl CategoryTable {
    /// Load the table, preferring an override file over the embedded default
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_path {
            let raw = fs::read_to_string(path)?;
            return Self::from_toml(&raw);
        }
        if let Ok(path) = std::env::var("CATAT_CATEGORIES") {
            let raw = fs::read_to_string(&path)?;
            return Self::from_toml(&raw);
        }
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Parse a table from TOML text
    ///
    /// Every value must name a canonical category; a typo in the config is
    /// a startup error, not a silent fallback.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: TableConfig = toml::from_str(raw)?;
        let mut map = HashMap::new();
        for (token, category) in config.tokens {
            let category: Category = category.parse().map_err(Error::InvalidData)?;
            map.insert(token.to_lowercase(), category);
        }
        Ok(Self { map })
    }

    /// Normalize a token to a canonical category
    ///
    /// Total over all strings: no match means `LainLain`.
    pub fn normalize(&self, token: &str) -> Category {
        self.map
            .get(&token.to_lowercase())
            .copied()
            .unwrap_or(Category::LainLain)
    }

    /// Number of tokens in the table
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_table() -> CategoryTable {
        CategoryTable::from_toml(DEFAULT_CONFIG).unwrap()
    }

    #[test]
    fn test_default_table_assignments() {
        let table = default_table();
        let expected = [
            ("makanan", Category::Makanan),
            ("ayam", Category::Makanan),
            ("food", Category::Makanan),
            ("minuman", Category::Minuman),
            ("kopi", Category::Minuman),
            ("drink", Category::Minuman),
            ("belanja", Category::BelanjaOnline),
            ("online", Category::BelanjaOnline),
            ("shopping", Category::BelanjaOnline),
            ("transportasi", Category::Transportasi),
            ("transport", Category::Transportasi),
            ("hiburan", Category::Hiburan),
            ("entertainment", Category::Hiburan),
            ("tagihan", Category::Tagihan),
            ("bills", Category::Tagihan),
        ];
        assert_eq!(table.len(), expected.len());
        for (token, category) in expected {
            assert_eq!(table.normalize(token), category, "token {}", token);
        }
    }

    #[test]
    fn test_unknown_token_falls_back() {
        let table = default_table();
        assert_eq!(table.normalize("groceries"), Category::LainLain);
        assert_eq!(table.normalize(""), Category::LainLain);
        assert_eq!(table.normalize("makanan2"), Category::LainLain);
    }

    #[test]
    fn test_normalize_is_case_insensitive() {
        let table = default_table();
        assert_eq!(table.normalize("Makanan"), Category::Makanan);
        assert_eq!(table.normalize("KOPI"), Category::Minuman);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let table = default_table();
        assert_eq!(table.normalize("kopi"), table.normalize("kopi"));
    }

    #[test]
    fn test_custom_table_from_toml() {
        let table = CategoryTable::from_toml(
            r#"
            [tokens]
            nasi = "Makanan"
            teh = "Minuman"
            "#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.normalize("nasi"), Category::Makanan);
        assert_eq!(table.normalize("kopi"), Category::LainLain);
    }

    #[test]
    fn test_bad_category_value_is_an_error() {
        let result = CategoryTable::from_toml(
            r#"
            [tokens]
            nasi = "Groceries"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(CategoryTable::from_toml("tokens = nonsense").is_err());
    }
}
