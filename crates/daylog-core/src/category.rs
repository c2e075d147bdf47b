//! The fixed category table mapping short codes to display names.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

/// Codes and names of the standard table, in display order.
///
/// Downstream filtering and colouring key off these exact codes.
pub const STANDARD_CATEGORIES: [(&str, &str); 8] = [
    ("P", "Productive"),
    ("R", "Routine"),
    ("E", "Eat"),
    ("S", "Social"),
    ("W", "Workout"),
    ("F", "Fun"),
    ("GOD", "God"),
    ("LO", "Sleep"),
];

/// Name reported for codes missing from the table.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Code of the day-end (lights-out) category.
pub const SLEEP_CODE: &str = "LO";

/// Errors from building a custom category table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("category code cannot be empty")]
    EmptyCode,

    #[error("category {code} has an empty name")]
    EmptyName { code: String },

    #[error("duplicate category code: {0}")]
    DuplicateCode(String),
}

/// A single code/name pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub code: String,
    pub name: String,
}

/// An immutable, ordered mapping from category codes to names.
///
/// Passed by reference to everything that needs to resolve names; there is
/// no global instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    /// Builds a table from `(code, name)` pairs, keeping their order.
    pub fn new<I, C, N>(entries: I) -> Result<Self, CategoryError>
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut categories = Vec::new();
        for (code, name) in entries {
            let code = code.into();
            let name = name.into();
            if code.trim().is_empty() {
                return Err(CategoryError::EmptyCode);
            }
            if name.trim().is_empty() {
                return Err(CategoryError::EmptyName { code });
            }
            if !seen.insert(code.clone()) {
                return Err(CategoryError::DuplicateCode(code));
            }
            categories.push(Category { code, name });
        }
        Ok(Self { categories })
    }

    /// The standard `P, R, E, S, W, F, GOD, LO` table.
    pub fn standard() -> Self {
        let categories = STANDARD_CATEGORIES
            .iter()
            .map(|(code, name)| Category {
                code: (*code).to_string(),
                name: (*name).to_string(),
            })
            .collect();
        Self { categories }
    }

    /// Resolves a code to its name, or [`UNKNOWN_CATEGORY`].
    pub fn name_for(&self, code: &str) -> &str {
        self.get(code)
            .map_or(UNKNOWN_CATEGORY, |category| category.name.as_str())
    }

    pub fn get(&self, code: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.code == code)
    }

    /// Position of a code in display order.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|category| category.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_preserves_codes_and_order() {
        let table = CategoryTable::standard();
        let codes: Vec<_> = table.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["P", "R", "E", "S", "W", "F", "GOD", "LO"]);
        assert_eq!(table.name_for("GOD"), "God");
        assert_eq!(table.name_for(SLEEP_CODE), "Sleep");
        assert_eq!(table.position("S"), Some(3));
    }

    #[test]
    fn unknown_code_falls_back() {
        let table = CategoryTable::standard();
        assert_eq!(table.name_for("X"), "Unknown");
        // Codes are case-sensitive.
        assert_eq!(table.name_for("p"), "Unknown");
        assert_eq!(table.position("X"), None);
    }

    #[test]
    fn custom_table_validation() {
        let table = CategoryTable::new([("A", "Alpha"), ("B", "Beta")]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.name_for("B"), "Beta");

        assert_eq!(
            CategoryTable::new([("A", "Alpha"), ("A", "Again")]).unwrap_err(),
            CategoryError::DuplicateCode("A".to_string())
        );
        assert_eq!(
            CategoryTable::new([(" ", "Blank")]).unwrap_err(),
            CategoryError::EmptyCode
        );
        assert_eq!(
            CategoryTable::new([("A", "")]).unwrap_err().to_string(),
            "category A has an empty name"
        );
    }
}
