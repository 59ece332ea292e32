//! Category filtering.

use serde::{Deserialize, Serialize};

/// The sentinel string form of [`CategoryFilter::All`].
pub const ALL_FILTER: &str = "all";

/// A category filter: everything, or a single category matched
/// case-insensitively.
///
/// Serializes as a plain string - `"all"` or the category value - which is
/// also the persisted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// No filtering; every record matches.
    All,
    /// Only records in this category match.
    Category(String),
}

impl CategoryFilter {
    /// Parse a filter from its string form.
    ///
    /// `"all"` (any casing) and the empty string are the match-everything
    /// sentinel; anything else names a category.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_FILTER) {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    /// Whether a record in `category` passes this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => wanted.to_lowercase() == category.trim().to_lowercase(),
        }
    }

    /// The string form persisted and displayed: `"all"` or the category.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_FILTER,
            Self::Category(category) => category,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::All
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
