//! Quote records and their validation rules.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A single quote: the text itself and the category it is filed under.
///
/// Both fields are trimmed and non-empty from the moment a record exists;
/// [`QuoteRecord::new`] is the validating constructor for raw input. Records
/// carry no identifier - duplicates are detected by [`QuoteRecord::dedup_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// The quote text.
    pub text: String,
    /// The category the quote is filed under.
    pub category: String,
}

impl QuoteRecord {
    /// Build a record from raw input, trimming both fields.
    ///
    /// Fails if either field is empty after trimming; nothing is constructed
    /// in that case.
    pub fn new(text: &str, category: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        Ok(Self {
            text: text.to_string(),
            category: category.to_string(),
        })
    }

    /// The key duplicates are detected by: the text, trimmed and lowercased.
    pub fn dedup_key(&self) -> String {
        dedup_key(&self.text)
    }
}

/// Normalize a text value into its dedup key.
pub fn dedup_key(text: &str) -> String {
    text.trim().to_lowercase()
}
