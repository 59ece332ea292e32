//! Bulk import/export of the full store as a JSON document.
//!
//! Export produces a pretty-printed JSON array, ordered as the store is and
//! with stable field order. Import accepts a user-supplied document that must
//! be a top-level array; every element is validated with the same rules as
//! `add` before anything is merged, so a failed import leaves the store
//! untouched.

use serde::Deserialize;
use thiserror::Error;

use quotary_types::{QuoteRecord, ValidationError};

use crate::persist::StorageError;
use crate::store::QuoteStore;

/// Import/export failures. Failed imports leave the store unchanged.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The document is not valid JSON, or an element has the wrong shape.
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The top-level value is not an array.
    #[error("expected a top-level array of quotes")]
    NotAnArray,

    /// An element failed quote validation.
    #[error("invalid record at index {index}: {source}")]
    InvalidRecord {
        /// Zero-based position of the offending element.
        index: usize,
        /// What the element got wrong.
        source: ValidationError,
    },

    /// Persisting the merged result failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Fields read from an import element; everything else is ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    text: String,
    #[serde(default)]
    category: String,
}

/// Serialize the full store as a human-readable JSON array.
pub fn export(store: &QuoteStore) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&store.all())?)
}

/// Merge a JSON document of quotes into the store.
///
/// Returns the number of records actually inserted (duplicates by dedup key
/// are skipped). The merged result is persisted when anything changed.
pub fn import(store: &QuoteStore, document: &str) -> Result<usize, CodecError> {
    let value: serde_json::Value = serde_json::from_str(document)?;
    let elements = value.as_array().ok_or(CodecError::NotAnArray)?;

    // Validate the whole document before merging anything.
    let mut candidates = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let raw: RawRecord = serde_json::from_value(element.clone())?;
        let record = QuoteRecord::new(&raw.text, &raw.category)
            .map_err(|source| CodecError::InvalidRecord { index, source })?;
        candidates.push(record);
    }

    let inserted = store.merge_insert(candidates);
    if inserted > 0 {
        store.persist()?;
    }
    Ok(inserted)
}
