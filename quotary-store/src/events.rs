//! Store change events.
//!
//! Presentation layers subscribe to these instead of registering callbacks
//! on the store; a slow or absent subscriber never blocks a store operation.

use quotary_types::{CategoryFilter, QuoteRecord};

/// A change to store state.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A record was appended via `add`.
    Added(QuoteRecord),
    /// A merge inserted this many new records.
    Merged {
        /// Number of records the merge inserted.
        inserted: usize,
    },
    /// The persisted category filter changed.
    FilterChanged(CategoryFilter),
}
