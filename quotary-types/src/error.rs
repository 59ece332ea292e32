//! Validation errors for quote input.

use thiserror::Error;

/// Rejected quote input. The store is unchanged when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The quote text was empty after trimming.
    #[error("quote text is empty")]
    EmptyText,

    /// The category was empty after trimming.
    #[error("quote category is empty")]
    EmptyCategory,
}
