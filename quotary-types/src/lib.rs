//! # quotary-types
//!
//! Domain types for the quotary local-first quote store.
//!
//! This crate provides the foundational types used across all quotary crates:
//! - [`QuoteRecord`] - a quote and its category, validated on construction
//! - [`CategoryFilter`] - the "all"-or-one-category filter
//! - [`ValidationError`] - rejected quote input

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod filter;
mod record;

pub use error::ValidationError;
pub use filter::{CategoryFilter, ALL_FILTER};
pub use record::{dedup_key, QuoteRecord};
