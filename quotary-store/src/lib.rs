//! # quotary-store
//!
//! Persistent quote storage for quotary.
//!
//! The centerpiece is [`QuoteStore`]: an ordered, mutex-guarded collection of
//! quote records that routes all durability through a pluggable persistence
//! adapter and publishes changes as [`StoreEvent`]s. The [`codec`] module
//! serializes the full store to and from a JSON document for bulk transfer.
//!
//! Store and persistence operations are synchronous and never suspend; async
//! callers (the sync engine) invoke them between awaits.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod events;
pub mod persist;
pub mod store;

pub use codec::CodecError;
pub use events::StoreEvent;
pub use persist::{FileStorage, MemoryStorage, Persistence, Storage, StorageError};
pub use store::{QuoteStore, StoreError, LAST_QUOTE_KEY, QUOTES_KEY, SELECTED_CATEGORY_KEY};
