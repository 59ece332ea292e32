//! # quotary-sync
//!
//! Remote synchronization for the quotary quote store.
//!
//! The [`SyncEngine`] reconciles the local [`quotary_store::QuoteStore`] with
//! an opaque remote source behind the [`RemoteSource`] seam:
//!
//! ```text
//! Scheduler / UI trigger → SyncEngine → RemoteSource → HTTP
//!                              ↓
//!                         QuoteStore (merge + persist)
//! ```
//!
//! The merge policy is one-directional: the remote is additive-only and
//! authoritative for new items, and local data is never removed by sync.
//! Outcomes reach the user through the single-slot [`Notifier`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod notify;
pub mod remote;
pub mod scheduler;

pub use engine::{SyncEngine, SyncError, SyncOptions, SyncOutcome, IMPORTED_CATEGORY};
pub use notify::{Notifier, DISPLAY_TTL};
pub use remote::{HttpRemote, MockRemote, RemoteError, RemoteItem, RemoteSource};
pub use scheduler::{spawn_periodic_pull, SchedulerHandle};
