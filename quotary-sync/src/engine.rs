//! The synchronization engine.
//!
//! Reconciles the local store with the remote source. `pull` merges new
//! remote items into the store; the remote is additive-only and
//! authoritative for new items, and local data is never removed. `push`
//! uploads the full store and mutates nothing locally.
//!
//! At most one sync (pull or push) is in flight at a time; a trigger
//! arriving while one is active is dropped, not queued. Failures are caught
//! at the engine boundary and surfaced through the notifier; the engine
//! stays usable on the next trigger.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;

use quotary_store::{codec, CodecError, QuoteStore, StorageError};
use quotary_types::QuoteRecord;

use crate::notify::Notifier;
use crate::remote::{RemoteError, RemoteItem, RemoteSource};

/// Category assigned to remote items that arrive without one.
pub const IMPORTED_CATEGORY: &str = "Imported";

/// Engine tuning.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Interval between scheduled pulls.
    pub interval: Duration,
    /// Maximum number of remote items mapped per pull.
    pub pull_limit: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            pull_limit: 10,
        }
    }
}

/// What a sync trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Pull merged this many new records into the store.
    Changed {
        /// Number of records inserted.
        inserted: usize,
    },
    /// The sync completed without changing local state.
    Unchanged,
    /// Another sync was in flight; this trigger was dropped.
    Skipped,
    /// The sync failed; the error was reported via notification.
    Failed,
}

/// Sync failures, caught at the engine boundary and never propagated to
/// triggers.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote request failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Serializing the store for upload failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Persisting merged records failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Orchestrates reconciliation between the store and a remote source.
pub struct SyncEngine<R: RemoteSource> {
    store: Arc<QuoteStore>,
    remote: R,
    notifier: Notifier,
    options: SyncOptions,
    in_flight: Mutex<()>,
}

impl<R: RemoteSource> SyncEngine<R> {
    /// Create an engine over a store and remote.
    pub fn new(store: Arc<QuoteStore>, remote: R, notifier: Notifier, options: SyncOptions) -> Self {
        Self {
            store,
            remote,
            notifier,
            options,
            in_flight: Mutex::new(()),
        }
    }

    /// The store this engine reconciles.
    pub fn store(&self) -> &Arc<QuoteStore> {
        &self.store
    }

    /// The notification channel outcomes are reported through.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// The engine's tuning.
    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Fetch the remote list and merge new items into the store.
    ///
    /// Persists only when something was inserted. Every failure is reported
    /// through the notifier and swallowed here.
    pub async fn pull(&self) -> SyncOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            tracing::debug!("sync already in flight, dropping pull trigger");
            return SyncOutcome::Skipped;
        };

        match self.pull_inner().await {
            Ok(0) => {
                self.notifier.publish("Already up to date with remote");
                SyncOutcome::Unchanged
            }
            Ok(inserted) => {
                tracing::info!("pull merged {} new quote(s)", inserted);
                self.notifier
                    .publish(format!("Synced {inserted} new quote(s) from remote"));
                SyncOutcome::Changed { inserted }
            }
            Err(e) => {
                tracing::warn!("pull failed: {}", e);
                self.notifier.publish(format!("Sync failed: {e}"));
                SyncOutcome::Failed
            }
        }
    }

    async fn pull_inner(&self) -> Result<usize, SyncError> {
        let items = self.remote.fetch().await?;
        let candidates = map_remote_items(items, self.options.pull_limit);
        let inserted = self.store.merge_insert(candidates);
        if inserted > 0 {
            self.store.persist()?;
        }
        Ok(inserted)
    }

    /// Upload the full store to the remote. Local state is never mutated.
    pub async fn push(&self) -> SyncOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            tracing::debug!("sync already in flight, dropping push trigger");
            return SyncOutcome::Skipped;
        };

        match self.push_inner().await {
            Ok(count) => {
                tracing::info!("pushed {} quote(s) to remote", count);
                self.notifier
                    .publish(format!("Uploaded {count} quote(s) to remote"));
                SyncOutcome::Unchanged
            }
            Err(e) => {
                tracing::warn!("push failed: {}", e);
                self.notifier.publish(format!("Upload failed: {e}"));
                SyncOutcome::Failed
            }
        }
    }

    async fn push_inner(&self) -> Result<usize, SyncError> {
        let body = codec::export(&self.store)?;
        self.remote.upload(body).await?;
        Ok(self.store.len())
    }
}

/// Map loosely-typed remote items into quote records.
///
/// Takes the first `limit` items. An item with no usable title is skipped;
/// a missing or blank category falls back to [`IMPORTED_CATEGORY`].
fn map_remote_items(items: Vec<RemoteItem>, limit: usize) -> Vec<QuoteRecord> {
    items
        .into_iter()
        .take(limit)
        .filter_map(|item| {
            let text = item.title?;
            let category = item
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| IMPORTED_CATEGORY.to_string());
            QuoteRecord::new(&text, &category).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MockRemote;
    use quotary_store::{MemoryStorage, Persistence};
    use std::sync::Arc;

    fn test_engine(remote: MockRemote) -> SyncEngine<MockRemote> {
        let store = Arc::new(QuoteStore::open(Persistence::in_memory()).unwrap());
        SyncEngine::new(store, remote, Notifier::new(), SyncOptions::default())
    }

    // ===========================================
    // Item Mapping Tests
    // ===========================================

    #[test]
    fn mapping_tags_missing_category_as_imported() {
        let records = map_remote_items(vec![RemoteItem::titled("hello")], 10);
        assert_eq!(records[0].category, IMPORTED_CATEGORY);
    }

    #[test]
    fn mapping_keeps_remote_category() {
        let records = map_remote_items(vec![RemoteItem::categorized("hello", "Wisdom")], 10);
        assert_eq!(records[0].category, "Wisdom");
    }

    #[test]
    fn mapping_blank_category_falls_back() {
        let records = map_remote_items(vec![RemoteItem::categorized("hello", "  ")], 10);
        assert_eq!(records[0].category, IMPORTED_CATEGORY);
    }

    #[test]
    fn mapping_skips_items_without_text() {
        let records = map_remote_items(
            vec![
                RemoteItem::default(),
                RemoteItem::titled("   "),
                RemoteItem::titled("kept"),
            ],
            10,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "kept");
    }

    #[test]
    fn mapping_takes_only_the_first_n() {
        let items: Vec<_> = (0..20).map(|i| RemoteItem::titled(&format!("q{i}"))).collect();
        let records = map_remote_items(items, 10);
        assert_eq!(records.len(), 10);
        assert_eq!(records[9].text, "q9");
    }

    // ===========================================
    // Pull Tests
    // ===========================================

    #[tokio::test]
    async fn pull_merges_new_remote_items() {
        // Store holds one quote; the remote serves it back plus a new one.
        let remote = MockRemote::new();
        remote.set_items(vec![
            RemoteItem::titled("Motivation text"),
            RemoteItem::titled("New one"),
        ]);
        let engine = test_engine(remote);
        engine
            .store()
            .add("Motivation text", "Motivation")
            .unwrap();

        let outcome = engine.pull().await;

        assert_eq!(outcome, SyncOutcome::Changed { inserted: 1 });
        let records = engine.store().all();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text, "New one");
        assert_eq!(records[1].category, IMPORTED_CATEGORY);
        assert!(engine
            .notifier()
            .current()
            .is_some_and(|m| m.contains("1 new")));
    }

    #[tokio::test]
    async fn pull_is_idempotent_against_unchanged_remote() {
        let remote = MockRemote::new();
        remote.set_items(vec![RemoteItem::titled("a"), RemoteItem::titled("b")]);
        let engine = test_engine(remote);

        assert_eq!(engine.pull().await, SyncOutcome::Changed { inserted: 2 });
        assert_eq!(engine.pull().await, SyncOutcome::Unchanged);
        assert_eq!(engine.store().len(), 2);
    }

    #[tokio::test]
    async fn pull_dedups_case_insensitively() {
        let remote = MockRemote::new();
        remote.set_items(vec![RemoteItem::titled("Hello")]);
        let engine = test_engine(remote);
        engine.store().add("hello", "Local").unwrap();

        let outcome = engine.pull().await;

        assert_eq!(outcome, SyncOutcome::Unchanged);
        assert_eq!(engine.store().len(), 1);
    }

    #[tokio::test]
    async fn pull_respects_pull_limit() {
        let remote = MockRemote::new();
        remote.set_items((0..50).map(|i| RemoteItem::titled(&format!("q{i}"))).collect());
        let store = Arc::new(QuoteStore::open(Persistence::in_memory()).unwrap());
        let engine = SyncEngine::new(
            store,
            remote,
            Notifier::new(),
            SyncOptions {
                pull_limit: 5,
                ..SyncOptions::default()
            },
        );

        engine.pull().await;

        assert_eq!(engine.store().len(), 5);
    }

    #[tokio::test]
    async fn pull_persists_when_changed() {
        let durable = Arc::new(MemoryStorage::new());
        let persistence = Persistence::new(durable.clone(), Arc::new(MemoryStorage::new()));
        let store = Arc::new(QuoteStore::open(persistence.clone()).unwrap());
        let remote = MockRemote::new();
        remote.set_items(vec![RemoteItem::titled("persist me")]);
        let engine = SyncEngine::new(store, remote, Notifier::new(), SyncOptions::default());

        engine.pull().await;

        let reopened = QuoteStore::open(persistence).unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[tokio::test]
    async fn pull_failure_is_reported_not_propagated() {
        let remote = MockRemote::new();
        remote.set_items(vec![RemoteItem::titled("later")]);
        remote.fail_next_fetch("network unreachable");
        let engine = test_engine(remote);

        let outcome = engine.pull().await;

        assert_eq!(outcome, SyncOutcome::Failed);
        assert!(engine.store().is_empty());
        assert!(engine
            .notifier()
            .current()
            .is_some_and(|m| m.contains("failed")));

        // Engine is usable on the next trigger.
        assert_eq!(engine.pull().await, SyncOutcome::Changed { inserted: 1 });
    }

    // ===========================================
    // Push Tests
    // ===========================================

    #[tokio::test]
    async fn push_uploads_full_export() {
        let remote = MockRemote::new();
        let engine = test_engine(remote.clone());
        engine.store().add("first", "A").unwrap();
        engine.store().add("second", "B").unwrap();

        let outcome = engine.push().await;

        assert_eq!(outcome, SyncOutcome::Unchanged);
        let uploads = remote.uploads();
        assert_eq!(uploads.len(), 1);
        let sent: Vec<QuoteRecord> = serde_json::from_str(&uploads[0]).unwrap();
        assert_eq!(sent, engine.store().all());
    }

    #[tokio::test]
    async fn push_does_not_mutate_local_state() {
        let remote = MockRemote::new();
        let engine = test_engine(remote);
        engine.store().add("only", "A").unwrap();
        let before = engine.store().all();

        engine.push().await;

        assert_eq!(engine.store().all(), before);
    }

    #[tokio::test]
    async fn push_failure_is_reported_not_propagated() {
        let remote = MockRemote::new();
        remote.fail_next_upload("503");
        let engine = test_engine(remote.clone());
        engine.store().add("kept", "A").unwrap();

        let outcome = engine.push().await;

        assert_eq!(outcome, SyncOutcome::Failed);
        assert!(engine
            .notifier()
            .current()
            .is_some_and(|m| m.contains("failed")));

        // Next trigger works.
        assert_eq!(engine.push().await, SyncOutcome::Unchanged);
        assert_eq!(remote.uploads().len(), 1);
    }

    // ===========================================
    // Mutual Exclusion Tests
    // ===========================================

    #[tokio::test(start_paused = true)]
    async fn overlapping_trigger_is_dropped() {
        let remote = MockRemote::new();
        remote.set_items(vec![RemoteItem::titled("slow")]);
        remote.set_fetch_delay(Duration::from_secs(10));
        let engine = Arc::new(test_engine(remote.clone()));

        let first = tokio::spawn({
            let engine = Arc::clone(&engine);
            async move { engine.pull().await }
        });
        // Let the first pull reach its network call.
        tokio::task::yield_now().await;
        assert_eq!(remote.fetch_calls(), 1);

        // A second trigger while one is in flight: no-op, no network call.
        assert_eq!(engine.pull().await, SyncOutcome::Skipped);
        assert_eq!(engine.push().await, SyncOutcome::Skipped);
        assert_eq!(remote.fetch_calls(), 1);
        assert_eq!(remote.upload_calls(), 0);

        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(first.await.unwrap(), SyncOutcome::Changed { inserted: 1 });
        assert_eq!(engine.store().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_after_completion_runs_again() {
        let remote = MockRemote::new();
        remote.set_items(vec![RemoteItem::titled("one")]);
        remote.set_fetch_delay(Duration::from_secs(1));
        let engine = Arc::new(test_engine(remote.clone()));

        let first = tokio::spawn({
            let engine = Arc::clone(&engine);
            async move { engine.pull().await }
        });
        tokio::time::advance(Duration::from_secs(1)).await;
        first.await.unwrap();

        let second = tokio::spawn({
            let engine = Arc::clone(&engine);
            async move { engine.pull().await }
        });
        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(second.await.unwrap(), SyncOutcome::Unchanged);
        assert_eq!(remote.fetch_calls(), 2);
    }
}
