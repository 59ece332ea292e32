//! The quote store: an ordered, deduplicating collection of quote records
//! backed by the persistence adapter.
//!
//! The store exclusively owns its collection. External callers hold an
//! `Arc<QuoteStore>` and go through its operations; nothing outside ever
//! mutates the collection directly. All operations are synchronous and
//! non-suspending, guarded by a mutex held only for the duration of a call.

use std::collections::HashSet;
use std::sync::Mutex;

use rand::seq::SliceRandom;
use thiserror::Error;
use tokio::sync::broadcast;

use quotary_types::{CategoryFilter, QuoteRecord, ValidationError};

use crate::events::StoreEvent;
use crate::persist::{Persistence, StorageError};

/// Durable key holding the full JSON array of records.
pub const QUOTES_KEY: &str = "quotes";
/// Durable key holding the selected category filter.
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";
/// Session key holding the most recently displayed record.
pub const LAST_QUOTE_KEY: &str = "lastQuote";

const EVENT_CAPACITY: usize = 32;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected by validation; the store is unchanged.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Persistence failed. In-memory state may be ahead of disk; the store
    /// stays usable and a later `persist` can catch up.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The local-first quote collection.
pub struct QuoteStore {
    inner: Mutex<Inner>,
    persistence: Persistence,
    events: broadcast::Sender<StoreEvent>,
}

struct Inner {
    records: Vec<QuoteRecord>,
    keys: HashSet<String>,
    filter: CategoryFilter,
}

impl QuoteStore {
    /// Open a store over the given persistence pair.
    ///
    /// Loads the durable record snapshot and selected filter. A missing
    /// snapshot means an empty store; a malformed one is discarded with a
    /// warning rather than refusing to start.
    pub fn open(persistence: Persistence) -> Result<Self, StoreError> {
        let records: Vec<QuoteRecord> = match persistence.load_durable(QUOTES_KEY)? {
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!("discarding malformed quotes snapshot: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let filter = match persistence.load_durable(SELECTED_CATEGORY_KEY)? {
            Some(blob) => serde_json::from_str(&blob).unwrap_or_default(),
            None => CategoryFilter::default(),
        };

        let keys = records.iter().map(QuoteRecord::dedup_key).collect();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(Self {
            inner: Mutex::new(Inner {
                records,
                keys,
                filter,
            }),
            persistence,
            events,
        })
    }

    /// Add a quote from raw input.
    ///
    /// Trims both fields and fails validation if either is empty, leaving
    /// the store unchanged. On success the record is appended, the snapshot
    /// persisted, and [`StoreEvent::Added`] published. A persistence failure
    /// is returned but the in-memory append stands.
    pub fn add(&self, text: &str, category: &str) -> Result<QuoteRecord, StoreError> {
        let record = QuoteRecord::new(text, category)?;
        {
            let mut inner = self.inner.lock().unwrap();
            inner.keys.insert(record.dedup_key());
            inner.records.push(record.clone());
        }
        self.emit(StoreEvent::Added(record.clone()));
        self.persist()?;
        Ok(record)
    }

    /// Snapshot of all records, insertion order preserved.
    pub fn all(&self) -> Vec<QuoteRecord> {
        self.inner.lock().unwrap().records.clone()
    }

    /// Records matching `filter`, insertion order preserved.
    pub fn by_category(&self, filter: &CategoryFilter) -> Vec<QuoteRecord> {
        self.inner
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|record| filter.matches(&record.category))
            .cloned()
            .collect()
    }

    /// Distinct category strings in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        let mut seen = HashSet::new();
        let mut categories = Vec::new();
        for record in &inner.records {
            if seen.insert(record.category.clone()) {
                categories.push(record.category.clone());
            }
        }
        categories
    }

    /// Merge candidate records in, skipping any whose dedup key is already
    /// present. Returns the number inserted.
    ///
    /// Does not persist; callers persist once when anything changed.
    pub fn merge_insert(&self, candidates: impl IntoIterator<Item = QuoteRecord>) -> usize {
        let inserted = {
            let mut inner = self.inner.lock().unwrap();
            let mut inserted = 0;
            for record in candidates {
                if inner.keys.insert(record.dedup_key()) {
                    inner.records.push(record);
                    inserted += 1;
                }
            }
            inserted
        };
        if inserted > 0 {
            self.emit(StoreEvent::Merged { inserted });
        }
        inserted
    }

    /// Write the full record snapshot to the durable scope.
    pub fn persist(&self) -> Result<(), StorageError> {
        let snapshot = self.all();
        let blob = serde_json::to_string(&snapshot)?;
        self.persistence.save_durable(QUOTES_KEY, &blob)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().records.is_empty()
    }

    /// The persisted category filter.
    pub fn selected_filter(&self) -> CategoryFilter {
        self.inner.lock().unwrap().filter.clone()
    }

    /// Set and persist the category filter.
    pub fn set_selected_filter(&self, filter: CategoryFilter) -> Result<(), StorageError> {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.filter = filter.clone();
        }
        let blob = serde_json::to_string(&filter)?;
        self.persistence.save_durable(SELECTED_CATEGORY_KEY, &blob)?;
        self.emit(StoreEvent::FilterChanged(filter));
        Ok(())
    }

    /// The most recently displayed record this session, if any.
    pub fn last_viewed(&self) -> Option<QuoteRecord> {
        let blob = self.persistence.load_session(LAST_QUOTE_KEY).ok().flatten()?;
        serde_json::from_str(&blob).ok()
    }

    /// Record the most recently displayed quote (session-scoped).
    pub fn set_last_viewed(&self, record: &QuoteRecord) -> Result<(), StorageError> {
        let blob = serde_json::to_string(record)?;
        self.persistence.save_session(LAST_QUOTE_KEY, &blob)
    }

    /// A uniformly random record among those matching `filter`.
    pub fn random(&self, filter: &CategoryFilter) -> Option<QuoteRecord> {
        let matching = self.by_category(filter);
        matching.choose(&mut rand::thread_rng()).cloned()
    }

    /// Subscribe to store change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: StoreEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }
}
