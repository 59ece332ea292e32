//! Mock remote source for tests.
//!
//! Serves a configurable item set, records uploads, and can force failures
//! or delay fetches to exercise overlap handling.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{RemoteError, RemoteItem, RemoteSource};

/// Mock remote source for tests.
#[derive(Debug, Default)]
pub struct MockRemote {
    inner: Arc<Mutex<MockRemoteInner>>,
}

#[derive(Debug, Default)]
struct MockRemoteInner {
    items: Vec<RemoteItem>,
    uploads: Vec<String>,
    fetch_calls: usize,
    upload_calls: usize,
    fail_next_fetch: Option<String>,
    fail_next_upload: Option<String>,
    fetch_delay: Option<Duration>,
}

impl MockRemote {
    /// Create an empty mock remote.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the item set served by `fetch()`.
    pub fn set_items(&self, items: Vec<RemoteItem>) {
        self.inner.lock().unwrap().items = items;
    }

    /// Append one item to the served set.
    pub fn push_item(&self, item: RemoteItem) {
        self.inner.lock().unwrap().items.push(item);
    }

    /// Bodies received via `upload()`, in order.
    pub fn uploads(&self) -> Vec<String> {
        self.inner.lock().unwrap().uploads.clone()
    }

    /// Number of `fetch()` calls that reached the remote.
    pub fn fetch_calls(&self) -> usize {
        self.inner.lock().unwrap().fetch_calls
    }

    /// Number of `upload()` calls that reached the remote.
    pub fn upload_calls(&self) -> usize {
        self.inner.lock().unwrap().upload_calls
    }

    /// Cause the next `fetch()` to fail with the given error.
    pub fn fail_next_fetch(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_fetch = Some(error.to_string());
    }

    /// Cause the next `upload()` to fail with the given error.
    pub fn fail_next_upload(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_upload = Some(error.to_string());
    }

    /// Delay every `fetch()` by `delay`, keeping the call in flight.
    pub fn set_fetch_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().fetch_delay = Some(delay);
    }
}

impl Clone for MockRemote {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl RemoteSource for MockRemote {
    async fn fetch(&self) -> Result<Vec<RemoteItem>, RemoteError> {
        let delay = {
            let mut inner = self.inner.lock().unwrap();
            inner.fetch_calls += 1;
            if let Some(error) = inner.fail_next_fetch.take() {
                return Err(RemoteError::Request(error));
            }
            inner.fetch_delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(self.inner.lock().unwrap().items.clone())
    }

    async fn upload(&self, body: String) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.upload_calls += 1;
        if let Some(error) = inner.fail_next_upload.take() {
            return Err(RemoteError::Request(error));
        }
        inner.uploads.push(body);
        Ok(())
    }
}
