//! The remote source seam.
//!
//! The remote is an opaque HTTP collaborator: a GET returns a list of
//! loosely-typed items, a POST accepts the serialized store as its body.
//! Implementations: [`HttpRemote`] for real traffic, [`MockRemote`] for
//! tests.

mod http;
mod mock;

pub use http::HttpRemote;
pub use mock::MockRemote;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Remote source errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request could not be completed.
    #[error("request failed: {0}")]
    Request(String),

    /// The remote answered with a non-success status.
    #[error("unexpected status: {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("decode failed: {0}")]
    Decode(String),
}

/// One loosely-typed item from the remote list.
///
/// Only a title-like field and an optional category are read; anything else
/// the remote sends is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteItem {
    /// The title-like field mapped to quote text.
    #[serde(default, alias = "text")]
    pub title: Option<String>,
    /// Category, when the remote provides one.
    #[serde(default)]
    pub category: Option<String>,
}

impl RemoteItem {
    /// An item carrying only a title.
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            category: None,
        }
    }

    /// An item carrying a title and a category.
    pub fn categorized(title: &str, category: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            category: Some(category.to_string()),
        }
    }
}

/// An opaque remote accepting list and upload requests.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the remote item list.
    async fn fetch(&self) -> Result<Vec<RemoteItem>, RemoteError>;

    /// Upload a serialized store document.
    async fn upload(&self, body: String) -> Result<(), RemoteError>;
}
