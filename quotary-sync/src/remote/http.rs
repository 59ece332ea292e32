//! HTTP remote source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::{RemoteError, RemoteItem, RemoteSource};

/// Timeout applied to every remote request. Timeouts belong to the HTTP
/// client, not the engine.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote source speaking plain HTTP: GET for the item list, POST for
/// uploads. Any 2xx status counts as success.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    fetch_url: String,
    upload_url: String,
}

impl HttpRemote {
    /// Create a remote for the given endpoints.
    pub fn new(fetch_url: &str, upload_url: &str) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RemoteError::Request(e.to_string()))?;
        Ok(Self {
            client,
            fetch_url: fetch_url.to_string(),
            upload_url: upload_url.to_string(),
        })
    }

    /// The URL the item list is fetched from.
    pub fn fetch_url(&self) -> &str {
        &self.fetch_url
    }

    /// The URL uploads are posted to.
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch(&self) -> Result<Vec<RemoteItem>, RemoteError> {
        tracing::debug!("GET {}", self.fetch_url);
        let response = self
            .client
            .get(&self.fetch_url)
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        response
            .json::<Vec<RemoteItem>>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn upload(&self, body: String) -> Result<(), RemoteError> {
        tracing::debug!("POST {} ({} bytes)", self.upload_url, body.len());
        let response = self
            .client
            .post(&self.upload_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_keeps_its_endpoints() {
        let remote = HttpRemote::new("http://example.test/list", "http://example.test/up").unwrap();
        assert_eq!(remote.fetch_url(), "http://example.test/list");
        assert_eq!(remote.upload_url(), "http://example.test/up");
    }
}
