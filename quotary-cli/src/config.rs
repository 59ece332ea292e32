//! CLI configuration and wiring.
//!
//! Settings live in `quotary.toml` inside the data directory; every field
//! has a default so a missing or partial file works. The helpers here also
//! wire the store and engine up from a data directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use quotary_store::{Persistence, QuoteStore};
use quotary_sync::{HttpRemote, Notifier, SyncEngine, SyncOptions};

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "quotary.toml";

/// Root CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote endpoints.
    #[serde(default)]
    pub remote: RemoteConfig,
    /// Sync cadence.
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Remote endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// URL the pull list is fetched from.
    #[serde(default = "default_fetch_url")]
    pub fetch_url: String,
    /// URL the store is uploaded to.
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
}

/// Sync cadence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Seconds between scheduled pulls (default: 30).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Maximum remote items mapped per pull (default: 10).
    #[serde(default = "default_pull_limit")]
    pub pull_limit: usize,
}

fn default_fetch_url() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

fn default_upload_url() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

fn default_interval_secs() -> u64 {
    30
}

fn default_pull_limit() -> usize {
    10
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            fetch_url: default_fetch_url(),
            upload_url: default_upload_url(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            pull_limit: default_pull_limit(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the data directory, falling back to defaults
    /// when no file exists.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Write the configuration file.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let path = data_dir.join(CONFIG_FILE);
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Engine tuning derived from this config.
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            interval: Duration::from_secs(self.sync.interval_secs),
            pull_limit: self.sync.pull_limit,
        }
    }
}

/// Open the store backing a data directory: file-backed durable scope,
/// in-memory session scope.
pub fn open_store(data_dir: &Path) -> Result<Arc<QuoteStore>> {
    let persistence = Persistence::at_dir(data_dir)?;
    let store = QuoteStore::open(persistence)
        .with_context(|| format!("failed to open store in {}", data_dir.display()))?;
    Ok(Arc::new(store))
}

/// Build a sync engine over the configured HTTP remote.
pub fn build_engine(store: Arc<QuoteStore>, config: &AppConfig) -> Result<SyncEngine<HttpRemote>> {
    let remote = HttpRemote::new(&config.remote.fetch_url, &config.remote.upload_url)?;
    Ok(SyncEngine::new(
        store,
        remote,
        Notifier::new(),
        config.sync_options(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_points_at_placeholder_api() {
        let config = AppConfig::default();
        assert_eq!(
            config.remote.fetch_url,
            "https://jsonplaceholder.typicode.com/posts"
        );
        assert_eq!(config.sync.interval_secs, 30);
        assert_eq!(config.sync.pull_limit, 10);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.sync.pull_limit, 10);
    }

    #[test]
    fn config_roundtrips_through_file() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.remote.fetch_url = "http://localhost:9000/quotes".to_string();
        config.sync.interval_secs = 5;
        config.save(dir.path()).unwrap();

        let loaded = AppConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.remote.fetch_url, "http://localhost:9000/quotes");
        assert_eq!(loaded.sync.interval_secs, 5);
        // Untouched fields keep defaults
        assert_eq!(loaded.sync.pull_limit, 10);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[sync]\ninterval_secs = 120\n",
        )
        .unwrap();

        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.sync.interval_secs, 120);
        assert_eq!(config.sync.pull_limit, 10);
        assert_eq!(
            config.remote.fetch_url,
            "https://jsonplaceholder.typicode.com/posts"
        );
    }

    #[test]
    fn sync_options_reflect_config() {
        let mut config = AppConfig::default();
        config.sync.interval_secs = 7;
        config.sync.pull_limit = 3;

        let options = config.sync_options();
        assert_eq!(options.interval, Duration::from_secs(7));
        assert_eq!(options.pull_limit, 3);
    }

    #[test]
    fn open_store_creates_data_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("fresh");

        let store = open_store(&nested).unwrap();
        assert!(store.is_empty());
        assert!(nested.exists());
    }
}
