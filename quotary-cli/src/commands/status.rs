//! Show store and sync status.

use anyhow::Result;
use std::path::Path;

use crate::config::{open_store, AppConfig};

/// Run the status command.
pub fn run(data_dir: &Path) -> Result<()> {
    println!("=== quotary status ===");
    println!();
    println!("Data directory: {}", data_dir.display());

    let config = AppConfig::load(data_dir)?;
    let store = open_store(data_dir)?;

    println!();
    println!("Store:");
    println!("  Quotes:     {}", store.len());
    println!("  Categories: {}", store.categories().len());
    println!("  Filter:     '{}'", store.selected_filter());

    println!();
    println!("Remote:");
    println!("  Fetch URL:  {}", config.remote.fetch_url);
    println!("  Upload URL: {}", config.remote.upload_url);
    println!("  Interval:   {}s", config.sync.interval_secs);
    println!("  Pull limit: {}", config.sync.pull_limit);

    Ok(())
}
