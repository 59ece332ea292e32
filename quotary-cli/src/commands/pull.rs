//! Pull new quotes from the remote.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use quotary_sync::SyncOutcome;

use crate::config::{build_engine, open_store, AppConfig};

/// Run the pull command.
pub async fn run(data_dir: &Path) -> Result<()> {
    let config = AppConfig::load(data_dir)?;
    let store = open_store(data_dir)?;
    let engine = build_engine(Arc::clone(&store), &config)?;

    match engine.pull().await {
        SyncOutcome::Changed { inserted } => {
            println!(
                "Merged {inserted} new quote(s); store now holds {}.",
                store.len()
            );
        }
        SyncOutcome::Unchanged => {
            println!("Already up to date ({} quote(s)).", store.len());
        }
        SyncOutcome::Skipped => println!("A sync is already running."),
        SyncOutcome::Failed => {
            if let Some(message) = engine.notifier().current() {
                println!("{message}");
            }
            anyhow::bail!("pull did not complete");
        }
    }
    Ok(())
}
