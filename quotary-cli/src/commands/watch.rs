//! Run periodic sync until interrupted.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use quotary_store::StoreEvent;
use quotary_sync::spawn_periodic_pull;

use crate::config::{build_engine, open_store, AppConfig};

/// Run the watch command: schedule pulls on the configured interval and
/// print store events and notifications until Ctrl-C.
pub async fn run(data_dir: &Path, interval_override: Option<u64>) -> Result<()> {
    let config = AppConfig::load(data_dir)?;
    let store = open_store(data_dir)?;
    let engine = Arc::new(build_engine(Arc::clone(&store), &config)?);

    let period = Duration::from_secs(interval_override.unwrap_or(config.sync.interval_secs));
    let mut events = store.subscribe();
    let mut notices = engine.notifier().subscribe();

    let scheduler = spawn_periodic_pull(Arc::clone(&engine), period);
    println!(
        "Watching {} every {}s. Ctrl-C to stop.",
        config.remote.fetch_url,
        period.as_secs()
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = notices.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(message) = notices.borrow_and_update().clone() {
                    println!("{message}");
                }
            }
            event = events.recv() => match event {
                Ok(StoreEvent::Merged { inserted }) => {
                    println!("  merged {inserted} new quote(s), {} total", store.len());
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    scheduler.stop();
    println!("Stopped.");
    Ok(())
}
