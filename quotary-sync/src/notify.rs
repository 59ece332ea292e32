//! Single-slot, timed user-facing notifications.
//!
//! One message is visible at a time. Publishing replaces whatever is shown
//! and restarts the expiry timer; there is no queue. The slot clears on its
//! own once the timer runs out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// How long a published message stays visible.
pub const DISPLAY_TTL: Duration = Duration::from_secs(5);

/// Single-slot notification channel.
///
/// Must be used within a tokio runtime: `publish` spawns the expiry timer.
/// Clones share the slot.
#[derive(Debug, Clone)]
pub struct Notifier {
    slot: Arc<watch::Sender<Option<String>>>,
    generation: Arc<AtomicU64>,
    ttl: Duration,
}

impl Notifier {
    /// Channel with the standard 5 second expiry.
    pub fn new() -> Self {
        Self::with_ttl(DISPLAY_TTL)
    }

    /// Channel with a custom expiry, for tests.
    pub fn with_ttl(ttl: Duration) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
            generation: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    /// Publish a message, replacing the current one and restarting the timer.
    pub fn publish(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("notification: {}", message);

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.slot.send_replace(Some(message));

        let slot = Arc::clone(&self.slot);
        let counter = Arc::clone(&self.generation);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            // A newer publish restarted the timer; leave its message alone.
            if counter.load(Ordering::SeqCst) == generation {
                slot.send_replace(None);
            }
        });
    }

    /// The currently displayed message, if it has not expired.
    pub fn current(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Observe the display slot.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.slot.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
