//! In-process invalidation bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`InvalidationBus`] is the fan-out hub for [`ViewInvalidation`] signals.
//! It is designed to be shared via `Arc<InvalidationBus>` across the
//! application.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ViewInvalidation
// ---------------------------------------------------------------------------

/// A signal that one cached view is stale and must be recomputed.
#[derive(Debug, Clone, Serialize)]
pub struct ViewInvalidation {
    /// Logical view name, e.g. `"project-list"` or `"project-detail:{id}"`.
    pub view_key: String,

    /// When the invalidation was published (UTC).
    pub timestamp: DateTime<Utc>,
}

impl ViewInvalidation {
    pub fn new(view_key: impl Into<String>) -> Self {
        Self {
            view_key: view_key.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// InvalidationBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out bus for view invalidations.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published signal.
///
/// # Usage
///
/// ```rust
/// use ctei_events::{views, InvalidationBus};
///
/// let bus = InvalidationBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.invalidate(views::PROJECT_LIST);
/// ```
pub struct InvalidationBus {
    sender: broadcast::Sender<ViewInvalidation>,
}

impl InvalidationBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed signals are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an invalidation for one view key.
    ///
    /// Fire-and-forget: if there are no active subscribers the signal is
    /// silently dropped, and a send failure never reaches the caller.
    pub fn invalidate(&self, view_key: impl Into<String>) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(ViewInvalidation::new(view_key));
    }

    /// Subscribe to all invalidations published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewInvalidation> {
        self.sender.subscribe()
    }
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
