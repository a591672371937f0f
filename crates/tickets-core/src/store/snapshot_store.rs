// ── Latest-refresh slot ──
//
// Readers load an `Arc` and keep a consistent view for as long as they hold
// it; writers replace the whole snapshot. Subscribers are woken through a
// `watch` channel carrying the same `Arc`.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tickets_api::{Currency, EventsResponse};
use tokio::sync::watch;

use super::stream::SnapshotStream;

/// Result of one successful refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinatorSnapshot {
    pub city_id: String,
    pub city_name: String,
    pub currency: Currency,
    pub events: EventsResponse,
    pub fetched_at: DateTime<Utc>,
}

/// Holder of the current [`CoordinatorSnapshot`].
pub struct SnapshotStore {
    current: ArcSwapOption<CoordinatorSnapshot>,
    changes: watch::Sender<Option<Arc<CoordinatorSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            current: ArcSwapOption::const_empty(),
            changes,
        }
    }

    /// The latest snapshot, if any refresh has succeeded.
    pub fn load(&self) -> Option<Arc<CoordinatorSnapshot>> {
        self.current.load_full()
    }

    /// Replace the snapshot and notify subscribers.
    pub(crate) fn replace(&self, snapshot: CoordinatorSnapshot) -> Arc<CoordinatorSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.current.store(Some(Arc::clone(&snapshot)));
        self.changes.send_replace(Some(Arc::clone(&snapshot)));
        snapshot
    }

    /// City id of the latest snapshot.
    pub fn city_id(&self) -> Option<String> {
        self.current.load().as_ref().map(|s| s.city_id.clone())
    }

    pub fn subscribe(&self) -> SnapshotStream {
        SnapshotStream::new(self.changes.subscribe())
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
