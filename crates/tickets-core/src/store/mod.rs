// ── Snapshot store ──
//
// One atomically swapped slot holding the latest successful refresh, with
// push-based change notification.

mod snapshot_store;
mod stream;

pub use snapshot_store::{CoordinatorSnapshot, SnapshotStore};
pub use stream::{SnapshotStream, SnapshotWatchStream};
