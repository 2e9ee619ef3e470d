use arc_swap::ArcSwap;
use pihole_exporter_domain::MetricsSnapshot;
use std::sync::Arc;

/// Lock-free handoff of the published metrics snapshot.
///
/// The scrape cycle swaps in a complete snapshot; an unbounded number
/// of concurrent `/metrics` readers load the current pointer without
/// ever blocking on an in-progress update.
pub struct SnapshotPublisher {
    current: ArcSwap<MetricsSnapshot>,
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(MetricsSnapshot::empty()),
        }
    }

    pub fn publish(&self, snapshot: MetricsSnapshot) {
        self.current.store(Arc::new(snapshot));
    }

    pub fn load(&self) -> Arc<MetricsSnapshot> {
        self.current.load_full()
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}
