use pihole_exporter_application::SnapshotPublisher;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub snapshots: Arc<SnapshotPublisher>,
}
