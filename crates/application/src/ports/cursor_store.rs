use async_trait::async_trait;
use pihole_exporter_domain::ExporterError;

/// Durable timestamp of the last successfully shipped record.
///
/// Owned exclusively by the log shipper. `load` never fails: a
/// missing or corrupt state file falls back to the configured
/// backfill window with a warning.
#[async_trait]
pub trait CursorStore: Send + Sync {
    async fn load(&self) -> i64;

    /// Durable, crash-safe write. Called only after a confirmed
    /// downstream acknowledgment.
    async fn advance(&self, to: i64) -> Result<(), ExporterError>;
}
