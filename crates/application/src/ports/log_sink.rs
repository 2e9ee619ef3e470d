use async_trait::async_trait;
use pihole_exporter_domain::{DeliveryError, QueryRecord};

/// Push side of the log-aggregation backend.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Deliver one batch. `Transient` failures are retry-eligible;
    /// `Rejected` means the payload itself was refused and retrying
    /// the same batch cannot succeed.
    async fn push(&self, records: &[QueryRecord]) -> Result<(), DeliveryError>;
}
