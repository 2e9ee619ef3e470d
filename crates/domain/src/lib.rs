//! Pi-hole Exporter Domain Layer
pub mod config;
pub mod errors;
pub mod histogram;
pub mod query_record;
pub mod snapshot;
pub mod status;
pub mod summary;
pub mod window;

pub use config::{CliOverrides, Config};
pub use errors::{DeliveryError, ExporterError};
pub use histogram::{LatencyHistogram, LATENCY_BUCKETS};
pub use query_record::QueryRecord;
pub use snapshot::MetricsSnapshot;
pub use status::{LatencyClass, QueryStatus};
pub use summary::{SummaryGauges, SummaryTotals, UpstreamGauge, UpstreamTotal};
pub use window::{ErrorCounters, WindowBounds, WindowSnapshot, SEEDED_RCODES};
