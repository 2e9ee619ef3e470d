use async_trait::async_trait;
use pihole_exporter_domain::{ExporterError, QueryRecord, SummaryTotals};

/// Read side of the Pi-hole HTTP API.
#[async_trait]
pub trait QuerySource: Send + Sync {
    /// Fetch query records in `[since, until]` (the upstream API
    /// treats both bounds inclusively). Callers that need exact
    /// window semantics filter on their own bounds.
    ///
    /// Fails with `SourceUnavailable` on network/auth errors and
    /// `SourceData` on malformed payloads. Individual malformed
    /// records are skipped by the adapter, not batch-fatal.
    async fn fetch_query_log(
        &self,
        since: i64,
        until: i64,
    ) -> Result<Vec<QueryRecord>, ExporterError>;

    /// Fetch the pre-aggregated 24-hour totals.
    async fn fetch_summary(&self) -> Result<SummaryTotals, ExporterError>;
}
