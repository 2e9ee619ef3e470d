use crate::histogram::LatencyHistogram;
use crate::summary::SummaryGauges;
use crate::window::{ErrorCounters, WindowSnapshot};

/// The full set of metric values published at the end of one scrape
/// cycle.
///
/// Snapshots are immutable once published and replaced wholesale by
/// atomic pointer swap, so a concurrent reader always sees one
/// consistent cycle, never a half-updated mix.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    /// Unix timestamp of the cycle that produced this snapshot.
    pub scraped_at: i64,
    pub window: WindowSnapshot,
    pub summary: SummaryGauges,
    pub histogram: LatencyHistogram,
    pub errors: ErrorCounters,
}

impl MetricsSnapshot {
    /// Placeholder published before the first cycle completes.
    pub fn empty() -> Self {
        Self {
            scraped_at: 0,
            window: WindowSnapshot::default(),
            summary: SummaryGauges::default(),
            histogram: LatencyHistogram::new(),
            errors: ErrorCounters::new(),
        }
    }
}
