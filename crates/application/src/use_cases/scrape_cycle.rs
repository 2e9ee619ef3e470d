use crate::ports::QuerySource;
use crate::services::{SnapshotPublisher, SummaryBuilder, WindowAccumulator};
use pihole_exporter_domain::{
    ErrorCounters, ExporterError, LatencyHistogram, MetricsSnapshot, WindowBounds,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Cumulative state carried across cycles. Window counts are not kept
/// here: they are rebuilt from scratch every cycle.
struct CycleState {
    histogram: LatencyHistogram,
    errors: ErrorCounters,
}

/// One metrics scrape cycle: fetch the previous full minute of query
/// records, classify and accumulate them, fetch the 24-hour summary,
/// then publish a consistent composite snapshot.
///
/// A fetch failure at any stage aborts the cycle without touching the
/// previously published snapshot or the cumulative state, so readers
/// always see the last complete cycle.
pub struct ScrapeCycleUseCase {
    source: Arc<dyn QuerySource>,
    publisher: Arc<SnapshotPublisher>,
    state: Mutex<CycleState>,
}

impl ScrapeCycleUseCase {
    pub fn new(source: Arc<dyn QuerySource>, publisher: Arc<SnapshotPublisher>) -> Self {
        Self {
            source,
            publisher,
            state: Mutex::new(CycleState {
                histogram: LatencyHistogram::new(),
                errors: ErrorCounters::new(),
            }),
        }
    }

    pub async fn execute(&self) -> Result<(), ExporterError> {
        self.execute_at(chrono::Utc::now().timestamp()).await
    }

    /// Cycle entry point with an explicit clock, so tests control the
    /// window boundary.
    pub async fn execute_at(&self, now: i64) -> Result<(), ExporterError> {
        let bounds = WindowBounds::previous_minute(now);
        debug!(
            window_start = bounds.start,
            window_end = bounds.end,
            "starting scrape cycle"
        );

        let records = self
            .source
            .fetch_query_log(bounds.start, bounds.end)
            .await?;

        // Accumulate into copies first: if the summary fetch below
        // fails the cumulative state must stay at the last published
        // cycle, otherwise those observations would be invisible to
        // readers until the next success.
        let (mut histogram, mut errors) = {
            let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            (state.histogram.clone(), state.errors.clone())
        };
        let window = WindowAccumulator::accumulate(bounds, &records, &mut histogram, &mut errors);

        let totals = self.source.fetch_summary().await?;
        let summary = SummaryBuilder::build(&totals);

        {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.histogram = histogram.clone();
            state.errors = errors.clone();
        }

        self.publisher.publish(MetricsSnapshot {
            scraped_at: now,
            window,
            summary,
            histogram,
            errors,
        });

        info!(
            records = records.len(),
            window_start = bounds.start,
            "scrape cycle completed"
        );
        Ok(())
    }
}
