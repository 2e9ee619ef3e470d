use pihole_exporter_application::ScrapeCycleUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Background job that runs one metrics scrape cycle per interval.
///
/// A failed cycle is logged and retried on the next tick; the
/// previously published snapshot stays in place meanwhile.
pub struct MetricsScrapeJob {
    cycle: Arc<ScrapeCycleUseCase>,
    interval_secs: u64,
    shutdown: Option<CancellationToken>,
}

impl MetricsScrapeJob {
    pub fn new(cycle: Arc<ScrapeCycleUseCase>) -> Self {
        Self {
            cycle,
            interval_secs: 60,
            shutdown: None,
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting metrics scrape job"
        );

        let shutdown = self.shutdown.clone().unwrap_or_default();
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Metrics scrape job shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.cycle.execute().await {
                        error!(error = %e, "scrape cycle failed, keeping last snapshot");
                    }
                }
            }
        }
    }
}
