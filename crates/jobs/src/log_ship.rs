use pihole_exporter_application::{ShipLogsUseCase, ShipOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Background job driving the log shipper on a fixed cadence.
///
/// Ticks are independent: a tick that exhausts its push attempts
/// leaves the cursor where it was and the next tick re-fetches the
/// same records. Failures are never fatal to the process.
pub struct LogShipJob {
    shipper: Arc<ShipLogsUseCase>,
    interval_secs: u64,
    shutdown: Option<CancellationToken>,
}

impl LogShipJob {
    pub fn new(shipper: Arc<ShipLogsUseCase>) -> Self {
        Self {
            shipper,
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
        info!(interval_secs = self.interval_secs, "Starting log ship job");

        let shutdown = self.shutdown.clone().unwrap_or_default();
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Log ship job shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match self.shipper.execute().await {
                        Ok(ShipOutcome::Shipped(count)) => {
                            debug!(records = count, "tick shipped a batch");
                        }
                        Ok(outcome) => {
                            debug!(?outcome, "tick finished");
                        }
                        Err(e) => {
                            error!(error = %e, "ship tick failed, will retry next tick");
                        }
                    }
                }
            }
        }
    }
}
