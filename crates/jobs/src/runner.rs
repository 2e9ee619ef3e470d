use crate::{LogShipJob, MetricsScrapeJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(MetricsScrapeJob);
impl_spawnable_job!(LogShipJob);

fn spawn_job<J: SpawnableJob>(job: Option<J>, shutdown: &Option<CancellationToken>) {
    if let Some(job) = job {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        Arc::new(job).start_job();
    }
}

/// Spawns the configured background jobs. The log ship job is absent
/// when no log backend is configured.
pub struct JobRunner {
    metrics_scrape: Option<MetricsScrapeJob>,
    log_ship: Option<LogShipJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            metrics_scrape: None,
            log_ship: None,
            shutdown: None,
        }
    }

    pub fn with_metrics_scrape(mut self, job: MetricsScrapeJob) -> Self {
        self.metrics_scrape = Some(job);
        self
    }

    pub fn with_log_ship(mut self, job: LogShipJob) -> Self {
        self.log_ship = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) {
        info!("Starting background job runner");

        spawn_job(self.metrics_scrape, &self.shutdown);
        spawn_job(self.log_ship, &self.shutdown);

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
