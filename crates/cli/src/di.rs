use anyhow::Context;
use pihole_exporter_application::{ScrapeCycleUseCase, ShipLogsUseCase, SnapshotPublisher};
use pihole_exporter_domain::config::SourceConfig;
use pihole_exporter_domain::Config;
use pihole_exporter_infrastructure::{FileCursorStore, LokiSink, PiholeClient, PtrHostnameResolver};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const PTR_LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Wired use cases shared between the background jobs and the HTTP
/// handlers.
pub struct Services {
    pub snapshots: Arc<SnapshotPublisher>,
    pub scrape_cycle: Arc<ScrapeCycleUseCase>,
    /// Present only when a Loki target is configured.
    pub ship_logs: Option<Arc<ShipLogsUseCase>>,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let api_token = resolve_api_token(&config.source);
        let client = Arc::new(PiholeClient::new(&config.source, api_token)?);

        let snapshots = Arc::new(SnapshotPublisher::new());
        let scrape_cycle = Arc::new(ScrapeCycleUseCase::new(client.clone(), snapshots.clone()));

        let ship_logs = match &config.shipper.loki_url {
            Some(url) => {
                let sink = Arc::new(LokiSink::new(
                    url,
                    &host_label(),
                    Duration::from_secs(config.shipper.push_timeout_secs),
                )?);
                let cursor = Arc::new(FileCursorStore::new(
                    config.shipper.state_file.as_str(),
                    config.shipper.initial_backfill_minutes,
                ));
                let resolver = Arc::new(
                    PtrHostnameResolver::from_system_conf(PTR_LOOKUP_TIMEOUT)
                        .map_err(anyhow::Error::msg)
                        .context("failed to build reverse DNS resolver")?,
                );

                info!(loki_url = %url, "Log shipper enabled");
                Some(Arc::new(
                    ShipLogsUseCase::new(client.clone(), sink, cursor, resolver)
                        .with_retry_policy(
                            config.shipper.max_attempts,
                            Duration::from_millis(config.shipper.backoff_base_ms),
                        ),
                ))
            }
            None => {
                info!("No Loki target configured, log shipper disabled");
                None
            }
        };

        Ok(Self {
            snapshots,
            scrape_cycle,
            ship_logs,
        })
    }
}

/// Token priority: CLI/config value, then `PIHOLE_API_TOKEN`, then the
/// token file. Unauthenticated operation is allowed but most Pi-hole
/// endpoints will reject it.
fn resolve_api_token(source: &SourceConfig) -> Option<String> {
    if let Some(token) = &source.api_token {
        return Some(token.clone());
    }

    if let Ok(token) = std::env::var("PIHOLE_API_TOKEN") {
        if !token.is_empty() {
            return Some(token);
        }
    }

    match std::fs::read_to_string(&source.api_token_file) {
        Ok(contents) => {
            let token = contents.trim().to_string();
            if token.is_empty() {
                None
            } else {
                Some(token)
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("No API token provided, authenticated endpoints may fail");
            None
        }
        Err(e) => {
            warn!(
                error = %e,
                path = %source.api_token_file,
                "Failed to read API token file"
            );
            None
        }
    }
}

fn host_label() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}
