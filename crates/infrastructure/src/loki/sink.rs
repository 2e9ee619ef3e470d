use super::payload::build_payload;
use async_trait::async_trait;
use pihole_exporter_application::ports::LogSink;
use pihole_exporter_domain::{DeliveryError, QueryRecord};
use std::time::Duration;
use tracing::debug;

/// Pushes query log batches to a Loki-compatible endpoint
/// (Loki itself, or Grafana Alloy).
pub struct LokiSink {
    http: reqwest::Client,
    push_url: String,
    host_label: String,
}

impl LokiSink {
    pub fn new(
        target: &str,
        host_label: &str,
        push_timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(push_timeout)
            .build()
            .map_err(|e| DeliveryError::Transient(e.to_string()))?;

        Ok(Self {
            http,
            push_url: format!("{}/loki/api/v1/push", target.trim_end_matches('/')),
            host_label: host_label.to_string(),
        })
    }
}

#[async_trait]
impl LogSink for LokiSink {
    async fn push(&self, records: &[QueryRecord]) -> Result<(), DeliveryError> {
        let payload = build_payload(records, &self.host_label);

        let response = self
            .http
            .post(&self.push_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DeliveryError::Transient(format!("push failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            debug!(records = records.len(), "pushed batch to Loki");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        // 4xx means the payload itself was refused; retrying the same
        // batch cannot succeed.
        if status.is_client_error() {
            Err(DeliveryError::Rejected(format!("{status}: {body}")))
        } else {
            Err(DeliveryError::Transient(format!("{status}: {body}")))
        }
    }
}
