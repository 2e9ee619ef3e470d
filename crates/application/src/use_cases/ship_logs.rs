use crate::ports::{CursorStore, HostnameResolver, LogSink, QuerySource};
use pihole_exporter_domain::{DeliveryError, ExporterError, QueryRecord};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of one shipper tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipOutcome {
    /// Cursor already at or past the current time.
    UpToDate,
    /// Fetch returned nothing; cursor untouched.
    NoNewRecords,
    Shipped(usize),
    /// Batch rejected by the backend and dropped; cursor advanced so
    /// a poison batch cannot wedge the pipeline.
    Dropped(usize),
}

/// One log shipper tick: fetch records newer than the cursor, resolve
/// client display names, push downstream, and advance the cursor only
/// after confirmed delivery.
///
/// Delivery is at-least-once: a crash after the downstream ack but
/// before the cursor write re-ships the batch on restart. Consumers
/// must tolerate duplicate lines keyed by content + timestamp.
pub struct ShipLogsUseCase {
    source: Arc<dyn QuerySource>,
    sink: Arc<dyn LogSink>,
    cursor: Arc<dyn CursorStore>,
    resolver: Arc<dyn HostnameResolver>,
    max_attempts: u32,
    backoff_base: Duration,
}

impl ShipLogsUseCase {
    pub fn new(
        source: Arc<dyn QuerySource>,
        sink: Arc<dyn LogSink>,
        cursor: Arc<dyn CursorStore>,
        resolver: Arc<dyn HostnameResolver>,
    ) -> Self {
        Self {
            source,
            sink,
            cursor,
            resolver,
            max_attempts: 3,
            backoff_base: Duration::from_millis(500),
        }
    }

    pub fn with_retry_policy(mut self, max_attempts: u32, backoff_base: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff_base = backoff_base;
        self
    }

    pub async fn execute(&self) -> Result<ShipOutcome, ExporterError> {
        self.execute_at(chrono::Utc::now().timestamp()).await
    }

    pub async fn execute_at(&self, now: i64) -> Result<ShipOutcome, ExporterError> {
        let last_shipped = self.cursor.load().await;
        if last_shipped >= now {
            debug!(cursor = last_shipped, "cursor is current, nothing to ship");
            return Ok(ShipOutcome::UpToDate);
        }

        let mut records = self.source.fetch_query_log(last_shipped + 1, now).await?;
        if records.is_empty() {
            debug!(
                since = last_shipped + 1,
                until = now,
                "no new queries in range"
            );
            return Ok(ShipOutcome::NoNewRecords);
        }

        self.resolve_client_names(&mut records).await;

        // The cursor target is decided before pushing: the highest
        // record timestamp, so the next tick fetches strictly newer
        // records.
        let max_ts = records
            .iter()
            .map(|r| r.timestamp)
            .max()
            .expect("batch is non-empty");
        let batch_len = records.len();

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.sink.push(&records).await {
                Ok(()) => {
                    self.cursor.advance(max_ts).await?;
                    info!(records = batch_len, cursor = max_ts, "batch shipped");
                    return Ok(ShipOutcome::Shipped(batch_len));
                }
                Err(DeliveryError::Rejected(reason)) => {
                    warn!(
                        records = batch_len,
                        reason = %reason,
                        "batch rejected by log backend, dropping"
                    );
                    self.cursor.advance(max_ts).await?;
                    return Ok(ShipOutcome::Dropped(batch_len));
                }
                Err(DeliveryError::Transient(reason)) if attempt < self.max_attempts => {
                    let backoff = self.backoff_base * 2u32.saturating_pow(attempt - 1);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        backoff_ms = backoff.as_millis() as u64,
                        reason = %reason,
                        "push failed, backing off"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e @ DeliveryError::Transient(_)) => {
                    // Cursor untouched: the same records are
                    // re-fetched on the next tick.
                    warn!(
                        attempts = attempt,
                        "push attempts exhausted, deferring to next tick"
                    );
                    return Err(ExporterError::Delivery(e));
                }
            }
        }
    }

    /// Fill in a display name for records the source left unnamed.
    /// Lookup failures fall back to the raw address; the resolver
    /// itself bounds each lookup so the batch never stalls.
    async fn resolve_client_names(&self, records: &mut [QueryRecord]) {
        for record in records.iter_mut() {
            if record.client_name.is_some() {
                continue;
            }
            let Ok(ip) = record.client_ip.parse() else {
                continue;
            };
            if let Some(name) = self.resolver.resolve_hostname(ip).await {
                record.client_name = Some(name);
            }
        }
    }
}
