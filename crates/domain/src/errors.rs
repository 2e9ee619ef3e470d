use thiserror::Error;

/// Failure taxonomy for the exporter core.
///
/// Nothing here is fatal to the host process: every failure degrades
/// to "try again next cycle" while the last known-good published
/// state stays intact.
#[derive(Error, Debug, Clone)]
pub enum ExporterError {
    /// Network or auth failure talking to the Pi-hole API. Retried on
    /// the next cycle.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// Malformed payload from the Pi-hole API.
    #[error("source data error: {0}")]
    SourceData(String),

    /// Cursor/state file unreadable or unwritable.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Log batch could not be delivered downstream.
    #[error("delivery failure: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Push failure kinds for the log backend.
#[derive(Error, Debug, Clone)]
pub enum DeliveryError {
    /// Retry-eligible: network error, timeout, 5xx.
    #[error("transient delivery failure: {0}")]
    Transient(String),

    /// Not retryable (e.g. payload rejected with 4xx); the batch is
    /// logged and dropped rather than retried forever.
    #[error("batch rejected by log backend: {0}")]
    Rejected(String),
}
