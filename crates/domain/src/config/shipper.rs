use serde::{Deserialize, Serialize};

/// Log shipper settings. The shipper only runs when `loki_url` is
/// configured.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShipperConfig {
    /// Base URL of the Loki/Alloy push endpoint
    /// (e.g. `http://localhost:3100`).
    #[serde(default)]
    pub loki_url: Option<String>,

    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// On first run, how many minutes of history to backfill.
    #[serde(default = "default_backfill_minutes")]
    pub initial_backfill_minutes: u64,

    #[serde(default = "default_ship_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_push_timeout_secs")]
    pub push_timeout_secs: u64,

    /// Push attempts per tick before deferring to the next tick.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for ShipperConfig {
    fn default() -> Self {
        Self {
            loki_url: None,
            state_file: default_state_file(),
            initial_backfill_minutes: default_backfill_minutes(),
            interval_secs: default_ship_interval_secs(),
            push_timeout_secs: default_push_timeout_secs(),
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

fn default_state_file() -> String {
    "/var/tmp/pihole_exporter_cursor.state".to_string()
}

fn default_backfill_minutes() -> u64 {
    5
}

fn default_ship_interval_secs() -> u64 {
    60
}

fn default_push_timeout_secs() -> u64 {
    15
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_base_ms() -> u64 {
    500
}
