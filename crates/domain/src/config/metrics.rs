use serde::{Deserialize, Serialize};

/// Scrape-cycle cadence. One cycle aggregates the previous full
/// minute, so the default matches the window length.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_scrape_interval_secs")]
    pub scrape_interval_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            scrape_interval_secs: default_scrape_interval_secs(),
        }
    }
}

fn default_scrape_interval_secs() -> u64 {
    60
}
