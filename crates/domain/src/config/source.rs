use serde::{Deserialize, Serialize};

/// Connection settings for the Pi-hole instance being scraped.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_api_port")]
    pub port: u16,

    /// API token. Falls back to the `PIHOLE_API_TOKEN` environment
    /// variable, then to `api_token_file`.
    #[serde(default)]
    pub api_token: Option<String>,

    #[serde(default = "default_token_file")]
    pub api_token_file: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pi-hole ships a self-signed certificate by default; disable
    /// only if you have a real one.
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_api_port(),
            api_token: None,
            api_token_file: default_token_file(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: default_accept_invalid_certs(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_api_port() -> u16 {
    443
}

fn default_token_file() -> String {
    "/etc/pihole-exporter/api_token".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_accept_invalid_certs() -> bool {
    true
}
