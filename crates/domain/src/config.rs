pub mod errors;
pub mod logging;
pub mod metrics;
pub mod root;
pub mod server;
pub mod shipper;
pub mod source;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use metrics::MetricsConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use shipper::ShipperConfig;
pub use source::SourceConfig;
