pub mod log_ship;
pub mod metrics_scrape;
pub mod runner;

pub use log_ship::LogShipJob;
pub use metrics_scrape::MetricsScrapeJob;
pub use runner::JobRunner;
