mod scrape_cycle;
mod ship_logs;

pub use scrape_cycle::ScrapeCycleUseCase;
pub use ship_logs::{ShipLogsUseCase, ShipOutcome};
