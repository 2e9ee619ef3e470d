//! Pi-hole Exporter Application Layer
//!
//! Ports abstract the Pi-hole API, the log backend and the cursor
//! file; services hold the pure aggregation logic; use cases
//! orchestrate one scrape cycle and one shipper tick.
pub mod ports;
pub mod services;
pub mod use_cases;

pub use services::{SnapshotPublisher, SummaryBuilder, WindowAccumulator};
pub use use_cases::{ScrapeCycleUseCase, ShipLogsUseCase, ShipOutcome};
