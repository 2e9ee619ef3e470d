mod snapshot_publisher;
mod summary_builder;
mod window_accumulator;

pub use snapshot_publisher::SnapshotPublisher;
pub use summary_builder::SummaryBuilder;
pub use window_accumulator::WindowAccumulator;
