pub mod payload;
mod sink;

pub use sink::LokiSink;
