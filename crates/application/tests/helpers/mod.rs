#![allow(dead_code)]

mod mocks;
mod records;

pub use mocks::{MockCursorStore, MockHostnameResolver, MockLogSink, MockQuerySource};
pub use records::make_record;
