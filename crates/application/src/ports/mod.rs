mod cursor_store;
mod hostname_resolver;
mod log_sink;
mod query_source;

pub use cursor_store::CursorStore;
pub use hostname_resolver::HostnameResolver;
pub use log_sink::LogSink;
pub use query_source::QuerySource;
