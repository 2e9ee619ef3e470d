//! Pi-hole Exporter Infrastructure Layer
//!
//! Concrete adapters behind the application ports: the Pi-hole v6
//! HTTP API, the Loki push endpoint, the on-disk cursor and reverse
//! DNS for client display names.
pub mod loki;
pub mod pihole;
pub mod state;
pub mod system;

pub use loki::LokiSink;
pub use pihole::PiholeClient;
pub use state::FileCursorStore;
pub use system::PtrHostnameResolver;
