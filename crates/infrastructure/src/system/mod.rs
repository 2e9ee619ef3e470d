mod hostname_resolver;

pub use hostname_resolver::PtrHostnameResolver;
