use async_trait::async_trait;
use dashmap::DashMap;
use hickory_resolver::TokioAsyncResolver;
use pihole_exporter_application::ports::HostnameResolver;
use std::net::IpAddr;
use std::time::{Duration, Instant};
use tracing::debug;

const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Reverse-DNS resolver for client display names.
///
/// Results (including misses) are cached for an hour and every lookup
/// carries its own timeout, so an unresolvable address can never
/// stall a log batch. Only the short host label is returned, not the
/// FQDN.
pub struct PtrHostnameResolver {
    resolver: TokioAsyncResolver,
    cache: DashMap<IpAddr, (Option<String>, Instant)>,
    lookup_timeout: Duration,
}

impl PtrHostnameResolver {
    pub fn from_system_conf(lookup_timeout: Duration) -> Result<Self, String> {
        let resolver = TokioAsyncResolver::tokio_from_system_conf()
            .map_err(|e| format!("reading system resolver config: {e}"))?;
        Ok(Self {
            resolver,
            cache: DashMap::new(),
            lookup_timeout,
        })
    }

    async fn lookup(&self, ip: IpAddr) -> Option<String> {
        let lookup = tokio::time::timeout(self.lookup_timeout, self.resolver.reverse_lookup(ip))
            .await
            .ok()?
            .ok()?;

        let fqdn = lookup.iter().next()?.to_utf8();
        let short = fqdn.trim_end_matches('.').split('.').next()?.to_string();
        if short.is_empty() {
            None
        } else {
            Some(short)
        }
    }
}

#[async_trait]
impl HostnameResolver for PtrHostnameResolver {
    async fn resolve_hostname(&self, ip: IpAddr) -> Option<String> {
        if let Some(entry) = self.cache.get(&ip) {
            let (name, cached_at) = entry.value();
            if cached_at.elapsed() < CACHE_TTL {
                return name.clone();
            }
        }

        let name = self.lookup(ip).await;
        debug!(ip = %ip, name = ?name, "PTR lookup");
        self.cache.insert(ip, (name.clone(), Instant::now()));
        name
    }
}
