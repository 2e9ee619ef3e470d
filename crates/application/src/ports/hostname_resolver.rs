use async_trait::async_trait;
use std::net::IpAddr;

/// Resolves a client address to a short display hostname.
///
/// Implementations must bound each lookup (cache + timeout) so an
/// unresolvable address never stalls a batch; `None` means "use the
/// raw address".
#[async_trait]
pub trait HostnameResolver: Send + Sync {
    async fn resolve_hostname(&self, ip: IpAddr) -> Option<String>;
}
