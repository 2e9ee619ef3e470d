/// One observed DNS query, as reported by the Pi-hole query log API.
///
/// Records are ephemeral: fetched fresh each scrape cycle or shipper
/// tick, never stored by the exporter.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    /// Unix timestamp (seconds) the query was received.
    pub timestamp: i64,
    pub domain: String,
    /// Record type label as reported upstream (A, AAAA, HTTPS, ...).
    pub query_type: String,
    /// Fine-grained status code (CACHE, FORWARDED, GRAVITY, ...).
    pub status: String,
    pub reply_type: String,
    /// Reply latency in seconds. Absent when Pi-hole did not measure
    /// one (still-in-progress queries, some blocked replies).
    pub reply_time: Option<f64>,
    pub client_ip: String,
    /// Hostname reported by Pi-hole, if it knows one.
    pub client_name: Option<String>,
    /// Upstream server the query was forwarded to, absent for
    /// cache/blocklist answers.
    pub upstream: Option<String>,
    /// DNS response code (NOERROR, SERVFAIL, ...), absent for
    /// unanswered queries.
    pub rcode: Option<String>,
}

impl QueryRecord {
    /// Latency is only observable when present and non-negative.
    pub fn observable_latency(&self) -> Option<f64> {
        self.reply_time.filter(|t| *t >= 0.0)
    }

    /// A query counts as timed out when either the response code or
    /// the status says so.
    pub fn timed_out(&self) -> bool {
        self.rcode.as_deref() == Some("TIMEOUT") || self.status == "TIMEOUT"
    }
}
