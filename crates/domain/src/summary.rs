use std::collections::BTreeMap;

/// Raw 24-hour totals as reported by the upstream `stats/summary` and
/// `stats/upstreams` endpoints. Signed on purpose: the upstream data
/// is not trusted to be non-negative until validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTotals {
    pub queries_total: i64,
    pub queries_blocked: i64,
    pub unique_domains: i64,
    pub queries_forwarded: i64,
    pub queries_cached: i64,
    pub clients_active: i64,
    pub clients_total: i64,
    pub gravity_domains: i64,
    pub by_type: BTreeMap<String, i64>,
    pub by_status: BTreeMap<String, i64>,
    pub by_reply: BTreeMap<String, i64>,
    pub upstreams: Vec<UpstreamTotal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamTotal {
    pub ip: String,
    pub name: String,
    pub port: i64,
    pub count: i64,
}

/// Validated 24-hour gauges, ready to publish. Produced from
/// `SummaryTotals` by the summary builder; all counts are
/// non-negative (upstream negatives clamp to zero).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryGauges {
    pub queries_total: u64,
    pub queries_blocked: u64,
    pub unique_domains: u64,
    pub queries_forwarded: u64,
    pub queries_cached: u64,
    pub clients_active: u64,
    pub clients_total: u64,
    pub gravity_domains: u64,
    pub by_type: BTreeMap<String, u64>,
    pub by_status: BTreeMap<String, u64>,
    pub by_reply: BTreeMap<String, u64>,
    pub upstreams: Vec<UpstreamGauge>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamGauge {
    pub ip: String,
    pub name: String,
    pub port: u16,
    pub count: u64,
}

impl SummaryGauges {
    /// Cache hit ratio over 24h, as a percentage. Derived, not
    /// fetched; zero when no queries were seen.
    pub fn cache_hit_ratio(&self) -> f64 {
        if self.queries_total == 0 {
            0.0
        } else {
            self.queries_cached as f64 / self.queries_total as f64 * 100.0
        }
    }
}
