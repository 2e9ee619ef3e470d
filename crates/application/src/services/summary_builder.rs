use pihole_exporter_domain::{SummaryGauges, SummaryTotals, UpstreamGauge};
use std::collections::BTreeMap;
use tracing::warn;

/// Reshapes the upstream's pre-aggregated 24-hour totals into gauge
/// form. No aggregation of its own: validation only. A negative count
/// is a data-integrity error; it clamps to zero with a warning so the
/// cycle continues.
pub struct SummaryBuilder;

impl SummaryBuilder {
    pub fn build(totals: &SummaryTotals) -> SummaryGauges {
        SummaryGauges {
            queries_total: clamp("queries.total", totals.queries_total),
            queries_blocked: clamp("queries.blocked", totals.queries_blocked),
            unique_domains: clamp("queries.unique_domains", totals.unique_domains),
            queries_forwarded: clamp("queries.forwarded", totals.queries_forwarded),
            queries_cached: clamp("queries.cached", totals.queries_cached),
            clients_active: clamp("clients.active", totals.clients_active),
            clients_total: clamp("clients.total", totals.clients_total),
            gravity_domains: clamp("gravity.domains_being_blocked", totals.gravity_domains),
            by_type: clamp_table("queries.types", &totals.by_type),
            by_status: clamp_table("queries.status", &totals.by_status),
            by_reply: clamp_table("queries.replies", &totals.by_reply),
            upstreams: totals
                .upstreams
                .iter()
                .map(|u| UpstreamGauge {
                    ip: u.ip.clone(),
                    name: u.name.clone(),
                    port: u.port.clamp(0, u16::MAX as i64) as u16,
                    count: clamp("upstreams.count", u.count),
                })
                .collect(),
        }
    }
}

fn clamp(field: &str, value: i64) -> u64 {
    if value < 0 {
        warn!(field, value, "negative count in summary data, clamping to zero");
        0
    } else {
        value as u64
    }
}

fn clamp_table(field: &str, table: &BTreeMap<String, i64>) -> BTreeMap<String, u64> {
    table
        .iter()
        .map(|(key, value)| (key.clone(), clamp(field, *value)))
        .collect()
}
