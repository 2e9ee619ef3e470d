//! Prometheus text exposition built from a published snapshot.
//!
//! Every render builds a fresh registry from the immutable snapshot,
//! so concurrent scrapes never observe each other and no process-wide
//! registry state exists to drift from the published values.

use pihole_exporter_domain::{LatencyHistogram, MetricsSnapshot};
use prometheus::proto::{Bucket, Histogram, LabelPair, Metric, MetricFamily, MetricType};
use prometheus::{Encoder, Gauge, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};

pub fn render(snapshot: &MetricsSnapshot) -> Result<String, prometheus::Error> {
    let registry = Registry::new();

    labeled_gauges(
        &registry,
        "pihole_query_by_type",
        "Count of queries by type (24h)",
        "query_type",
        snapshot.summary.by_type.iter().map(|(k, v)| (k.as_str(), *v)),
    )?;
    labeled_gauges(
        &registry,
        "pihole_query_by_status",
        "Count of queries by status over 24h",
        "query_status",
        snapshot.summary.by_status.iter().map(|(k, v)| (k.as_str(), *v)),
    )?;
    labeled_gauges(
        &registry,
        "pihole_query_replies",
        "Count of replies by type over 24h",
        "reply_type",
        snapshot.summary.by_reply.iter().map(|(k, v)| (k.as_str(), *v)),
    )?;
    labeled_gauges(
        &registry,
        "pihole_query_count",
        "Query counts by category, 24h",
        "category",
        [
            ("total", snapshot.summary.queries_total),
            ("blocked", snapshot.summary.queries_blocked),
            ("unique", snapshot.summary.unique_domains),
            ("forwarded", snapshot.summary.queries_forwarded),
            ("cached", snapshot.summary.queries_cached),
        ]
        .into_iter(),
    )?;
    labeled_gauges(
        &registry,
        "pihole_client_count",
        "Total/active client counts",
        "category",
        [
            ("active", snapshot.summary.clients_active),
            ("total", snapshot.summary.clients_total),
        ]
        .into_iter(),
    )?;

    let gravity = IntGauge::with_opts(Opts::new(
        "pihole_domains_being_blocked",
        "Number of domains on current blocklist",
    ))?;
    gravity.set(snapshot.summary.gravity_domains as i64);
    registry.register(Box::new(gravity))?;

    let upstreams = IntGaugeVec::new(
        Opts::new(
            "pihole_query_upstream_count",
            "Total query upstream counts (24h)",
        ),
        &["ip", "name", "port"],
    )?;
    for upstream in &snapshot.summary.upstreams {
        let port = upstream.port.to_string();
        upstreams
            .with_label_values(&[&upstream.ip, &upstream.name, &port])
            .set(upstream.count as i64);
    }
    registry.register(Box::new(upstreams))?;

    let cache_hit_ratio = Gauge::with_opts(Opts::new(
        "pihole_cache_hit_ratio_percent",
        "Cache hit ratio as percentage (24h)",
    ))?;
    cache_hit_ratio.set(snapshot.summary.cache_hit_ratio());
    registry.register(Box::new(cache_hit_ratio))?;

    labeled_gauges(
        &registry,
        "pihole_query_type_1m",
        "Count of query types (last whole 1m)",
        "query_type",
        snapshot.window.by_type.iter().map(|(k, v)| (k.as_str(), *v)),
    )?;
    labeled_gauges(
        &registry,
        "pihole_query_status_1m",
        "Count of query status (last whole 1m)",
        "query_status",
        snapshot.window.by_status.iter().map(|(k, v)| (k.as_str(), *v)),
    )?;
    labeled_gauges(
        &registry,
        "pihole_query_reply_1m",
        "Count of query reply types (last whole 1m)",
        "query_reply",
        snapshot.window.by_reply.iter().map(|(k, v)| (k.as_str(), *v)),
    )?;
    labeled_gauges(
        &registry,
        "pihole_query_client_1m",
        "Count of query clients (last whole 1m)",
        "query_client",
        snapshot.window.by_client.iter().map(|(k, v)| (k.as_str(), *v)),
    )?;
    labeled_gauges(
        &registry,
        "pihole_query_upstream_1m",
        "Count of query upstream destinations (last whole 1m)",
        "query_upstream",
        snapshot
            .window
            .by_upstream
            .iter()
            .map(|(k, v)| (k.as_str(), *v)),
    )?;

    let timeouts = IntGauge::with_opts(Opts::new(
        "pihole_dns_timeouts",
        "DNS timeout queries (last whole 1m)",
    ))?;
    timeouts.set(snapshot.window.timeouts as i64);
    registry.register(Box::new(timeouts))?;

    let processed = IntGauge::with_opts(Opts::new(
        "pihole_queries_processed_1m",
        "Queries aggregated from the last whole 1m window",
    ))?;
    processed.set(snapshot.window.total_processed as i64);
    registry.register(Box::new(processed))?;

    let errors = IntCounterVec::new(
        Opts::new(
            "pihole_dns_error_codes_total",
            "DNS error responses by rcode since process start",
        ),
        &["rcode"],
    )?;
    for (rcode, count) in snapshot.errors.iter() {
        errors.with_label_values(&[rcode]).inc_by(count);
    }
    registry.register(Box::new(errors))?;

    let mut families = registry.gather();
    // Vec families with no children yet (e.g. an empty window) would
    // fail the encoder's no-metrics check.
    families.retain(|family| !family.get_metric().is_empty());
    if let Some(latency) = latency_family(&snapshot.histogram) {
        families.push(latency);
    }

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

fn labeled_gauges<'a>(
    registry: &Registry,
    name: &str,
    help: &str,
    label: &str,
    values: impl Iterator<Item = (&'a str, u64)>,
) -> Result<(), prometheus::Error> {
    let vec = IntGaugeVec::new(Opts::new(name, help), &[label])?;
    for (key, value) in values {
        vec.with_label_values(&[key]).set(value as i64);
    }
    registry.register(Box::new(vec))
}

/// Pre-aggregated histogram series are assembled as protobuf families
/// directly; the live `prometheus::Histogram` type only supports
/// observing one sample at a time.
fn latency_family(histogram: &LatencyHistogram) -> Option<MetricFamily> {
    let mut family = MetricFamily::default();
    family.set_name("pihole_dns_latency_seconds".to_string());
    family.set_help("DNS query latency in seconds".to_string());
    family.set_field_type(MetricType::HISTOGRAM);

    for (class, series) in histogram.iter() {
        let mut label = LabelPair::default();
        label.set_name("status".to_string());
        label.set_value(class.as_str().to_string());

        let mut proto = Histogram::default();
        proto.set_sample_count(series.count());
        proto.set_sample_sum(series.sum());
        for (upper_bound, cumulative) in series.cumulative_buckets() {
            let mut bucket = Bucket::default();
            bucket.set_upper_bound(upper_bound);
            bucket.set_cumulative_count(cumulative);
            proto.mut_bucket().push(bucket);
        }

        let mut metric = Metric::default();
        metric.mut_label().push(label);
        metric.set_histogram(proto);
        family.mut_metric().push(metric);
    }

    if family.get_metric().is_empty() {
        None
    } else {
        Some(family)
    }
}
