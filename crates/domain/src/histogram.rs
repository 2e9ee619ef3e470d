use crate::status::LatencyClass;
use std::collections::BTreeMap;

/// Latency bucket upper bounds in seconds. An implicit +Inf bucket is
/// always present on top.
pub const LATENCY_BUCKETS: [f64; 10] =
    [0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0];

/// Cumulative latency histogram, one series per `LatencyClass`.
///
/// Unlike the per-minute window counts, observations accumulate for
/// the lifetime of the process and are never reset: the histogram
/// answers "distribution since process start".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatencyHistogram {
    series: BTreeMap<LatencyClass, HistogramSeries>,
}

/// Per-bucket counts for one class. `buckets[i]` counts observations
/// `<= LATENCY_BUCKETS[i]` (non-cumulative between buckets; rendering
/// layers accumulate them into `le` counts).
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    buckets: [u64; LATENCY_BUCKETS.len()],
    overflow: u64,
    sum: f64,
    count: u64,
}

impl Default for HistogramSeries {
    fn default() -> Self {
        Self {
            buckets: [0; LATENCY_BUCKETS.len()],
            overflow: 0,
            sum: 0.0,
            count: 0,
        }
    }
}

impl HistogramSeries {
    fn observe(&mut self, value: f64) {
        match LATENCY_BUCKETS.iter().position(|upper| value <= *upper) {
            Some(idx) => self.buckets[idx] += 1,
            None => self.overflow += 1,
        }
        self.sum += value;
        self.count += 1;
    }

    /// Cumulative counts per bucket boundary, ending with the +Inf
    /// count (== total observations).
    pub fn cumulative_buckets(&self) -> Vec<(f64, u64)> {
        let mut running = 0u64;
        let mut out = Vec::with_capacity(LATENCY_BUCKETS.len() + 1);
        for (upper, count) in LATENCY_BUCKETS.iter().zip(self.buckets.iter()) {
            running += count;
            out.push((*upper, running));
        }
        out.push((f64::INFINITY, running + self.overflow));
        out
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl LatencyHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, class: LatencyClass, seconds: f64) {
        self.series.entry(class).or_default().observe(seconds);
    }

    pub fn series(&self, class: LatencyClass) -> Option<&HistogramSeries> {
        self.series.get(&class)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LatencyClass, &HistogramSeries)> {
        self.series.iter().map(|(class, s)| (*class, s))
    }

    /// Total observations across all classes.
    pub fn total_count(&self) -> u64 {
        self.series.values().map(|s| s.count).sum()
    }
}
