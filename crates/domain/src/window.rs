use std::collections::BTreeMap;

/// Response codes that are always exported, even at zero, so absence
/// of errors is visible as a `0` series rather than a missing one.
pub const SEEDED_RCODES: [&str; 5] = ["SERVFAIL", "NXDOMAIN", "REFUSED", "FORMERR", "NOTIMP"];

/// One completed, non-overlapping minute interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub start: i64,
    pub end: i64,
}

impl WindowBounds {
    /// The previous full minute as of `now`: still-filling minutes are
    /// never aggregated.
    pub fn previous_minute(now: i64) -> Self {
        let end = now / 60 * 60;
        Self { start: end - 60, end }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp < self.end
    }
}

/// Per-cycle breakdown counts for one completed window.
///
/// Replaced wholesale each scrape cycle; values are snapshot gauges,
/// not accumulating counters, and readers must not assume
/// monotonicity across cycles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowSnapshot {
    pub window_start: i64,
    pub by_type: BTreeMap<String, u64>,
    pub by_status: BTreeMap<String, u64>,
    pub by_reply: BTreeMap<String, u64>,
    pub by_client: BTreeMap<String, u64>,
    pub by_upstream: BTreeMap<String, u64>,
    pub timeouts: u64,
    pub total_processed: u64,
}

impl WindowSnapshot {
    pub fn empty(window_start: i64) -> Self {
        Self {
            window_start,
            ..Default::default()
        }
    }
}

/// Cumulative per-response-code error counters.
///
/// The exported code set is the union of the seeded well-known codes
/// and every code observed so far; it never shrinks.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorCounters {
    counts: BTreeMap<String, u64>,
}

impl Default for ErrorCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorCounters {
    pub fn new() -> Self {
        let counts = SEEDED_RCODES
            .iter()
            .map(|code| (code.to_string(), 0))
            .collect();
        Self { counts }
    }

    pub fn record(&mut self, rcode: &str) {
        *self.counts.entry(rcode.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, rcode: &str) -> u64 {
        self.counts.get(rcode).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(code, count)| (code.as_str(), *count))
    }
}
