use async_trait::async_trait;
use pihole_exporter_application::ports::{CursorStore, HostnameResolver, LogSink, QuerySource};
use pihole_exporter_domain::{DeliveryError, ExporterError, QueryRecord, SummaryTotals};
use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Mutex;

pub struct MockQuerySource {
    records: Mutex<Vec<QueryRecord>>,
    summary: Mutex<SummaryTotals>,
    fail_query_log: Mutex<bool>,
    fail_summary: Mutex<bool>,
    fetch_calls: AtomicU64,
    fetched_ranges: Mutex<Vec<(i64, i64)>>,
}

impl MockQuerySource {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            summary: Mutex::new(SummaryTotals::default()),
            fail_query_log: Mutex::new(false),
            fail_summary: Mutex::new(false),
            fetch_calls: AtomicU64::new(0),
            fetched_ranges: Mutex::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<QueryRecord>) -> Self {
        let source = Self::new();
        *source.records.lock().unwrap() = records;
        source
    }

    pub fn set_records(&self, records: Vec<QueryRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn set_summary(&self, summary: SummaryTotals) {
        *self.summary.lock().unwrap() = summary;
    }

    pub fn set_fail_query_log(&self, fail: bool) {
        *self.fail_query_log.lock().unwrap() = fail;
    }

    pub fn set_fail_summary(&self, fail: bool) {
        *self.fail_summary.lock().unwrap() = fail;
    }

    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::Relaxed)
    }

    pub fn fetched_ranges(&self) -> Vec<(i64, i64)> {
        self.fetched_ranges.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuerySource for MockQuerySource {
    async fn fetch_query_log(
        &self,
        since: i64,
        until: i64,
    ) -> Result<Vec<QueryRecord>, ExporterError> {
        self.fetch_calls.fetch_add(1, Ordering::Relaxed);
        self.fetched_ranges.lock().unwrap().push((since, until));
        if *self.fail_query_log.lock().unwrap() {
            return Err(ExporterError::SourceUnavailable(
                "mock source down".to_string(),
            ));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.timestamp >= since && r.timestamp <= until)
            .cloned()
            .collect())
    }

    async fn fetch_summary(&self) -> Result<SummaryTotals, ExporterError> {
        if *self.fail_summary.lock().unwrap() {
            return Err(ExporterError::SourceUnavailable(
                "mock summary down".to_string(),
            ));
        }
        Ok(self.summary.lock().unwrap().clone())
    }
}

pub struct MockLogSink {
    /// Outcomes consumed per push; empty queue means success.
    outcomes: Mutex<VecDeque<Result<(), DeliveryError>>>,
    pushed_batches: Mutex<Vec<Vec<QueryRecord>>>,
}

impl MockLogSink {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            pushed_batches: Mutex::new(Vec::new()),
        }
    }

    pub fn enqueue_outcome(&self, outcome: Result<(), DeliveryError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn push_count(&self) -> usize {
        self.pushed_batches.lock().unwrap().len()
    }

    pub fn pushed_batches(&self) -> Vec<Vec<QueryRecord>> {
        self.pushed_batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogSink for MockLogSink {
    async fn push(&self, records: &[QueryRecord]) -> Result<(), DeliveryError> {
        self.pushed_batches.lock().unwrap().push(records.to_vec());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

pub struct MockCursorStore {
    cursor: AtomicI64,
    advances: Mutex<Vec<i64>>,
}

impl MockCursorStore {
    pub fn starting_at(cursor: i64) -> Self {
        Self {
            cursor: AtomicI64::new(cursor),
            advances: Mutex::new(Vec::new()),
        }
    }

    pub fn current(&self) -> i64 {
        self.cursor.load(Ordering::Relaxed)
    }

    pub fn advances(&self) -> Vec<i64> {
        self.advances.lock().unwrap().clone()
    }
}

#[async_trait]
impl CursorStore for MockCursorStore {
    async fn load(&self) -> i64 {
        self.cursor.load(Ordering::Relaxed)
    }

    async fn advance(&self, to: i64) -> Result<(), ExporterError> {
        self.cursor.store(to, Ordering::Relaxed);
        self.advances.lock().unwrap().push(to);
        Ok(())
    }
}

pub struct MockHostnameResolver {
    names: HashMap<IpAddr, String>,
}

impl MockHostnameResolver {
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    pub fn with_names(entries: Vec<(&str, &str)>) -> Self {
        let names = entries
            .into_iter()
            .map(|(ip, name)| (ip.parse().unwrap(), name.to_string()))
            .collect();
        Self { names }
    }
}

#[async_trait]
impl HostnameResolver for MockHostnameResolver {
    async fn resolve_hostname(&self, ip: IpAddr) -> Option<String> {
        self.names.get(&ip).cloned()
    }
}
