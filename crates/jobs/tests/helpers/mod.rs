#![allow(dead_code)]

use async_trait::async_trait;
use pihole_exporter_application::ports::{CursorStore, HostnameResolver, LogSink, QuerySource};
use pihole_exporter_domain::{DeliveryError, ExporterError, QueryRecord, SummaryTotals};
use std::net::IpAddr;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

pub struct CountingQuerySource {
    records: Vec<QueryRecord>,
    fetch_calls: AtomicU64,
    summary_calls: AtomicU64,
}

impl CountingQuerySource {
    pub fn new(records: Vec<QueryRecord>) -> Self {
        Self {
            records,
            fetch_calls: AtomicU64::new(0),
            summary_calls: AtomicU64::new(0),
        }
    }

    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::Relaxed)
    }

    pub fn summary_calls(&self) -> u64 {
        self.summary_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuerySource for CountingQuerySource {
    async fn fetch_query_log(
        &self,
        since: i64,
        until: i64,
    ) -> Result<Vec<QueryRecord>, ExporterError> {
        self.fetch_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .records
            .iter()
            .filter(|r| r.timestamp >= since && r.timestamp <= until)
            .cloned()
            .collect())
    }

    async fn fetch_summary(&self) -> Result<SummaryTotals, ExporterError> {
        self.summary_calls.fetch_add(1, Ordering::Relaxed);
        Ok(SummaryTotals::default())
    }
}

pub struct CountingLogSink {
    push_calls: AtomicU64,
}

impl CountingLogSink {
    pub fn new() -> Self {
        Self {
            push_calls: AtomicU64::new(0),
        }
    }

    pub fn push_calls(&self) -> u64 {
        self.push_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LogSink for CountingLogSink {
    async fn push(&self, _records: &[QueryRecord]) -> Result<(), DeliveryError> {
        self.push_calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

pub struct InMemoryCursorStore {
    cursor: AtomicI64,
}

impl InMemoryCursorStore {
    pub fn starting_at(cursor: i64) -> Self {
        Self {
            cursor: AtomicI64::new(cursor),
        }
    }

    pub fn current(&self) -> i64 {
        self.cursor.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CursorStore for InMemoryCursorStore {
    async fn load(&self) -> i64 {
        self.cursor.load(Ordering::Relaxed)
    }

    async fn advance(&self, to: i64) -> Result<(), ExporterError> {
        self.cursor.store(to, Ordering::Relaxed);
        Ok(())
    }
}

pub struct NullHostnameResolver;

#[async_trait]
impl HostnameResolver for NullHostnameResolver {
    async fn resolve_hostname(&self, _ip: IpAddr) -> Option<String> {
        None
    }
}

pub fn make_record(timestamp: i64) -> QueryRecord {
    QueryRecord {
        timestamp,
        domain: "example.com".to_string(),
        query_type: "A".to_string(),
        status: "FORWARDED".to_string(),
        reply_type: "IP".to_string(),
        reply_time: Some(0.01),
        client_ip: "192.168.1.50".to_string(),
        client_name: None,
        upstream: Some("8.8.8.8#53".to_string()),
        rcode: Some("NOERROR".to_string()),
    }
}
