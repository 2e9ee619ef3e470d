//! Wire shapes of the Pi-hole v6 API, mapped into domain types.
//!
//! Individual malformed query entries are skipped with a warning
//! rather than failing the whole batch.

use pihole_exporter_domain::{QueryRecord, SummaryTotals, UpstreamTotal};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct QueryLogResponse {
    #[serde(default)]
    pub queries: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ApiQuery {
    time: f64,
    #[serde(rename = "type")]
    query_type: String,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    status: Option<String>,
    client: ApiClient,
    reply: ApiReply,
    #[serde(default)]
    upstream: Option<String>,
    #[serde(default)]
    rcode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiClient {
    ip: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    #[serde(rename = "type", default)]
    reply_type: Option<String>,
    #[serde(default)]
    time: Option<f64>,
}

impl QueryLogResponse {
    /// Map raw entries to domain records, skipping the malformed
    /// ones. Returns the records plus how many entries were dropped.
    pub fn into_records(self) -> (Vec<QueryRecord>, usize) {
        let mut records = Vec::with_capacity(self.queries.len());
        let mut parse_errors = 0;

        for value in self.queries {
            match serde_json::from_value::<ApiQuery>(value) {
                Ok(query) => records.push(QueryRecord {
                    timestamp: query.time as i64,
                    domain: query.domain.unwrap_or_default(),
                    query_type: query.query_type,
                    status: query.status.unwrap_or_else(|| "UNKNOWN".to_string()),
                    reply_type: query.reply.reply_type.unwrap_or_else(|| "NONE".to_string()),
                    reply_time: query.reply.time,
                    client_ip: query.client.ip,
                    client_name: query.client.name,
                    upstream: query.upstream,
                    rcode: query.rcode,
                }),
                Err(e) => {
                    parse_errors += 1;
                    warn!(error = %e, "skipping malformed query record");
                }
            }
        }

        (records, parse_errors)
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    pub queries: SummaryQueries,
    pub clients: SummaryClients,
    pub gravity: SummaryGravity,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQueries {
    pub total: i64,
    pub blocked: i64,
    pub unique_domains: i64,
    pub forwarded: i64,
    pub cached: i64,
    #[serde(default)]
    pub types: BTreeMap<String, i64>,
    #[serde(default)]
    pub status: BTreeMap<String, i64>,
    #[serde(default)]
    pub replies: BTreeMap<String, i64>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryClients {
    pub active: i64,
    pub total: i64,
}

#[derive(Debug, Deserialize)]
pub struct SummaryGravity {
    pub domains_being_blocked: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamsResponse {
    #[serde(default)]
    pub upstreams: Vec<ApiUpstream>,
}

#[derive(Debug, Deserialize)]
pub struct ApiUpstream {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub count: i64,
}

pub fn merge_summary(summary: SummaryResponse, upstreams: UpstreamsResponse) -> SummaryTotals {
    SummaryTotals {
        queries_total: summary.queries.total,
        queries_blocked: summary.queries.blocked,
        unique_domains: summary.queries.unique_domains,
        queries_forwarded: summary.queries.forwarded,
        queries_cached: summary.queries.cached,
        clients_active: summary.clients.active,
        clients_total: summary.clients.total,
        gravity_domains: summary.gravity.domains_being_blocked,
        by_type: summary.queries.types,
        by_status: summary.queries.status,
        by_reply: summary.queries.replies,
        upstreams: upstreams
            .upstreams
            .into_iter()
            .map(|u| UpstreamTotal {
                ip: u.ip.unwrap_or_else(|| "None".to_string()),
                name: u.name.unwrap_or_default(),
                port: u.port,
                count: u.count,
            })
            .collect(),
    }
}
