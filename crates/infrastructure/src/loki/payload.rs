//! Loki push payload construction.
//!
//! Records sharing a label set are grouped into one stream; values
//! carry nanosecond timestamps and the full record as a flat JSON
//! line, matching what Loki's push API expects.

use pihole_exporter_domain::QueryRecord;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub fn build_payload(records: &[QueryRecord], host: &str) -> Value {
    let mut streams: BTreeMap<Vec<(String, String)>, Vec<Value>> = BTreeMap::new();

    for record in records {
        let client_name = record
            .client_name
            .clone()
            .unwrap_or_else(|| record.client_ip.clone());

        let labels = vec![
            ("client_ip".to_string(), record.client_ip.clone()),
            ("client_name".to_string(), client_name.clone()),
            ("domain".to_string(), record.domain.clone()),
            ("host".to_string(), host.to_string()),
            ("job".to_string(), "pihole_logs_exporter".to_string()),
            ("service".to_string(), "pihole_query_log".to_string()),
            ("status".to_string(), record.status.clone()),
            ("type".to_string(), record.query_type.clone()),
        ];

        let timestamp_ns = (record.timestamp as i128 * 1_000_000_000).to_string();
        let line = json!({
            "time": record.timestamp,
            "type": record.query_type,
            "domain": record.domain,
            "status": record.status,
            "reply_type": record.reply_type,
            "reply_time": record.reply_time,
            "client_ip": record.client_ip,
            "client_name": client_name,
            "upstream": record.upstream,
            "rcode": record.rcode,
        })
        .to_string();

        streams
            .entry(labels)
            .or_default()
            .push(json!([timestamp_ns, line]));
    }

    let streams: Vec<Value> = streams
        .into_iter()
        .map(|(labels, values)| {
            let stream: BTreeMap<String, String> = labels.into_iter().collect();
            json!({ "stream": stream, "values": values })
        })
        .collect();

    json!({ "streams": streams })
}
