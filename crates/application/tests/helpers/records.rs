use pihole_exporter_domain::QueryRecord;

pub fn make_record(timestamp: i64, status: &str, reply_time: Option<f64>) -> QueryRecord {
    QueryRecord {
        timestamp,
        domain: "example.com".to_string(),
        query_type: "A".to_string(),
        status: status.to_string(),
        reply_type: "IP".to_string(),
        reply_time,
        client_ip: "192.168.1.50".to_string(),
        client_name: None,
        upstream: Some("8.8.8.8#53".to_string()),
        rcode: Some("NOERROR".to_string()),
    }
}
