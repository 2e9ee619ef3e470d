use pihole_exporter_domain::QueryRecord;
use pihole_exporter_infrastructure::loki::payload::build_payload;

fn record(timestamp: i64, domain: &str, client_ip: &str, client_name: Option<&str>) -> QueryRecord {
    QueryRecord {
        timestamp,
        domain: domain.to_string(),
        query_type: "A".to_string(),
        status: "FORWARDED".to_string(),
        reply_type: "IP".to_string(),
        reply_time: Some(0.021),
        client_ip: client_ip.to_string(),
        client_name: client_name.map(str::to_string),
        upstream: Some("1.1.1.1#53".to_string()),
        rcode: Some("NOERROR".to_string()),
    }
}

#[test]
fn test_records_with_same_labels_share_one_stream() {
    let records = vec![
        record(100, "a.com", "10.0.0.1", Some("laptop")),
        record(101, "a.com", "10.0.0.1", Some("laptop")),
    ];
    let payload = build_payload(&records, "pihole.lan");

    let streams = payload["streams"].as_array().unwrap();
    assert_eq!(streams.len(), 1);
    assert_eq!(streams[0]["values"].as_array().unwrap().len(), 2);
    assert_eq!(streams[0]["stream"]["job"], "pihole_logs_exporter");
    assert_eq!(streams[0]["stream"]["service"], "pihole_query_log");
    assert_eq!(streams[0]["stream"]["host"], "pihole.lan");
    assert_eq!(streams[0]["stream"]["client_name"], "laptop");
}

#[test]
fn test_differing_labels_split_streams() {
    let records = vec![
        record(100, "a.com", "10.0.0.1", None),
        record(100, "b.com", "10.0.0.1", None),
    ];
    let payload = build_payload(&records, "pihole.lan");
    assert_eq!(payload["streams"].as_array().unwrap().len(), 2);
}

#[test]
fn test_timestamps_are_nanoseconds_and_lines_carry_the_record() {
    let payload = build_payload(&[record(100, "a.com", "10.0.0.1", None)], "pihole.lan");

    let value = &payload["streams"][0]["values"][0];
    assert_eq!(value[0], "100000000000");

    let line: serde_json::Value = serde_json::from_str(value[1].as_str().unwrap()).unwrap();
    assert_eq!(line["domain"], "a.com");
    assert_eq!(line["reply_time"], 0.021);
    assert_eq!(line["upstream"], "1.1.1.1#53");
    // Unresolved client falls back to the raw address.
    assert_eq!(line["client_name"], "10.0.0.1");
}

#[test]
fn test_empty_batch_builds_empty_streams() {
    let payload = build_payload(&[], "pihole.lan");
    assert_eq!(payload["streams"].as_array().unwrap().len(), 0);
}
