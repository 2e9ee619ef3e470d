use pihole_exporter_domain::{
    ErrorCounters, LatencyClass, LatencyHistogram, QueryRecord, WindowBounds, WindowSnapshot,
};

/// Folds one completed minute of classified query records into count
/// tables, the cumulative latency histogram and the cumulative error
/// counters.
///
/// The asymmetry is deliberate: the returned `WindowSnapshot` is
/// rebuilt from scratch every cycle (a gauge answering "what happened
/// in the last minute"), while `histogram` and `errors` only ever
/// grow (answering "distribution since process start").
pub struct WindowAccumulator;

impl WindowAccumulator {
    pub fn accumulate(
        bounds: WindowBounds,
        records: &[QueryRecord],
        histogram: &mut LatencyHistogram,
        errors: &mut ErrorCounters,
    ) -> WindowSnapshot {
        let mut window = WindowSnapshot::empty(bounds.start);

        for record in records {
            // Strict window enforcement: the upstream API treats its
            // range bounds inclusively, so a record stamped exactly at
            // window_end would otherwise count twice.
            if !bounds.contains(record.timestamp) {
                continue;
            }

            window.total_processed += 1;

            *window
                .by_type
                .entry(record.query_type.clone())
                .or_insert(0) += 1;
            *window.by_status.entry(record.status.clone()).or_insert(0) += 1;
            *window
                .by_reply
                .entry(record.reply_type.clone())
                .or_insert(0) += 1;
            *window
                .by_client
                .entry(record.client_ip.clone())
                .or_insert(0) += 1;
            *window
                .by_upstream
                .entry(Self::upstream_label(record))
                .or_insert(0) += 1;

            if record.timed_out() {
                window.timeouts += 1;
            }

            if let Some(rcode) = record.rcode.as_deref() {
                if !rcode.is_empty() && rcode != "NOERROR" {
                    errors.record(rcode);
                }
            }

            // Absent or negative latency is "not observable": the
            // record still counts in every breakdown above but adds
            // no histogram observation.
            if let Some(seconds) = record.observable_latency() {
                histogram.observe(LatencyClass::from_status(&record.status), seconds);
            }
        }

        window
    }

    /// Queries answered without an upstream get a synthetic label so
    /// the upstream table still accounts for every record.
    fn upstream_label(record: &QueryRecord) -> String {
        match &record.upstream {
            Some(upstream) => upstream.clone(),
            None => match record.status.as_str() {
                "GRAVITY" | "CACHE" | "SPECIAL_DOMAIN" => format!("None-{}", record.status),
                _ => "None-OTHER".to_string(),
            },
        }
    }
}
