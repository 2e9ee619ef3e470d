use pihole_exporter_application::{ScrapeCycleUseCase, SnapshotPublisher};
use pihole_exporter_domain::{LatencyClass, SummaryTotals, SEEDED_RCODES};
use std::sync::Arc;

mod helpers;
use helpers::{make_record, MockQuerySource};

fn make_cycle(source: Arc<MockQuerySource>) -> (ScrapeCycleUseCase, Arc<SnapshotPublisher>) {
    let publisher = Arc::new(SnapshotPublisher::new());
    let cycle = ScrapeCycleUseCase::new(source, publisher.clone());
    (cycle, publisher)
}

#[tokio::test]
async fn test_cycle_publishes_window_and_summary() {
    let source = Arc::new(MockQuerySource::with_records(vec![
        make_record(70, "CACHE", Some(0.002)),
        make_record(80, "FORWARDED", Some(0.05)),
    ]));
    source.set_summary(SummaryTotals {
        queries_total: 500,
        queries_cached: 100,
        ..Default::default()
    });
    let (cycle, publisher) = make_cycle(source.clone());

    cycle.execute_at(130).await.unwrap();

    let snapshot = publisher.load();
    assert_eq!(snapshot.scraped_at, 130);
    assert_eq!(snapshot.window.window_start, 60);
    assert_eq!(snapshot.window.total_processed, 2);
    assert_eq!(snapshot.summary.queries_total, 500);
    assert_eq!(snapshot.histogram.total_count(), 2);
}

#[tokio::test]
async fn test_cycle_requests_the_previous_full_minute() {
    let source = Arc::new(MockQuerySource::new());
    let (cycle, _) = make_cycle(source.clone());

    cycle.execute_at(137).await.unwrap();

    assert_eq!(source.fetched_ranges(), vec![(60, 120)]);
}

#[tokio::test]
async fn test_failed_window_fetch_keeps_previous_snapshot() {
    let source = Arc::new(MockQuerySource::with_records(vec![make_record(
        70,
        "CACHE",
        Some(0.002),
    )]));
    let (cycle, publisher) = make_cycle(source.clone());

    cycle.execute_at(130).await.unwrap();
    let before = publisher.load();

    source.set_fail_query_log(true);
    assert!(cycle.execute_at(190).await.is_err());

    let after = publisher.load();
    assert_eq!(before.scraped_at, after.scraped_at);
    assert_eq!(before.window, after.window);
}

#[tokio::test]
async fn test_failed_summary_fetch_aborts_without_partial_state() {
    let source = Arc::new(MockQuerySource::with_records(vec![make_record(
        70,
        "CACHE",
        Some(0.002),
    )]));
    let (cycle, publisher) = make_cycle(source.clone());

    source.set_fail_summary(true);
    assert!(cycle.execute_at(130).await.is_err());

    // Nothing published, and the cumulative histogram did not advance
    // behind the readers' backs.
    assert_eq!(publisher.load().histogram.total_count(), 0);

    // The aborted cycle's records are re-observed once the summary
    // fetch recovers; no observations were lost or double counted.
    source.set_fail_summary(false);
    cycle.execute_at(130).await.unwrap();
    assert_eq!(publisher.load().histogram.total_count(), 1);
}

#[tokio::test]
async fn test_histogram_is_cumulative_across_cycles() {
    let source = Arc::new(MockQuerySource::with_records(vec![make_record(
        70,
        "CACHE",
        Some(0.002),
    )]));
    let (cycle, publisher) = make_cycle(source.clone());

    cycle.execute_at(130).await.unwrap();
    assert_eq!(publisher.load().histogram.total_count(), 1);

    // Second cycle over a later, empty window.
    source.set_records(vec![]);
    cycle.execute_at(190).await.unwrap();

    let snapshot = publisher.load();
    assert_eq!(snapshot.window.total_processed, 0);
    assert_eq!(snapshot.histogram.total_count(), 1);
    assert_eq!(
        snapshot
            .histogram
            .series(LatencyClass::Cache)
            .unwrap()
            .count(),
        1
    );
}

#[tokio::test]
async fn test_window_counts_do_not_leak_between_cycles() {
    let source = Arc::new(MockQuerySource::with_records(vec![
        make_record(70, "CACHE", None),
        make_record(75, "CACHE", None),
    ]));
    let (cycle, publisher) = make_cycle(source.clone());

    cycle.execute_at(130).await.unwrap();
    assert_eq!(publisher.load().window.by_status.get("CACHE"), Some(&2));

    source.set_records(vec![make_record(135, "FORWARDED", None)]);
    cycle.execute_at(190).await.unwrap();

    let window = &publisher.load().window;
    assert_eq!(window.by_status.get("CACHE"), None);
    assert_eq!(window.by_status.get("FORWARDED"), Some(&1));
}

#[tokio::test]
async fn test_seeded_error_codes_always_published() {
    let source = Arc::new(MockQuerySource::new());
    let (cycle, publisher) = make_cycle(source);

    cycle.execute_at(130).await.unwrap();

    let snapshot = publisher.load();
    for code in SEEDED_RCODES {
        assert_eq!(snapshot.errors.get(code), 0, "{code} must be present");
    }
}
