use pihole_exporter_domain::{ErrorCounters, WindowBounds, SEEDED_RCODES};

#[test]
fn test_previous_minute_excludes_still_filling_minute() {
    // 10:02:17 -> window is [10:01:00, 10:02:00)
    let now = 36137;
    let bounds = WindowBounds::previous_minute(now);
    assert_eq!(bounds.start, 36060);
    assert_eq!(bounds.end, 36120);
}

#[test]
fn test_window_bounds_are_half_open() {
    let bounds = WindowBounds::previous_minute(120);
    assert_eq!(bounds.start, 60);
    assert_eq!(bounds.end, 120);
    assert!(bounds.contains(60));
    assert!(bounds.contains(119));
    assert!(!bounds.contains(120));
    assert!(!bounds.contains(59));
}

#[test]
fn test_exact_minute_boundary_still_uses_previous_full_minute() {
    let bounds = WindowBounds::previous_minute(180);
    assert_eq!(bounds.start, 120);
    assert_eq!(bounds.end, 180);
}

#[test]
fn test_error_counters_seeded_at_zero() {
    let counters = ErrorCounters::new();
    for code in SEEDED_RCODES {
        assert_eq!(counters.get(code), 0, "{code} must be seeded");
    }
    assert_eq!(counters.iter().count(), SEEDED_RCODES.len());
}

#[test]
fn test_error_counters_union_never_shrinks() {
    let mut counters = ErrorCounters::new();
    counters.record("SERVFAIL");
    counters.record("WEIRD_NEW_CODE");
    counters.record("WEIRD_NEW_CODE");

    assert_eq!(counters.get("SERVFAIL"), 1);
    assert_eq!(counters.get("WEIRD_NEW_CODE"), 2);
    // Seeded codes remain present even without occurrences.
    assert_eq!(counters.get("NXDOMAIN"), 0);
    assert_eq!(counters.iter().count(), SEEDED_RCODES.len() + 1);
}
