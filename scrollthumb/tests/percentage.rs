use scrollthumb::{scroll_percentage, ViewportMetrics};

fn metrics(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> ViewportMetrics {
    ViewportMetrics::new(scroll_top, scroll_height, viewport_height)
}

// =============================================================================
// Basic Computation
// =============================================================================

#[test]
fn test_percentage_at_top_is_zero() {
    // 800px viewport over a 2000px document, scrolled to the top
    let p = scroll_percentage(metrics(0.0, 2000.0, 800.0), Some(64.0));
    assert_eq!(p, 0.0);
}

#[test]
fn test_percentage_at_bottom_subtracts_thumb_share() {
    // max_scroll_top = 1200, offset = 100 * 64 / 800 = 8
    let p = scroll_percentage(metrics(1200.0, 2000.0, 800.0), Some(64.0));
    assert!((p - 92.0).abs() < 1e-9, "got {p}");
}

#[test]
fn test_percentage_halfway() {
    let p = scroll_percentage(metrics(600.0, 2000.0, 800.0), Some(64.0));
    assert!((p - 46.0).abs() < 1e-9, "got {p}");
}

#[test]
fn test_percentage_without_thumb_element_uses_full_range() {
    let p = scroll_percentage(metrics(1200.0, 2000.0, 800.0), None);
    assert_eq!(p, 100.0);

    let p = scroll_percentage(metrics(300.0, 2000.0, 800.0), None);
    assert_eq!(p, 25.0);
}

#[test]
fn test_percentage_ignores_unlaid_out_thumb() {
    let p = scroll_percentage(metrics(1200.0, 2000.0, 800.0), Some(0.0));
    assert_eq!(p, 100.0);

    let p = scroll_percentage(metrics(1200.0, 2000.0, 800.0), Some(f64::NAN));
    assert_eq!(p, 100.0);
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn test_percentage_zero_viewport_height() {
    assert_eq!(scroll_percentage(metrics(100.0, 2000.0, 0.0), Some(64.0)), 0.0);
    assert_eq!(scroll_percentage(metrics(100.0, 2000.0, -5.0), Some(64.0)), 0.0);
    assert_eq!(
        scroll_percentage(metrics(100.0, 2000.0, f64::NAN), Some(64.0)),
        0.0
    );
}

#[test]
fn test_percentage_nothing_to_scroll_is_zero_not_nan() {
    // Content fits the viewport exactly
    let p = scroll_percentage(metrics(0.0, 800.0, 800.0), Some(64.0));
    assert_eq!(p, 0.0);
    assert!(!p.is_nan());

    // Scroll offset reported anyway
    let p = scroll_percentage(metrics(10.0, 800.0, 800.0), None);
    assert_eq!(p, 0.0);

    // Content shorter than the viewport
    let p = scroll_percentage(metrics(0.0, 500.0, 800.0), Some(64.0));
    assert_eq!(p, 0.0);
}

#[test]
fn test_percentage_negative_overscroll_clamps_to_zero() {
    let p = scroll_percentage(metrics(-120.0, 2000.0, 800.0), Some(64.0));
    assert_eq!(p, 0.0);
}

#[test]
fn test_percentage_past_end_overscroll_clamps_to_hundred() {
    let p = scroll_percentage(metrics(5000.0, 2000.0, 800.0), None);
    assert_eq!(p, 100.0);
}

#[test]
fn test_percentage_thumb_taller_than_viewport() {
    // Offset saturates at 100, so the thumb stays at the top
    let p = scroll_percentage(metrics(600.0, 2000.0, 800.0), Some(1600.0));
    assert_eq!(p, 0.0);
}

#[test]
fn test_percentage_nan_scroll_top() {
    let p = scroll_percentage(metrics(f64::NAN, 2000.0, 800.0), Some(64.0));
    assert_eq!(p, 0.0);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_percentage_in_range_for_every_offset() {
    let viewport = 800.0;
    let document = 2000.0;
    let max = document - viewport;

    for thumb in [None, Some(6.0), Some(64.0), Some(400.0)] {
        let mut s = 0.0;
        while s <= max {
            let p = scroll_percentage(metrics(s, document, viewport), thumb);
            assert!((0.0..=100.0).contains(&p), "s={s} thumb={thumb:?} p={p}");
            s += 7.5;
        }
    }
}

#[test]
fn test_percentage_monotonic_in_scroll_top() {
    let mut prev = 0.0;
    for i in 0..=120 {
        let p = scroll_percentage(metrics(i as f64 * 10.0, 2000.0, 800.0), Some(64.0));
        assert!(p >= prev, "not monotonic at {i}");
        prev = p;
    }
}
