//! Suspend/resume accounting across nested and interleaved regions
//!
//! Exact-arithmetic variants run on a ManualClock; the real-clock smoke
//! tests sleep and use generous upper bounds to stay robust on loaded CI.

use std::thread::sleep;
use std::time::Duration;

use medir::clock::ManualClock;
use medir::profiler::Profiler;

fn profiler_on(clock: &ManualClock) -> Profiler {
    Profiler::with_clock(Box::new(clock.clone()))
}

#[test]
fn test_scenario_single_timer_real_clock() {
    let mut profiler = Profiler::new();

    profiler.start("a");
    sleep(Duration::from_millis(10));
    profiler.stop("a");

    let elapsed = profiler.elapsed_time("a");
    assert!(elapsed >= 0.010, "elapsed {elapsed} below sleep duration");
    assert!(elapsed < 0.100, "elapsed {elapsed} implausibly large");
    assert_eq!(profiler.count("a"), 1);
}

#[test]
fn test_scenario_nested_suspension_excluded_from_parent() {
    let clock = ManualClock::new();
    let mut profiler = profiler_on(&clock);

    profiler.start("a");
    profiler.start("b");
    clock.advance(0.005);
    profiler.stop("b");
    clock.advance(0.005);
    profiler.stop("a");

    assert!((profiler.running("b") - 0.005).abs() < 1e-9);
    assert!((profiler.running("a") - 0.005).abs() < 1e-9);

    let overall = clock.now() - profiler.init_time();
    let attributed = profiler.running("a") + profiler.running("b");
    assert!((attributed - overall).abs() < 1e-6);
}

#[test]
fn test_scenario_measure_three_invocations() {
    let clock = ManualClock::new();
    let mut profiler = profiler_on(&clock);

    for _ in 0..3 {
        profiler.measure("x", |_p| clock.advance(0.003));
    }

    assert_eq!(profiler.count("x"), 3);
    assert!((profiler.running("x") - 0.009).abs() < 1e-9);
}

#[test]
fn test_stack_depth_restored_after_balanced_sequence() {
    let clock = ManualClock::new();
    let mut profiler = profiler_on(&clock);
    assert_eq!(profiler.stack_depth(), 0);

    profiler.start("a");
    profiler.start("b");
    profiler.start("c");
    assert_eq!(profiler.stack_depth(), 3);
    profiler.stop("c");
    profiler.stop("b");
    profiler.stop("a");

    assert_eq!(profiler.stack_depth(), 0);
    assert_eq!(profiler.active(), None);
}

#[test]
fn test_three_level_nesting_attributes_each_layer() {
    let clock = ManualClock::new();
    let mut profiler = profiler_on(&clock);

    profiler.start("outer");
    clock.advance(0.001);
    profiler.start("middle");
    clock.advance(0.002);
    profiler.start("inner");
    clock.advance(0.004);
    profiler.stop("inner");
    clock.advance(0.002);
    profiler.stop("middle");
    clock.advance(0.001);
    profiler.stop("outer");

    assert!((profiler.running("inner") - 0.004).abs() < 1e-9);
    assert!((profiler.running("middle") - 0.004).abs() < 1e-9);
    assert!((profiler.running("outer") - 0.002).abs() < 1e-9);
}

#[test]
fn test_sibling_regions_under_one_parent() {
    let clock = ManualClock::new();
    let mut profiler = profiler_on(&clock);

    profiler.start("parent");
    for _ in 0..4 {
        profiler.start("child");
        clock.advance(0.002);
        profiler.stop("child");
        clock.advance(0.001);
    }
    profiler.stop("parent");

    assert_eq!(profiler.count("child"), 4);
    assert!((profiler.running("child") - 0.008).abs() < 1e-9);
    assert!((profiler.running("parent") - 0.004).abs() < 1e-9);
}

#[test]
fn test_mismatched_nesting_is_defined_behavior() {
    let clock = ManualClock::new();
    let mut profiler = profiler_on(&clock);

    profiler.start("a");
    clock.advance(0.001);
    profiler.start("b");
    clock.advance(0.001);

    // stops out of order: tolerated, never panics, stack still drains
    profiler.stop("a");
    profiler.stop("b");
    profiler.stop("c"); // never started, empty stack underneath

    assert_eq!(profiler.stack_depth(), 0);
    assert_eq!(profiler.count("c"), 0);
    let report = profiler.report();
    assert!(report.rows.iter().all(|row| row.percent.is_finite()));
}

#[test]
fn test_unstopped_timer_counts_as_missed() {
    let clock = ManualClock::new();
    let mut profiler = profiler_on(&clock);

    profiler.start("leaked");
    clock.advance(0.050);

    // the open slice is not flushed by report()
    let report = profiler.report();
    assert_eq!(report.rows[0].seconds, 0.0);
    assert!((report.missed_seconds - 0.050).abs() < 1e-9);

    // an explicit stop recovers the time
    profiler.stop("leaked");
    assert!((profiler.running("leaked") - 0.050).abs() < 1e-9);
}
