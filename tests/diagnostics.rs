//! Tests for the leak-warning diagnostics of `Emitter<A>`.
//!
//! Kept in their own test binary: each test installs a thread-scoped
//! subscriber that counts `WARN` events.

use emittable::{Emitter, EmitterConfig, Listener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Counts `WARN`-level events.
struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Helper: run `f` under a counting subscriber and return the warn count.
fn count_warnings(f: impl FnOnce()) -> usize {
    let warnings = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&warnings)));
    tracing::subscriber::with_default(subscriber, f);
    warnings.load(Ordering::SeqCst)
}

fn emitter_with_threshold(threshold: usize) -> Emitter<i32> {
    let config = EmitterConfig::new()
        .with_label("diagnostics")
        .with_leak_warning_threshold(threshold);
    Emitter::with_config(config).unwrap()
}

// ============================================================================
// Warning per crossing
// ============================================================================

#[test]
fn no_warning_at_or_below_threshold() {
    let warnings = count_warnings(|| {
        let emitter = emitter_with_threshold(2);
        emitter.on_fn("foo", |_| {});
        emitter.on_fn("foo", |_| {});
    });
    assert_eq!(warnings, 0);
}

#[test]
fn warns_once_when_threshold_is_crossed() {
    let warnings = count_warnings(|| {
        let emitter = emitter_with_threshold(2);
        for _ in 0..3 {
            emitter.on_fn("foo", |_| {});
        }
    });
    assert_eq!(warnings, 1, "crossing to threshold + 1 should warn");

    let warnings = count_warnings(|| {
        let emitter = emitter_with_threshold(2);
        for _ in 0..5 {
            emitter.on_fn("foo", |_| {});
        }
    });
    assert_eq!(warnings, 1, "growing past threshold + 1 should stay quiet");
}

#[test]
fn warns_again_after_dropping_below_and_crossing_again() {
    let warnings = count_warnings(|| {
        let emitter = emitter_with_threshold(2);
        let first = Listener::new(|_: &i32| {});
        let second = Listener::new(|_: &i32| {});

        emitter.on("foo", &first).on("foo", &second);
        emitter.on_fn("foo", |_| {});

        emitter.off("foo", &first).off("foo", &second);
        assert_eq!(emitter.listener_count("foo"), 1);

        emitter.on_fn("foo", |_| {});
        emitter.on_fn("foo", |_| {});
    });
    assert_eq!(warnings, 2);
}

#[test]
fn each_event_crosses_independently() {
    let warnings = count_warnings(|| {
        let emitter = emitter_with_threshold(1);
        for event in ["a", "a", "b", "b", "c"] {
            emitter.on_fn(event, |_| {});
        }
    });
    assert_eq!(warnings, 2);
}

#[test]
fn once_registrations_count_toward_threshold() {
    let warnings = count_warnings(|| {
        let emitter = emitter_with_threshold(1);
        let cb = Listener::new(|_: &i32| {});
        emitter.once("foo", &cb).once("foo", &cb);
    });
    assert_eq!(warnings, 1);
}

#[test]
fn no_warning_without_threshold() {
    let warnings = count_warnings(|| {
        let emitter: Emitter<i32> = Emitter::new();
        for _ in 0..100 {
            emitter.on_fn("foo", |_| {});
        }
    });
    assert_eq!(warnings, 0);
}

// ============================================================================
// Threshold bounds
// ============================================================================

#[test]
fn max_threshold_registers_without_overflow() {
    let config =
        EmitterConfig::from_json(&format!(r#"{{"leakWarningThreshold": {}}}"#, usize::MAX))
            .unwrap();
    let emitter: Emitter<i32> = Emitter::with_config(config).unwrap();

    let warnings = count_warnings(|| {
        emitter.on_fn("foo", |_| {});
        emitter.once("foo", &Listener::new(|_: &i32| {}));
    });

    assert_eq!(warnings, 0);
    assert_eq!(emitter.listener_count("foo"), 2);
}
