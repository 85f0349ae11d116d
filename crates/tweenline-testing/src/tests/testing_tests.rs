use super::*;

use crate::{Event, EventLog, ProbeOperation, RecordedValue};
use tweenline_core::{OperationCore, OperationRef, PropertyOperation, TweenSpec};

#[test]
fn advance_frame_counts_frames_and_time() {
    let mut rule = ExecutorTestRule::new().with_frame_time(0.25);
    rule.advance_frames(4);
    assert_eq!(rule.frames(), 4);
    assert_eq!(rule.elapsed(), 1.0);
    assert!(rule.is_idle());
}

#[test]
fn pump_until_idle_reports_frames_taken() {
    let _ = env_logger::try_init();
    let log = EventLog::new();
    let mut rule = ExecutorTestRule::new().with_frame_time(0.25);
    rule.add(ProbeOperation::handle("a", 1.0, &log));
    assert_eq!(rule.active_count(), 1);

    assert_eq!(rule.pump_until_idle(), 4);
    assert_eq!(
        log.events_of("a"),
        [
            Event::Started,
            Event::Ticked(0.25),
            Event::Ticked(0.5),
            Event::Ticked(0.75),
            Event::Ticked(1.0),
            Event::Completed,
        ]
    );
}

#[test]
#[should_panic(expected = "pump_until_idle gave up")]
fn pump_until_idle_panics_on_endless_operations() {
    let log = EventLog::new();
    let mut rule = ExecutorTestRule::new();
    let core = OperationCore::without_default_expiration();
    rule.add(OperationRef::new(ProbeOperation::with_core("forever", core, &log)));
    rule.pump_until_idle();
}

#[test]
fn recorded_value_tracks_writes_only() {
    let value = RecordedValue::new(0.0f32);
    value.set(2.0);
    assert_eq!(value.write_count(), 0);

    run_test_executor(|rule| {
        rule.add(OperationRef::new(PropertyOperation::lerp(
            value.reader(),
            value.writer(),
            4.0,
            TweenSpec::linear(2.0 * DEFAULT_FRAME_TIME),
        )));
        rule.pump_until_idle();
    });

    assert_eq!(value.get(), 4.0);
    assert_eq!(value.last_write(), Some(4.0));
    assert_eq!(value.writes().first(), Some(&3.0));
}

#[test]
fn event_log_ordering_helpers() {
    let log = EventLog::new();
    let mut rule = ExecutorTestRule::new().with_frame_time(0.5);
    rule.add(ProbeOperation::handle("slow", 2.0, &log));
    rule.advance_frame();
    rule.add(ProbeOperation::handle("fast", 0.5, &log));
    rule.pump_until_idle();

    assert!(log.has_completed("fast"));
    assert!(log.overlaps("fast", "slow"));
    assert!(log.position("slow", Event::Ticked(0.0)) < log.position("fast", Event::Started));
    assert_eq!(log.events_of("slow").last(), Some(&Event::Completed));
    assert_eq!(log.len(), 9);
}
