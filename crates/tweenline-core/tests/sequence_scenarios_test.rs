//! Sequences driven through an executor, including the early-expiry quirk
//! where a sequence leaves its executor while its last child still runs.

use tweenline_core::{
    Executor, Filter, Handle, LambdaOperation, OperationKind, OperationRef, Phase, Sequence,
    TweenSpec,
};
use tweenline_testing::{Event, EventLog, ExecutorTestRule, ProbeOperation};

#[test]
fn children_run_one_at_a_time_in_order() {
    let _ = env_logger::try_init();
    let log = EventLog::new();
    let children = [
        ProbeOperation::handle("a", 0.5, &log),
        ProbeOperation::handle("b", 0.5, &log),
        ProbeOperation::handle("c", 0.5, &log),
    ];
    let sequence = Handle::new(
        children
            .iter()
            .fold(Sequence::new(), |seq, child| seq.then(child)),
    );
    let mut rule = ExecutorTestRule::new().with_frame_time(0.25);
    rule.add(&sequence);

    let mut registration_order = Vec::new();
    for _ in 0..50 {
        if rule.is_idle() {
            break;
        }
        rule.advance_frame();
        let registered: Vec<_> = children
            .iter()
            .filter(|child| rule.executor().contains(&child.erase()))
            .map(|child| child.with(ProbeOperation::name))
            .collect();
        assert!(registered.len() <= 1, "more than one child live: {registered:?}");
        if let Some(name) = registered.first() {
            if registration_order.last() != Some(name) {
                registration_order.push(*name);
            }
        }
        let queued = sequence.with(|seq| seq.len());
        if queued > 0 {
            assert!(
                rule.executor().contains(&sequence.erase()),
                "sequence left with {queued} children queued"
            );
        }
    }

    assert!(rule.is_idle());
    assert_eq!(registration_order, ["a", "b", "c"]);
    for name in ["a", "b", "c"] {
        assert_eq!(log.events_of(name).last(), Some(&Event::Completed));
    }
    assert!(log.position("a", Event::Completed) < log.position("b", Event::Started));
    assert!(log.position("b", Event::Completed) < log.position("c", Event::Started));
}

#[test]
fn sequence_is_reaped_before_its_last_child_finishes() {
    let log = EventLog::new();
    let last = ProbeOperation::handle("last", 1.0, &log);
    let sequence = Handle::new(Sequence::new().then(&last));
    let mut rule = ExecutorTestRule::new().with_frame_time(0.25);
    rule.add(&sequence);

    rule.advance_frame();
    assert_eq!(sequence.phase(), Phase::Expired);
    assert!(!rule.executor().contains(&sequence.erase()));
    assert!(!log.has_completed("last"));
    assert_eq!(rule.active_count(), 1);
}

#[test]
fn parent_moves_on_while_a_nested_sequence_is_still_finishing() {
    let log = EventLog::new();
    let inner = Sequence::new()
        .then(&ProbeOperation::handle("x", 0.25, &log))
        .then(&ProbeOperation::handle("y", 1.0, &log));
    let outer = Sequence::new()
        .then(OperationRef::new(inner))
        .then(&ProbeOperation::handle("z", 0.25, &log));
    let mut rule = ExecutorTestRule::new().with_frame_time(0.25);
    rule.add(OperationRef::new(outer));
    rule.pump_until_idle();

    assert!(log.has_completed("y"));
    assert!(log.has_completed("z"));
    assert!(
        log.overlaps("z", "y"),
        "z starts before y completes: {:?}",
        log.entries()
    );
}

#[test]
fn recursive_removal_empties_every_level() {
    let log = EventLog::new();
    let doomed = ProbeOperation::handle("doomed", 1.0, &log);
    let survivor = ProbeOperation::handle("survivor", 0.25, &log);
    let deepest = Sequence::new().then(&doomed);
    let middle = Sequence::new()
        .then(OperationRef::new(deepest))
        .then(&doomed);
    let top = Handle::new(
        Sequence::new()
            .then(OperationRef::new(middle))
            .then(&doomed)
            .then(&survivor),
    );

    let mut rule = ExecutorTestRule::new().with_frame_time(0.25);
    rule.add(&top);
    assert_eq!(rule.executor().remove_all_recursive(&doomed), 3);
    rule.pump_until_idle();

    assert!(log.events_of("doomed").is_empty());
    assert!(log.has_completed("survivor"));
}

#[test]
fn filtered_recursive_removal_by_kind() {
    let log = EventLog::new();
    let executor = Executor::new();
    let nested = Sequence::new()
        .then(&ProbeOperation::handle("p1", 1.0, &log))
        .then(OperationRef::new(LambdaOperation::once(|| {})));
    let top = Handle::new(
        Sequence::new()
            .then(OperationRef::new(nested))
            .then(&ProbeOperation::handle("p2", 1.0, &log))
            .then(OperationRef::new(LambdaOperation::over(
                TweenSpec::linear(1.0),
                |_| {},
            ))),
    );
    executor.add(&top);
    executor.add(&ProbeOperation::handle("p3", 1.0, &log));

    let probes = Filter::for_kind(OperationKind::Named("probe"));
    assert_eq!(executor.remove_all_matching_recursive(&probes), 3);
    assert_eq!(top.with(|seq| seq.len()), 2);

    let lambdas = Filter::for_kind(OperationKind::Lambda);
    assert_eq!(executor.remove_all_matching_recursive(&lambdas), 2);
    let remaining = top.with(|seq| seq.queued().cloned().collect::<Vec<_>>());
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].kind(), Some(OperationKind::Sequence));
}

#[test]
fn sequence_can_be_extended_while_running() {
    let log = EventLog::new();
    let sequence = Handle::new(
        Sequence::new()
            .then(&ProbeOperation::handle("first", 0.25, &log))
            .then(&ProbeOperation::handle("middle", 0.5, &log)),
    );
    let mut rule = ExecutorTestRule::new().with_frame_time(0.25);
    rule.add(&sequence);
    rule.advance_frame();
    assert_eq!(sequence.with(|seq| seq.len()), 1);

    sequence.update(|seq| seq.add(&ProbeOperation::handle("last", 0.25, &log)));
    rule.pump_until_idle();
    assert!(log.position("first", Event::Completed) < log.position("middle", Event::Started));
    assert!(log.position("middle", Event::Completed) < log.position("last", Event::Started));
    assert!(log.has_completed("last"));
}
