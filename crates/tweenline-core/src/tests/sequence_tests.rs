use super::*;

use crate::test_support::{entries, journal, Probe};
use crate::{Executor, Handle, OperationExt, Phase};

fn position(log: &[String], entry: &str) -> usize {
    log.iter()
        .position(|e| e == entry)
        .unwrap_or_else(|| panic!("{entry} missing from {log:?}"))
}

#[test]
fn children_are_handed_over_one_at_a_time() {
    let log = journal();
    let executor = Executor::new();
    let a = Probe::handle("a", 1.0, &log);
    let b = Probe::handle("b", 1.0, &log);
    let c = Probe::handle("c", 1.0, &log);
    let sequence = Handle::new(Sequence::new().then(&a).then(&b).then(&c));
    executor.add(&sequence);

    executor.tick(0.5);
    assert!(executor.contains(&a.erase()));
    assert!(!executor.contains(&b.erase()));
    assert!(entries(&log).is_empty(), "a is first ticked on the next frame");
    assert!(sequence.with(|seq| seq.current()).is_some_and(|cur| cur.ptr_eq(&a.erase())));

    executor.tick(0.5);
    executor.tick(0.5);
    assert_eq!(entries(&log), ["a:start", "a:tick", "a:tick", "a:complete"]);
    assert!(!executor.contains(&b.erase()), "b waits until a has been reaped");

    executor.tick(0.5);
    assert!(executor.contains(&b.erase()));
    assert_eq!(sequence.with(|seq| seq.len()), 1);
}

#[test]
fn sequence_expires_when_it_hands_over_its_last_child() {
    let log = journal();
    let executor = Executor::new();
    let only = Probe::handle("only", 1.0, &log);
    let sequence = Handle::new(Sequence::new().then(&only));
    executor.add(&sequence);

    executor.tick(0.5);
    assert_eq!(sequence.phase(), Phase::Expired);
    assert!(!executor.contains(&sequence.erase()));
    assert!(executor.contains(&only.erase()), "the last child is still running");
    assert!(entries(&log).is_empty());

    for _ in 0..2 {
        executor.tick(0.5);
    }
    assert_eq!(entries(&log), ["only:start", "only:tick", "only:tick", "only:complete"]);
    assert!(executor.is_empty());
}

#[test]
fn nested_sequences_flatten_and_the_parent_moves_on_early() {
    let log = journal();
    let executor = Executor::new();
    let x = Probe::handle("x", 0.5, &log);
    let y = Probe::handle("y", 2.0, &log);
    let z = Probe::handle("z", 0.5, &log);
    let inner = Sequence::new().then(&x).then(&y);
    executor.add(OperationRef::new(Sequence::new().then(OperationRef::new(inner)).then(&z)));

    for _ in 0..20 {
        if executor.is_empty() {
            break;
        }
        executor.tick(0.5);
    }
    assert!(executor.is_empty());

    let log = entries(&log);
    assert!(position(&log, "x:complete") < position(&log, "y:start"));
    assert!(
        position(&log, "z:start") < position(&log, "y:complete"),
        "z starts while y is still running: {log:?}"
    );
}

#[test]
fn empty_sequence_completes_on_its_first_tick() {
    let executor = Executor::new();
    let sequence = Handle::new(Sequence::new());
    executor.add(&sequence);
    executor.tick(0.1);
    assert!(executor.is_empty());
    assert_eq!(sequence.phase(), Phase::Expired);
    assert!(sequence.with(|seq| seq.current()).is_none());
}

#[test]
fn sequence_outside_an_executor_keeps_its_queue() {
    let log = journal();
    let mut sequence = Sequence::new().then(&Probe::handle("a", 1.0, &log));
    sequence.tick(0.5);
    assert_eq!(sequence.len(), 1);
    assert!(!sequence.has_expired());
    assert!(entries(&log).is_empty());
}

#[test]
fn local_removal_only_touches_the_own_queue() {
    let log = journal();
    let a = Probe::handle("a", 1.0, &log);
    let b = Probe::handle("b", 1.0, &log);
    let inner = Sequence::new().then(&a);
    let mut sequence = Sequence::new()
        .then(&a)
        .then(OperationRef::new(inner))
        .then(&b);

    assert!(sequence.remove(&a));
    assert!(!sequence.remove(&a));
    assert_eq!(sequence.len(), 2);

    let probes = Filter::for_kind(OperationKind::Named("probe"));
    assert_eq!(sequence.remove_matching(&probes), 1);
    assert_eq!(sequence.len(), 1);
    let nested = sequence.queued().next().map(|op| op.with(|op| op.kind()));
    assert_eq!(nested, Some(OperationKind::Sequence));
}

#[test]
fn recursive_removal_reaches_every_depth() {
    let log = journal();
    let t = Probe::handle("t", 1.0, &log);
    let keep = Probe::handle("keep", 1.0, &log);
    let deep = Sequence::new().then(&t);
    let middle = Sequence::new().then(OperationRef::new(deep)).then(&t);
    let mut outer = Sequence::new()
        .then(OperationRef::new(middle))
        .then(&t)
        .then(&keep);

    assert_eq!(outer.remove_all_recursive(&t.erase()), 3);
    assert_eq!(outer.len(), 2);
    assert_eq!(outer.remove_all_recursive(&t.erase()), 0);
}

#[test]
fn matching_sequences_are_removed_after_their_children_are_searched() {
    let log = journal();
    let keep = Probe::handle("keep", 1.0, &log);
    let inner = Sequence::new().then(&Probe::handle("x", 1.0, &log));
    let mut outer = Sequence::new().then(OperationRef::new(inner)).then(&keep);

    let removed = outer.remove_all_matching_recursive(&Filter::for_kind(OperationKind::Sequence));
    assert_eq!(removed, 1);
    assert_eq!(outer.len(), 1);

    let probes = Filter::for_kind(OperationKind::Named("probe"));
    assert_eq!(outer.remove_all_matching_recursive(&probes), 1);
    assert!(outer.is_empty());
}

#[test]
fn delayed_sequence_waits_before_handing_over() {
    let log = journal();
    let executor = Executor::new();
    let a = Probe::handle("a", 1.0, &log);
    executor.add(OperationRef::new(Sequence::new().with_delay(1.0).then(&a)));

    executor.tick(0.5);
    assert!(!executor.contains(&a.erase()));
    executor.tick(0.5);
    assert!(executor.contains(&a.erase()));
}

#[test]
fn child_live_elsewhere_stays_at_the_head_until_it_is_free() {
    let log = journal();
    let executor = Executor::new();
    let elsewhere = Executor::new();
    let a = Probe::handle("a", 1.0, &log);
    let b = Probe::handle("b", 1.0, &log);
    elsewhere.add(&a);
    let sequence = Handle::new(Sequence::new().then(&a).then(&b));
    executor.add(&sequence);

    executor.tick(0.5);
    executor.tick(0.5);
    assert!(!executor.contains(&a.erase()));
    assert!(!executor.contains(&b.erase()), "b must not jump the queue");
    assert_eq!(sequence.with(|seq| seq.len()), 2);
    assert!(sequence.with(|seq| seq.current()).is_none());

    elsewhere.remove(&a);
    executor.tick(0.5);
    assert!(executor.contains(&a.erase()));
    assert!(!executor.contains(&b.erase()));
    assert_eq!(sequence.with(|seq| seq.len()), 1);
}

#[test]
fn child_already_registered_here_is_waited_on_not_restarted() {
    let log = journal();
    let executor = Executor::new();
    let a = Probe::handle("a", 1.0, &log);
    let b = Probe::handle("b", 1.0, &log);
    executor.add(&a);
    let sequence = Handle::new(Sequence::new().then(&a).then(&b));
    executor.add(&sequence);

    executor.tick(0.5);
    assert!(sequence.with(|seq| seq.current()).is_some_and(|cur| cur.ptr_eq(&a.erase())));
    assert_eq!(sequence.with(|seq| seq.len()), 1);

    executor.tick(0.5);
    assert!(!executor.contains(&a.erase()));
    executor.tick(0.5);
    assert!(executor.contains(&b.erase()));
    assert_eq!(entries(&log).iter().filter(|e| *e == "a:start").count(), 1);
}
