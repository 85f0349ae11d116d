use std::cell::RefCell;
use std::rc::Rc;

use tweenline_core::{Handle, Operation, OperationCore, OperationKind, TweenSpec};

/// Lifecycle hook observed by a [`ProbeOperation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Started,
    /// Linear progress at the time of the tick.
    Ticked(f32),
    Completed,
}

/// Shared, ordered record of probe events across many operations.
#[derive(Clone, Default)]
pub struct EventLog {
    entries: Rc<RefCell<Vec<(&'static str, Event)>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, name: &'static str, event: Event) {
        self.entries.borrow_mut().push((name, event));
    }

    pub fn entries(&self) -> Vec<(&'static str, Event)> {
        self.entries.borrow().clone()
    }

    /// Events of a single probe, in order.
    pub fn events_of(&self, name: &str) -> Vec<Event> {
        self.entries
            .borrow()
            .iter()
            .filter(|(probe, _)| *probe == name)
            .map(|(_, event)| *event)
            .collect()
    }

    /// Index of the first `event` recorded by `name`, if any.
    pub fn position(&self, name: &str, event: Event) -> Option<usize> {
        self.entries
            .borrow()
            .iter()
            .position(|(probe, seen)| *probe == name && same_hook(*seen, event))
    }

    pub fn has_completed(&self, name: &str) -> bool {
        self.position(name, Event::Completed).is_some()
    }

    /// Whether `name` started ticking before `other` completed.
    pub fn overlaps(&self, name: &str, other: &str) -> bool {
        match (
            self.position(name, Event::Started),
            self.position(other, Event::Completed),
        ) {
            (Some(started), Some(completed)) => started < completed,
            (Some(_), None) => true,
            _ => false,
        }
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

// Ticks compare by hook, not by progress.
fn same_hook(a: Event, b: Event) -> bool {
    std::mem::discriminant(&a) == std::mem::discriminant(&b)
}

/// Operation that does nothing but report its hooks to an [`EventLog`].
pub struct ProbeOperation {
    core: OperationCore,
    name: &'static str,
    log: EventLog,
}

impl ProbeOperation {
    pub fn new(name: &'static str, duration: f32, log: &EventLog) -> Self {
        Self::with_core(name, OperationCore::new().with_duration(duration), log)
    }

    pub fn with_spec(name: &'static str, spec: TweenSpec, log: &EventLog) -> Self {
        Self::with_core(name, OperationCore::new().with_spec(&spec), log)
    }

    pub fn with_core(name: &'static str, core: OperationCore, log: &EventLog) -> Self {
        Self {
            core,
            name,
            log: log.clone(),
        }
    }

    /// Shorthand for `Handle::new(ProbeOperation::new(..))`.
    pub fn handle(name: &'static str, duration: f32, log: &EventLog) -> Handle<ProbeOperation> {
        Handle::new(Self::new(name, duration, log))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Operation for ProbeOperation {
    fn core(&self) -> &OperationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut OperationCore {
        &mut self.core
    }

    fn kind(&self) -> OperationKind {
        OperationKind::Named("probe")
    }

    fn on_start(&mut self) {
        self.log.push(self.name, Event::Started);
    }

    fn on_tick(&mut self) {
        self.log.push(self.name, Event::Ticked(self.core.progress()));
    }

    fn on_complete(&mut self) {
        self.log.push(self.name, Event::Completed);
    }
}
