//! Scripted operation shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{Handle, Operation, OperationCore, OperationKind};

pub(crate) type Journal = Rc<RefCell<Vec<String>>>;

pub(crate) fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub(crate) fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

/// Records `name:start`, `name:tick` and `name:complete` into a journal.
#[derive(Debug)]
pub(crate) struct Probe {
    pub(crate) core: OperationCore,
    name: &'static str,
    journal: Journal,
}

impl Probe {
    pub(crate) fn new(name: &'static str, duration: f32, journal: &Journal) -> Self {
        Self::with_core(name, OperationCore::new().with_duration(duration), journal)
    }

    pub(crate) fn with_core(name: &'static str, core: OperationCore, journal: &Journal) -> Self {
        Self {
            core,
            name,
            journal: Rc::clone(journal),
        }
    }

    pub(crate) fn handle(name: &'static str, duration: f32, journal: &Journal) -> Handle<Probe> {
        Handle::new(Self::new(name, duration, journal))
    }

    fn record(&self, event: &str) {
        self.journal
            .borrow_mut()
            .push(format!("{}:{}", self.name, event));
    }
}

impl Operation for Probe {
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
        self.record("start");
    }

    fn on_tick(&mut self) {
        self.record("tick");
    }

    fn on_complete(&mut self) {
        self.record("complete");
    }
}
