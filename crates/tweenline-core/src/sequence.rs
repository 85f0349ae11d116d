//! Serial composition of operations.
//!
//! A [`Sequence`] never ticks its children itself. Each frame it checks
//! whether the child it last handed to its executor is still registered
//! there; once that child has been reaped it hands over the next one. Nested
//! sequences therefore flatten into a single executor pass.
//!
//! A sequence expires as soon as its queue is empty, which is the frame it
//! hands over its last child, not the frame that child finishes. A parent
//! sequence waiting on it moves on while that last child is still running.

use std::collections::VecDeque;

use crate::filter::Filter;
use crate::handle::{OperationRef, WeakOperationRef};
use crate::operation::{Operation, OperationCore, OperationKind};

#[derive(Debug)]
pub struct Sequence {
    core: OperationCore,
    queue: VecDeque<OperationRef>,
    current: Option<WeakOperationRef>,
}

impl Sequence {
    pub fn new() -> Self {
        Self {
            core: OperationCore::without_default_expiration(),
            queue: VecDeque::new(),
            current: None,
        }
    }

    /// Builder form of [`add`](Self::add).
    pub fn then(mut self, operation: impl Into<OperationRef>) -> Self {
        self.add(operation);
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.core.set_delay(delay);
        self
    }

    /// Queue `operation` after everything already queued.
    ///
    /// A sequence must never be queued into itself or one of its own
    /// descendants.
    pub fn add(&mut self, operation: impl Into<OperationRef>) {
        self.queue.push_back(operation.into());
    }

    /// Remove `operation` from this sequence's own queue.
    pub fn remove(&mut self, operation: impl Into<OperationRef>) -> bool {
        let operation = operation.into();
        match self.queue.iter().position(|queued| queued.ptr_eq(&operation)) {
            Some(index) => {
                self.queue.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove queued operations matching `filter`, without descending into
    /// nested sequences.
    pub fn remove_matching(&mut self, filter: &Filter) -> usize {
        let before = self.queue.len();
        self.queue.retain(|queued| !filter.matches_ref(queued));
        before - self.queue.len()
    }

    /// Remove `target` from this queue and from every nested sequence.
    pub fn remove_all_recursive(&mut self, target: &OperationRef) -> usize {
        let mut removed = 0;
        self.queue.retain(|queued| {
            if let Some(nested) =
                queued.with_sequence_mut(|sequence| sequence.remove_all_recursive(target))
            {
                removed += nested;
            }
            let hit = queued.ptr_eq(target);
            removed += usize::from(hit);
            !hit
        });
        removed
    }

    /// Remove queued operations matching `filter` at every nesting depth.
    /// Children are searched before their parent sequence is tested.
    pub fn remove_all_matching_recursive(&mut self, filter: &Filter) -> usize {
        let mut removed = 0;
        self.queue.retain(|queued| {
            if let Some(nested) = queued
                .with_sequence_mut(|sequence| sequence.remove_all_matching_recursive(filter))
            {
                removed += nested;
            }
            let hit = filter.matches_ref(queued);
            removed += usize::from(hit);
            !hit
        });
        removed
    }

    /// Number of operations still queued.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn queued(&self) -> impl Iterator<Item = &OperationRef> {
        self.queue.iter()
    }

    /// The child most recently handed to the executor, while it is alive.
    pub fn current(&self) -> Option<OperationRef> {
        self.current.as_ref().and_then(WeakOperationRef::upgrade)
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for Sequence {
    fn core(&self) -> &OperationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut OperationCore {
        &mut self.core
    }

    fn kind(&self) -> OperationKind {
        OperationKind::Sequence
    }

    fn on_tick(&mut self) {
        let Some(executor) = self.core.belongs_to() else {
            log::warn!("sequence ticked outside of an executor; nothing to hand over");
            return;
        };
        let busy = self
            .current()
            .is_some_and(|current| executor.contains(&current));
        if busy {
            return;
        }
        let Some(next) = self.queue.pop_front() else {
            return;
        };
        log::debug!("sequence handing {next:?} to {executor:?}");
        // A child already registered here is simply waited on.
        if executor.contains(&next) || executor.add(&next) {
            self.current = Some(next.downgrade());
        } else {
            // Still live elsewhere; retry next frame instead of skipping it.
            log::warn!("{executor:?} refused {next:?}; keeping it at the head of the sequence");
            self.current = None;
            self.queue.push_front(next);
        }
    }

    fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "tests/sequence_tests.rs"]
mod tests;
