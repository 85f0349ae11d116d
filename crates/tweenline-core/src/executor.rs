//! The per-frame driver.
//!
//! An [`Executor`] owns the set of active operations, advances each of them
//! once per host frame, and reaps the expired ones after the pass. Each
//! executor has its own operations and time scale, so independent
//! subsystems can be slowed or paused separately. A lazily created shared
//! instance is available through [`Executor::shared`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::collections::map::HashSet;
use crate::filter::Filter;
use crate::handle::OperationRef;

thread_local! {
    static SHARED_EXECUTOR: RefCell<Option<Executor>> = const { RefCell::new(None) };
}

struct ExecutorInner {
    label: Option<String>,
    // Insertion order is the tick order.
    operations: RefCell<Vec<OperationRef>>,
    members: RefCell<HashSet<usize>>,
    time_scale: Cell<f32>,
}

/// Cheap, clonable handle to an executor. Clones drive the same operations.
#[derive(Clone)]
pub struct Executor {
    inner: Rc<ExecutorInner>,
}

impl Executor {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Executor whose label shows up in logs and `Debug` output.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self::build(Some(label.into()))
    }

    fn build(label: Option<String>) -> Self {
        let executor = Self {
            inner: Rc::new(ExecutorInner {
                label,
                operations: RefCell::new(Vec::new()),
                members: RefCell::new(HashSet::default()),
                time_scale: Cell::new(1.0),
            }),
        };
        log::debug!("created {executor:?}");
        executor
    }

    pub fn with_time_scale(self, time_scale: f32) -> Self {
        self.set_time_scale(time_scale);
        self
    }

    /// The shared executor, created on first access.
    pub fn shared() -> Executor {
        SHARED_EXECUTOR.with(|slot| {
            slot.borrow_mut()
                .get_or_insert_with(|| {
                    log::debug!("initialising shared executor");
                    Executor::labeled("shared")
                })
                .clone()
        })
    }

    /// Drop the shared executor, detaching everything it still holds. The
    /// next [`shared`](Self::shared) call creates a fresh one.
    pub fn reset_shared() {
        let previous = SHARED_EXECUTOR.with(|slot| slot.borrow_mut().take());
        if let Some(executor) = previous {
            log::debug!("resetting shared executor with {} operations", executor.len());
            executor.clear();
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn ptr_eq(&self, other: &Executor) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> WeakExecutor {
        WeakExecutor(Rc::downgrade(&self.inner))
    }

    pub fn time_scale(&self) -> f32 {
        self.inner.time_scale.get()
    }

    /// Set the multiplier applied to every frame delta.
    ///
    /// Zero pauses everything. Negative and non-finite values are rejected
    /// with a warning and the previous scale is kept.
    pub fn set_time_scale(&self, time_scale: f32) {
        if !time_scale.is_finite() || time_scale < 0.0 {
            log::warn!(
                "time scale must be a finite value >= 0, ignoring request for {time_scale} (keeping {})",
                self.time_scale()
            );
            return;
        }
        self.inner.time_scale.set(time_scale);
    }

    /// Run in real time again.
    pub fn reset_time_scale(&self) {
        self.set_time_scale(1.0);
    }

    /// Register an operation. It is first ticked on the next frame pass.
    ///
    /// Returns `false` without changing anything if the operation is already
    /// registered here or with another live executor.
    pub fn add(&self, operation: impl Into<OperationRef>) -> bool {
        let operation = operation.into();
        if self.contains(&operation) {
            log::warn!("{operation:?} is already registered with {self:?}");
            return false;
        }
        if let Some(other) = operation.belongs_to() {
            if !other.ptr_eq(self) && other.contains(&operation) {
                log::warn!("{operation:?} is already registered with {other:?}");
                return false;
            }
        }

        self.inner.members.borrow_mut().insert(operation.addr());
        self.inner.operations.borrow_mut().push(operation.clone());
        operation.owner_slot().attach(self);
        true
    }

    /// Unregister an operation without completing it. Absent operations are
    /// ignored.
    pub fn remove(&self, operation: impl Into<OperationRef>) -> bool {
        self.detach(&operation.into())
    }

    /// Remove every registered operation matching `filter`. Queued children
    /// of sequences are left alone.
    pub fn remove_matching(&self, filter: &Filter) -> usize {
        self.remove_where(|operation| filter.matches_ref(operation))
    }

    /// Remove `target` from this executor and from the queue of every
    /// registered sequence, at any depth. Returns the total number of
    /// removals.
    pub fn remove_all_recursive(&self, target: impl Into<OperationRef>) -> usize {
        let target = target.into();
        let mut nested = 0;
        let registered = self.remove_where(|operation| {
            nested += operation
                .with_sequence_mut(|sequence| sequence.remove_all_recursive(&target))
                .unwrap_or(0);
            operation.ptr_eq(&target)
        });
        registered + nested
    }

    /// Remove every operation matching `filter`, both registered ones and
    /// those queued in registered sequences, at any depth.
    pub fn remove_all_matching_recursive(&self, filter: &Filter) -> usize {
        let mut nested = 0;
        let registered = self.remove_where(|operation| {
            nested += operation
                .with_sequence_mut(|sequence| sequence.remove_all_matching_recursive(filter))
                .unwrap_or(0);
            filter.matches_ref(operation)
        });
        registered + nested
    }

    /// Unregister everything.
    pub fn clear(&self) -> usize {
        self.remove_where(|_| true)
    }

    pub fn contains(&self, operation: &OperationRef) -> bool {
        self.inner.members.borrow().contains(&operation.addr())
    }

    pub fn len(&self) -> usize {
        self.inner.operations.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.operations.borrow().is_empty()
    }

    /// Snapshot of the registered operations in tick order.
    pub fn operations(&self) -> Vec<OperationRef> {
        self.inner.operations.borrow().clone()
    }

    /// Advance every registered operation by `dt * time_scale` seconds, then
    /// reap the expired ones.
    ///
    /// The pass iterates a snapshot taken before any operation runs, so an
    /// operation registered during the pass is first ticked next frame. One
    /// removed during the pass is skipped.
    pub fn tick(&self, dt: f32) {
        if !(dt >= 0.0) {
            log::warn!("ignoring frame with invalid delta {dt} on {self:?}");
            return;
        }
        let scaled = dt * self.time_scale();

        for operation in self.operations() {
            if self.contains(&operation) {
                operation.tick(scaled);
            }
        }

        let reaped = self.remove_where(OperationRef::has_expired);
        if reaped > 0 {
            log::trace!("{self:?} reaped {reaped} expired operations");
        }
    }

    // Predicates may call back into this executor, so no borrow of the
    // operation list is held while they run. The list itself is rebuilt in
    // one pass however many operations go.
    fn remove_where(&self, mut select: impl FnMut(&OperationRef) -> bool) -> usize {
        let selected: Vec<OperationRef> = self
            .operations()
            .into_iter()
            .filter(|operation| select(operation))
            .collect();
        if selected.is_empty() {
            return 0;
        }
        let removed: Vec<OperationRef> = {
            let mut members = self.inner.members.borrow_mut();
            selected
                .into_iter()
                .filter(|operation| members.remove(&operation.addr()))
                .collect()
        };
        if removed.is_empty() {
            return 0;
        }
        {
            let members = self.inner.members.borrow();
            self.inner
                .operations
                .borrow_mut()
                .retain(|existing| members.contains(&existing.addr()));
        }
        for operation in &removed {
            operation.owner_slot().release(self);
        }
        removed.len()
    }

    fn detach(&self, operation: &OperationRef) -> bool {
        if !self.inner.members.borrow_mut().remove(&operation.addr()) {
            return false;
        }
        self.inner
            .operations
            .borrow_mut()
            .retain(|existing| !existing.ptr_eq(operation));
        operation.owner_slot().release(self);
        true
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Executor");
        if let Some(label) = self.label() {
            out.field("label", &label);
        }
        let operations = self.inner.operations.try_borrow().map(|ops| ops.len());
        out.field("time_scale", &self.time_scale())
            .field("operations", &operations.unwrap_or_default())
            .finish()
    }
}

/// Non-owning back-reference from an operation to its executor.
#[derive(Clone)]
pub(crate) struct WeakExecutor(Weak<ExecutorInner>);

impl WeakExecutor {
    pub(crate) fn upgrade(&self) -> Option<Executor> {
        self.0.upgrade().map(|inner| Executor { inner })
    }

    pub(crate) fn points_to(&self, executor: &Executor) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&executor.inner))
    }
}

/// Where an operation records the executor it is registered with.
///
/// The slot lives outside the operation's `RefCell` and is shared by its
/// core and every handle, so an executor can update it even while the
/// operation is busy in one of its own hooks.
#[derive(Clone, Default)]
pub(crate) struct OwnerSlot(Rc<RefCell<Option<WeakExecutor>>>);

impl OwnerSlot {
    pub(crate) fn get(&self) -> Option<Executor> {
        self.0.borrow().as_ref().and_then(WeakExecutor::upgrade)
    }

    pub(crate) fn attach(&self, executor: &Executor) {
        *self.0.borrow_mut() = Some(executor.downgrade());
    }

    /// Clear the slot if it still points at `executor`.
    pub(crate) fn release(&self, executor: &Executor) {
        let mut owner = self.0.borrow_mut();
        if owner.as_ref().is_some_and(|weak| weak.points_to(executor)) {
            *owner = None;
        }
    }
}

impl fmt::Debug for OwnerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(owner) => fmt::Debug::fmt(&*owner, f),
            Err(_) => f.write_str("<busy>"),
        }
    }
}

impl fmt::Debug for WeakExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(executor) => write!(f, "Weak({executor:?})"),
            None => f.write_str("Weak(<dropped>)"),
        }
    }
}

#[cfg(test)]
#[path = "tests/executor_tests.rs"]
mod tests;
