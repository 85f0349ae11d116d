//! Shared ownership of operations.
//!
//! An operation is owned jointly by whoever constructed it and by the
//! executor it is registered with. [`Handle`] keeps the concrete type for
//! typed access; [`OperationRef`] erases it and is what executors and
//! sequences store. Both compare by allocation, never by value.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::executor::{Executor, OwnerSlot};
use crate::operation::{Operation, OperationExt, OperationKind, Phase};
use crate::sequence::Sequence;
use crate::target::TargetId;

/// Typed, single-threaded shared handle to an operation.
pub struct Handle<T: Operation> {
    inner: Rc<RefCell<T>>,
    owner: OwnerSlot,
}

impl<T: Operation> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            owner: self.owner.clone(),
        }
    }
}

impl<T: Operation> Handle<T> {
    pub fn new(operation: T) -> Self {
        let owner = operation.core().owner_slot().clone();
        Self {
            inner: Rc::new(RefCell::new(operation)),
            owner,
        }
    }

    /// Run `f` with an immutable reference to the operation.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let borrow = self.inner.borrow();
        f(&*borrow)
    }

    /// Run `f` with a mutable reference to the operation.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut borrow = self.inner.borrow_mut();
        f(&mut *borrow)
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }

    /// Type-erased reference to the same operation.
    pub fn erase(&self) -> OperationRef {
        let inner: Rc<RefCell<dyn Operation>> = self.inner.clone();
        OperationRef {
            inner,
            owner: self.owner.clone(),
        }
    }

    pub fn tick(&self, dt: f32) {
        self.erase().tick(dt);
    }

    pub fn has_expired(&self) -> bool {
        self.erase().has_expired()
    }

    pub fn is_paused(&self) -> bool {
        self.with(|op| op.core().is_paused())
    }

    pub fn pause(&self) {
        self.erase().pause();
    }

    pub fn resume(&self) {
        self.erase().resume();
    }

    pub fn stop(&self) {
        self.erase().stop();
    }

    pub fn progress(&self) -> f32 {
        self.with(|op| op.core().progress())
    }

    pub fn phase(&self) -> Phase {
        self.with(|op| op.core().phase())
    }
}

impl<T: Operation + fmt::Debug> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(op) => f.debug_tuple("Handle").field(&*op).finish(),
            Err(_) => f.write_str("Handle(<borrowed>)"),
        }
    }
}

/// Type-erased shared reference to an operation. Identity is the allocation.
#[derive(Clone)]
pub struct OperationRef {
    inner: Rc<RefCell<dyn Operation>>,
    owner: OwnerSlot,
}

impl OperationRef {
    pub fn new(operation: impl Operation) -> Self {
        let owner = operation.core().owner_slot().clone();
        let inner: Rc<RefCell<dyn Operation>> = Rc::new(RefCell::new(operation));
        Self { inner, owner }
    }

    pub fn ptr_eq(&self, other: &OperationRef) -> bool {
        self.addr() == other.addr()
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }

    pub(crate) fn downgrade(&self) -> WeakOperationRef {
        WeakOperationRef {
            inner: Rc::downgrade(&self.inner),
            owner: self.owner.clone(),
        }
    }

    /// Run `f` with an immutable reference to the operation.
    ///
    /// Panics if the operation is currently mutably borrowed, i.e. when
    /// called from inside one of its own hooks.
    pub fn with<R>(&self, f: impl FnOnce(&dyn Operation) -> R) -> R {
        let borrow = self.inner.borrow();
        f(&*borrow)
    }

    /// Run `f` with a mutable reference to the operation.
    pub fn update<R>(&self, f: impl FnOnce(&mut dyn Operation) -> R) -> R {
        let mut borrow = self.inner.borrow_mut();
        f(&mut *borrow)
    }

    /// Like [`with`](Self::with) but yields `None` instead of panicking when
    /// the operation is mid-hook.
    pub fn try_with<R>(&self, f: impl FnOnce(&dyn Operation) -> R) -> Option<R> {
        let borrow = self.inner.try_borrow().ok()?;
        Some(f(&*borrow))
    }

    fn try_update<R>(&self, action: &str, f: impl FnOnce(&mut dyn Operation) -> R) -> Option<R> {
        match self.inner.try_borrow_mut() {
            Ok(mut borrow) => Some(f(&mut *borrow)),
            Err(_) => {
                log::warn!("cannot {action} {self:?}: operation is busy in one of its own hooks");
                None
            }
        }
    }

    /// Advance the operation by `dt` seconds outside of any executor.
    pub fn tick(&self, dt: f32) {
        self.try_update("tick", |op| op.tick(dt));
    }

    /// Whether the operation has expired. An operation that is mid-hook
    /// reports `false`; it is re-examined at the next sweep.
    pub fn has_expired(&self) -> bool {
        self.try_with(|op| op.has_expired()).unwrap_or(false)
    }

    pub fn kind(&self) -> Option<OperationKind> {
        self.try_with(|op| op.kind())
    }

    pub fn target(&self) -> Option<TargetId> {
        self.try_with(|op| op.core().target()).flatten()
    }

    pub fn is_paused(&self) -> bool {
        self.try_with(|op| op.core().is_paused()).unwrap_or(false)
    }

    pub fn pause(&self) {
        self.try_update("pause", |op| op.core_mut().pause());
    }

    pub fn resume(&self) {
        self.try_update("resume", |op| op.core_mut().resume());
    }

    /// Force the operation to expire. Inside a hook, call
    /// [`OperationCore::stop`](crate::OperationCore::stop) instead.
    pub fn stop(&self) {
        self.try_update("stop", |op| op.core_mut().stop());
    }

    pub fn progress(&self) -> f32 {
        self.try_with(|op| op.core().progress()).unwrap_or(0.0)
    }

    pub fn phase(&self) -> Option<Phase> {
        self.try_with(|op| op.core().phase())
    }

    /// The executor this operation is registered with. Accurate even while
    /// the operation is busy in one of its own hooks.
    pub fn belongs_to(&self) -> Option<Executor> {
        self.owner.get()
    }

    /// Register with the shared executor. Returns `false` if already there.
    pub fn add_to_default_executor(&self) -> bool {
        Executor::shared().add(self)
    }

    /// Run `f` on the operation if it is a [`Sequence`] that is not busy.
    pub(crate) fn with_sequence_mut<R>(&self, f: impl FnOnce(&mut Sequence) -> R) -> Option<R> {
        let mut borrow = self.inner.try_borrow_mut().ok()?;
        let result = borrow.as_sequence_mut().map(f);
        result
    }

    pub(crate) fn owner_slot(&self) -> &OwnerSlot {
        &self.owner
    }
}

impl PartialEq for OperationRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for OperationRef {}

impl fmt::Debug for OperationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("OperationRef");
        out.field("addr", &format_args!("{:#x}", self.addr()));
        match self.inner.try_borrow() {
            Ok(op) => out.field("kind", &op.kind()).field("phase", &op.core().phase()),
            Err(_) => out.field("kind", &"<borrowed>"),
        };
        out.finish()
    }
}

impl<T: Operation> From<Handle<T>> for OperationRef {
    fn from(handle: Handle<T>) -> Self {
        handle.erase()
    }
}

impl<T: Operation> From<&Handle<T>> for OperationRef {
    fn from(handle: &Handle<T>) -> Self {
        handle.erase()
    }
}

impl From<&OperationRef> for OperationRef {
    fn from(operation: &OperationRef) -> Self {
        operation.clone()
    }
}

/// Non-owning counterpart of [`OperationRef`].
#[derive(Clone)]
pub(crate) struct WeakOperationRef {
    inner: Weak<RefCell<dyn Operation>>,
    owner: OwnerSlot,
}

impl WeakOperationRef {
    pub(crate) fn upgrade(&self) -> Option<OperationRef> {
        let owner = self.owner.clone();
        self.inner.upgrade().map(|inner| OperationRef { inner, owner })
    }
}

impl fmt::Debug for WeakOperationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(op) => write!(f, "Weak({op:?})"),
            None => f.write_str("Weak(<dropped>)"),
        }
    }
}
