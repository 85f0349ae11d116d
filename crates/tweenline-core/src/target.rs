use std::fmt;
use std::rc::Rc;

/// Opaque identity of the external object an operation affects.
///
/// Operations never dereference a target; it exists so that a [`Filter`]
/// can select every operation touching the same object. Identities derived
/// from an address are only meaningful while that object is alive.
///
/// [`Filter`]: crate::Filter
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(usize);

impl TargetId {
    /// Identity of the value behind `value`.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self(value as *const T as *const () as usize)
    }

    /// Identity of the allocation shared by `rc` and its clones.
    pub fn of_rc<T: ?Sized>(rc: &Rc<T>) -> Self {
        Self(Rc::as_ptr(rc) as *const () as usize)
    }

    /// Identity from an application-defined key, e.g. an entity id.
    pub const fn from_raw(key: usize) -> Self {
        Self(key)
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Debug for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({:#x})", self.0)
    }
}
