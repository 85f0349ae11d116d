use std::fmt;
use std::rc::Rc;

use crate::handle::OperationRef;
use crate::operation::{Operation, OperationKind};
use crate::target::TargetId;

type Predicate = Rc<dyn Fn(&dyn Operation) -> bool>;

/// Declarative operation matcher used for bulk removal.
///
/// Every rule that is set must pass; a filter with no rules matches
/// everything.
///
/// ```
/// use tweenline_core::{Filter, OperationKind, TargetId};
///
/// let sprite = 7usize;
/// let fades_on_sprite = Filter::new()
///     .with_kind(OperationKind::Named("fade"))
///     .with_target(TargetId::of(&sprite));
/// # let _ = fades_on_sprite;
/// ```
#[derive(Clone, Default)]
pub struct Filter {
    target: Option<TargetId>,
    kind: Option<OperationKind>,
    predicate: Option<Predicate>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching operations on `target`.
    pub fn for_target(target: TargetId) -> Self {
        Self::new().with_target(target)
    }

    /// Filter matching operations of `kind`.
    pub fn for_kind(kind: OperationKind) -> Self {
        Self::new().with_kind(kind)
    }

    pub fn with_target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_kind(mut self, kind: OperationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_predicate(mut self, predicate: impl Fn(&dyn Operation) -> bool + 'static) -> Self {
        self.predicate = Some(Rc::new(predicate));
        self
    }

    pub fn matches(&self, operation: &dyn Operation) -> bool {
        if self.kind.is_some_and(|kind| operation.kind() != kind) {
            return false;
        }
        if self
            .target
            .is_some_and(|target| operation.core().target() != Some(target))
        {
            return false;
        }
        if let Some(predicate) = &self.predicate {
            return predicate(operation);
        }
        true
    }

    // The operation currently running its own hook cannot be inspected and
    // never matches.
    pub(crate) fn matches_ref(&self, operation: &OperationRef) -> bool {
        operation.try_with(|op| self.matches(op)).unwrap_or(false)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("target", &self.target)
            .field("kind", &self.kind)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
