//! Composable boolean gates.
//!
//! A [`Conditional`] is a mutable set of zero-argument checks with a fixed
//! aggregation policy. Operations use one in [`Aggregation::All`] mode to
//! decide whether they may advance and one in [`Aggregation::Any`] mode to
//! decide whether they have expired.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

/// How a [`Conditional`] combines its checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Every check must pass. An empty set passes.
    All,
    /// At least one check must pass. An empty set fails.
    Any,
}

/// A side-effect free predicate with reference identity.
///
/// Clones share identity, so a caller can keep a clone around and later
/// [`Conditional::remove`] exactly the check it added.
#[derive(Clone)]
pub struct Check {
    predicate: Rc<dyn Fn() -> bool>,
}

impl Check {
    pub fn new(predicate: impl Fn() -> bool + 'static) -> Self {
        Self {
            predicate: Rc::new(predicate),
        }
    }

    /// A check that always passes.
    pub fn always() -> Self {
        Self::new(|| true)
    }

    pub fn evaluate(&self) -> bool {
        (self.predicate)()
    }

    pub fn ptr_eq(&self, other: &Check) -> bool {
        Rc::ptr_eq(&self.predicate, &other.predicate)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Check({:p})", Rc::as_ptr(&self.predicate) as *const ())
    }
}

pub struct Conditional {
    mode: Aggregation,
    checks: SmallVec<[Check; 2]>,
}

impl Conditional {
    pub fn new(mode: Aggregation) -> Self {
        Self {
            mode,
            checks: SmallVec::new(),
        }
    }

    /// Shorthand for a conditional that passes only if every check passes.
    pub fn all() -> Self {
        Self::new(Aggregation::All)
    }

    /// Shorthand for a conditional that passes if any check passes.
    pub fn any() -> Self {
        Self::new(Aggregation::Any)
    }

    pub fn mode(&self) -> Aggregation {
        self.mode
    }

    /// Add a check. Returns the stored handle for later removal.
    pub fn add(&mut self, check: Check) -> Check {
        self.checks.push(check.clone());
        check
    }

    /// Wrap `predicate` in a [`Check`] and add it.
    pub fn add_fn(&mut self, predicate: impl Fn() -> bool + 'static) -> Check {
        self.add(Check::new(predicate))
    }

    /// Remove the first check sharing identity with `check`.
    ///
    /// Returns `false` if it was not present.
    pub fn remove(&mut self, check: &Check) -> bool {
        match self.checks.iter().position(|existing| existing.ptr_eq(check)) {
            Some(index) => {
                self.checks.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, check: &Check) -> bool {
        self.checks.iter().any(|existing| existing.ptr_eq(check))
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn clear(&mut self) {
        self.checks.clear();
    }

    /// Aggregate the checks, short-circuiting per the mode.
    pub fn evaluate(&self) -> bool {
        match self.mode {
            Aggregation::All => self.checks.iter().all(Check::evaluate),
            Aggregation::Any => self.checks.iter().any(Check::evaluate),
        }
    }
}

impl fmt::Debug for Conditional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conditional")
            .field("mode", &self.mode)
            .field("checks", &self.checks.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/conditional_tests.rs"]
mod tests;
