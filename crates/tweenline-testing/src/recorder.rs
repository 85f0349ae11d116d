use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct Recorded<T> {
    current: T,
    writes: Vec<T>,
}

/// A stand-in property that remembers every value written to it.
///
/// Hand [`reader`](Self::reader) and [`writer`](Self::writer) to a
/// `PropertyOperation` and assert on [`writes`](Self::writes) afterwards.
pub struct RecordedValue<T> {
    inner: Rc<RefCell<Recorded<T>>>,
}

impl<T> Clone for RecordedValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> RecordedValue<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Recorded {
                current: initial,
                writes: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().current.clone()
    }

    /// Change the value from outside, without recording a write.
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().current = value;
    }

    pub fn reader(&self) -> impl FnMut() -> T + 'static {
        let inner = Rc::clone(&self.inner);
        move || inner.borrow().current.clone()
    }

    pub fn writer(&self) -> impl FnMut(T) + 'static {
        let inner = Rc::clone(&self.inner);
        move |value| {
            let mut recorded = inner.borrow_mut();
            recorded.writes.push(value.clone());
            recorded.current = value;
        }
    }

    /// Every value written through a [`writer`](Self::writer), oldest first.
    pub fn writes(&self) -> Vec<T> {
        self.inner.borrow().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes.len()
    }

    pub fn last_write(&self) -> Option<T> {
        self.inner.borrow().writes.last().cloned()
    }
}

impl<T: fmt::Debug> fmt::Debug for RecordedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recorded = self.inner.borrow();
        f.debug_struct("RecordedValue")
            .field("current", &recorded.current)
            .field("writes", &recorded.writes.len())
            .finish()
    }
}
