//! Generic property tweening.
//!
//! A [`PropertyOperation`] knows nothing about the property it animates. It
//! is assembled from a reader, a writer and an interpolator, which is how
//! adapters for positions, colours, opacity and the like are built.

use std::fmt;
use std::ops::Add;

use tweenline_animation::{Lerp, TweenSpec};

use crate::operation::{Operation, OperationCore, OperationKind};
use crate::target::TargetId;

type Reader<T> = Box<dyn FnMut() -> T>;
type Writer<T> = Box<dyn FnMut(T)>;
type Interpolator<T> = Box<dyn Fn(&T, &T, f32) -> T>;

enum Destination<T> {
    Absolute(T),
    /// Resolved from the start value when the operation starts, so a delayed
    /// relative tween moves from wherever the property is at that moment.
    Relative(Box<dyn Fn(&T) -> T>),
}

pub struct PropertyOperation<T: Clone + 'static> {
    core: OperationCore,
    kind: OperationKind,
    reader: Reader<T>,
    writer: Writer<T>,
    interpolator: Interpolator<T>,
    destination: Destination<T>,
    start_value: Option<T>,
    end_value: Option<T>,
}

impl<T: Clone + 'static> PropertyOperation<T> {
    /// Tween towards a fixed `end` value.
    pub fn new(
        reader: impl FnMut() -> T + 'static,
        writer: impl FnMut(T) + 'static,
        interpolator: impl Fn(&T, &T, f32) -> T + 'static,
        end: T,
        spec: TweenSpec,
    ) -> Self {
        Self::build(reader, writer, interpolator, Destination::Absolute(end), spec)
    }

    /// Tween towards a destination computed from the value read at start.
    pub fn relative(
        reader: impl FnMut() -> T + 'static,
        writer: impl FnMut(T) + 'static,
        interpolator: impl Fn(&T, &T, f32) -> T + 'static,
        resolve: impl Fn(&T) -> T + 'static,
        spec: TweenSpec,
    ) -> Self {
        Self::build(
            reader,
            writer,
            interpolator,
            Destination::Relative(Box::new(resolve)),
            spec,
        )
    }

    fn build(
        reader: impl FnMut() -> T + 'static,
        writer: impl FnMut(T) + 'static,
        interpolator: impl Fn(&T, &T, f32) -> T + 'static,
        destination: Destination<T>,
        spec: TweenSpec,
    ) -> Self {
        Self {
            core: OperationCore::new().with_spec(&spec),
            kind: OperationKind::Property,
            reader: Box::new(reader),
            writer: Box::new(writer),
            interpolator: Box::new(interpolator),
            destination,
            start_value: None,
            end_value: None,
        }
    }

    pub fn with_target(mut self, target: TargetId) -> Self {
        self.core = self.core.with_target(target);
        self
    }

    /// Override the reported kind, e.g. `OperationKind::Named("fade")`.
    pub fn with_kind(mut self, kind: OperationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.core.set_delay(delay);
        self
    }

    /// The value captured when the operation started.
    pub fn start_value(&self) -> Option<&T> {
        self.start_value.as_ref()
    }

    /// The value written on completion, once it is known.
    pub fn end_value(&self) -> Option<&T> {
        match (&self.end_value, &self.destination) {
            (Some(end), _) | (None, Destination::Absolute(end)) => Some(end),
            (None, Destination::Relative(_)) => None,
        }
    }
}

impl<T: Clone + Lerp + 'static> PropertyOperation<T> {
    /// Tween towards `end` using the value's own [`Lerp`].
    pub fn lerp(
        reader: impl FnMut() -> T + 'static,
        writer: impl FnMut(T) + 'static,
        end: T,
        spec: TweenSpec,
    ) -> Self {
        Self::new(reader, writer, |a: &T, b: &T, t| a.lerp(b, t), end, spec)
    }
}

impl<T: Clone + Lerp + Add<Output = T> + 'static> PropertyOperation<T> {
    /// Tween by `offset` relative to the value at start.
    pub fn by_offset(
        reader: impl FnMut() -> T + 'static,
        writer: impl FnMut(T) + 'static,
        offset: T,
        spec: TweenSpec,
    ) -> Self {
        Self::relative(
            reader,
            writer,
            |a: &T, b: &T, t| a.lerp(b, t),
            move |start: &T| start.clone() + offset.clone(),
            spec,
        )
    }
}

impl<T: Clone + 'static> Operation for PropertyOperation<T> {
    fn core(&self) -> &OperationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut OperationCore {
        &mut self.core
    }

    fn kind(&self) -> OperationKind {
        self.kind
    }

    fn on_start(&mut self) {
        let start = (self.reader)();
        self.end_value = Some(match &self.destination {
            Destination::Absolute(end) => end.clone(),
            Destination::Relative(resolve) => resolve(&start),
        });
        self.start_value = Some(start);
    }

    fn on_tick(&mut self) {
        let (Some(start), Some(end)) = (&self.start_value, &self.end_value) else {
            return;
        };
        let value = (self.interpolator)(start, end, self.core.eased_progress());
        (self.writer)(value);
    }

    fn on_complete(&mut self) {
        if let Some(end) = self.end_value().cloned() {
            (self.writer)(end);
        }
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for PropertyOperation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyOperation")
            .field("kind", &self.kind)
            .field("core", &self.core)
            .field("start_value", &self.start_value)
            .field("end_value", &self.end_value())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/property_tests.rs"]
mod tests;
