//! The per-operation state machine.
//!
//! Every schedulable unit embeds an [`OperationCore`] and implements
//! [`Operation`] to receive three lifecycle hooks. Driving the state machine
//! is the job of [`OperationExt::tick`], which is what an [`Executor`] calls
//! once per frame.
//!
//! ```text
//! Idle ──tick──▶ Delaying ──delay spent──▶ Active ──expired──▶ Expired
//!   └──────────────── no delay ─────────────▲
//! ```
//!
//! [`Executor`]: crate::Executor

use tweenline_animation::{Easing, TweenSpec};

use crate::conditional::Conditional;
use crate::executor::{Executor, OwnerSlot};
use crate::sequence::Sequence;
use crate::target::TargetId;

/// Concrete kind of an operation, used by [`Filter`](crate::Filter) to
/// select operations without downcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Property,
    Lambda,
    Sequence,
    /// Application-defined kinds, e.g. `Named("fade")` for a fade adapter.
    Named(&'static str),
}

/// Where an operation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed but never advanced.
    Idle,
    /// Counting down its delay.
    Delaying,
    /// Started; hooks fire every tick.
    Active,
    /// Completed. Terminal.
    Expired,
}

/// State shared by every operation.
///
/// Times are in seconds. `time_elapsed` only accumulates once the delay has
/// been spent, and never exceeds `expiration_time` when that is positive.
#[derive(Debug)]
pub struct OperationCore {
    delay: f32,
    time_elapsed: f32,
    expiration_time: f32,
    target: Option<TargetId>,
    easing: Easing,
    can_tick: Conditional,
    has_expired: Conditional,
    default_expiration: bool,
    paused: bool,
    stopped: bool,
    engaged: bool,
    completed: bool,
    owner: OwnerSlot,
}

impl OperationCore {
    /// Core with the default expiration rule: the operation expires once its
    /// elapsed time reaches its expiration time.
    pub fn new() -> Self {
        Self {
            delay: 0.0,
            time_elapsed: 0.0,
            expiration_time: 0.0,
            target: None,
            easing: Easing::Linear,
            can_tick: Conditional::all(),
            has_expired: Conditional::any(),
            default_expiration: true,
            paused: false,
            stopped: false,
            engaged: false,
            completed: false,
            owner: OwnerSlot::default(),
        }
    }

    /// Core with no expiration rule at all. The owner must expire it through
    /// [`expiry_mut`](Self::expiry_mut), [`stop`](Self::stop), or its own
    /// [`Operation::is_finished`].
    pub fn without_default_expiration() -> Self {
        Self {
            default_expiration: false,
            ..Self::new()
        }
    }

    pub fn with_target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.expiration_time = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Apply duration, easing and delay from a [`TweenSpec`].
    pub fn with_spec(self, spec: &TweenSpec) -> Self {
        self.with_duration(spec.duration)
            .with_easing(spec.easing)
            .with_delay(spec.delay)
    }

    /// Seconds still to wait before the operation activates.
    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn set_delay(&mut self, delay: f32) {
        self.delay = delay;
    }

    pub fn time_elapsed(&self) -> f32 {
        self.time_elapsed
    }

    pub fn expiration_time(&self) -> f32 {
        self.expiration_time
    }

    pub fn time_left(&self) -> f32 {
        (self.expiration_time - self.time_elapsed).max(0.0)
    }

    /// Linear progress, always within `[0, 1]`.
    ///
    /// Operations without a positive expiration time jump straight from 0 to 1
    /// once they have advanced.
    pub fn progress(&self) -> f32 {
        if self.expiration_time <= 0.0 {
            return if self.time_elapsed > 0.0 { 1.0 } else { 0.0 };
        }
        (self.time_elapsed / self.expiration_time).clamp(0.0, 1.0)
    }

    /// Progress remapped through the easing curve. May leave `[0, 1]`.
    pub fn eased_progress(&self) -> f32 {
        self.easing.transform(self.progress())
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Checks gating whether the operation may advance. All must pass.
    pub fn can_tick(&self) -> &Conditional {
        &self.can_tick
    }

    pub fn can_tick_mut(&mut self) -> &mut Conditional {
        &mut self.can_tick
    }

    /// Extra expiration checks. Any passing one expires the operation.
    pub fn expiry(&self) -> &Conditional {
        &self.has_expired
    }

    pub fn expiry_mut(&mut self) -> &mut Conditional {
        &mut self.has_expired
    }

    pub fn uses_default_expiration(&self) -> bool {
        self.default_expiration
    }

    /// Whether the default expiration rule is satisfied.
    ///
    /// The rule also requires the operation to have advanced at least once,
    /// so zero-length operations still run their start and tick hooks.
    pub fn default_expiration_reached(&self) -> bool {
        self.default_expiration
            && self.time_elapsed > 0.0
            && self.time_elapsed >= self.expiration_time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Force the operation to expire. Idempotent and irreversible.
    ///
    /// The operation completes on its next advancing tick, or is reaped by
    /// its executor at the end of the current frame.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn has_started(&self) -> bool {
        self.time_elapsed > 0.0
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Expired
        } else if self.has_started() {
            Phase::Active
        } else if self.engaged && self.delay > 0.0 {
            Phase::Delaying
        } else {
            Phase::Idle
        }
    }

    /// The executor this operation is registered with, if it is still alive.
    pub fn belongs_to(&self) -> Option<Executor> {
        self.owner.get()
    }

    pub(crate) fn owner_slot(&self) -> &OwnerSlot {
        &self.owner
    }
}

impl Default for OperationCore {
    fn default() -> Self {
        Self::new()
    }
}

/// A schedulable unit of timed state change.
///
/// Implementors embed an [`OperationCore`] and override whichever hooks they
/// need. Hooks run while the operation is mutably borrowed, so they must not
/// reach back into the operation through its own handle.
pub trait Operation: 'static {
    fn core(&self) -> &OperationCore;

    fn core_mut(&mut self) -> &mut OperationCore;

    fn kind(&self) -> OperationKind;

    /// Called once, on the first tick after the delay is spent and before
    /// any [`on_tick`](Self::on_tick). Capture starting values here.
    fn on_start(&mut self) {}

    /// Called on every advancing tick, after elapsed time was accumulated.
    fn on_tick(&mut self) {}

    /// Called exactly once, on the tick where the operation first expires.
    /// Snap to the exact final value here.
    fn on_complete(&mut self) {}

    /// Intrinsic expiration rule, combined with the core's expiry checks.
    fn is_finished(&self) -> bool {
        self.core().default_expiration_reached()
    }

    /// Access to nested sequences for recursive removal.
    fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        None
    }
}

/// Driving methods available on every operation, including `dyn Operation`.
pub trait OperationExt: Operation {
    /// Advance the state machine by `dt` seconds.
    fn tick(&mut self, dt: f32);

    /// Whether the operation is stopped, finished, or has a passing expiry
    /// check.
    fn has_expired(&self) -> bool;
}

impl<O: Operation + ?Sized> OperationExt for O {
    fn tick(&mut self, dt: f32) {
        // Zero (and negative or NaN) deltas are probes, not time.
        if !(dt > 0.0) {
            return;
        }
        {
            let core = self.core();
            if core.completed || core.paused || !core.can_tick.evaluate() {
                return;
            }
        }

        let core = self.core_mut();
        core.engaged = true;
        core.delay = (core.delay - dt).max(0.0);
        if core.delay > 0.0 {
            return;
        }

        if self.core().time_elapsed <= 0.0 {
            self.on_start();
        }

        let core = self.core_mut();
        core.time_elapsed += dt;
        if core.expiration_time > 0.0 {
            core.time_elapsed = core.time_elapsed.min(core.expiration_time);
        }
        self.on_tick();

        if !self.core().completed && self.has_expired() {
            self.core_mut().completed = true;
            self.on_complete();
        }
    }

    fn has_expired(&self) -> bool {
        let core = self.core();
        core.stopped || self.is_finished() || core.has_expired.evaluate()
    }
}

#[cfg(test)]
#[path = "tests/operation_tests.rs"]
mod tests;
