use tweenline_core::{Executor, OperationRef};

/// Default frame length: one frame at 60 Hz.
pub const DEFAULT_FRAME_TIME: f32 = 1.0 / 60.0;

const MAX_PUMPED_FRAMES: u64 = 100_000;

/// Headless harness for driving an executor frame by frame in tests.
///
/// `ExecutorTestRule` owns a private [`Executor`] (or borrows the shared one)
/// and plays the role of the host's frame loop, keeping count of how many
/// frames and how much unscaled time it has fed in.
pub struct ExecutorTestRule {
    executor: Executor,
    frame_time: f32,
    frames: u64,
    elapsed: f32,
}

impl ExecutorTestRule {
    /// Rule backed by a fresh executor ticking at 60 Hz.
    pub fn new() -> Self {
        Self::with_executor(Executor::labeled("test"))
    }

    /// Rule driving an existing executor, e.g. [`Executor::shared`].
    pub fn with_executor(executor: Executor) -> Self {
        Self {
            executor,
            frame_time: DEFAULT_FRAME_TIME,
            frames: 0,
            elapsed: 0.0,
        }
    }

    pub fn with_frame_time(mut self, frame_time: f32) -> Self {
        self.frame_time = frame_time;
        self
    }

    /// Register an operation with the executor under test.
    pub fn add(&self, operation: impl Into<OperationRef>) -> bool {
        self.executor.add(operation)
    }

    /// Run one frame of the configured length.
    pub fn advance_frame(&mut self) {
        self.advance_by(self.frame_time);
    }

    /// Run one frame of an arbitrary length.
    pub fn advance_by(&mut self, dt: f32) {
        self.executor.tick(dt);
        self.frames += 1;
        self.elapsed += dt;
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Keep running frames until the executor holds no operations. Returns the
    /// number of frames it took.
    ///
    /// Panics if the executor is still busy after a very large number of
    /// frames, which usually means an operation that never expires.
    pub fn pump_until_idle(&mut self) -> u64 {
        let start = self.frames;
        while !self.is_idle() {
            if self.frames - start >= MAX_PUMPED_FRAMES {
                panic!(
                    "pump_until_idle gave up after {MAX_PUMPED_FRAMES} frames with {} operations left",
                    self.active_count()
                );
            }
            self.advance_frame();
        }
        log::trace!("idle after {} frames", self.frames - start);
        self.frames - start
    }

    pub fn is_idle(&self) -> bool {
        self.executor.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.executor.len()
    }

    /// Number of frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Sum of the unscaled frame deltas fed in so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }
}

impl Default for ExecutorTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Tolerance used by [`assert_close`].
pub const EPSILON: f32 = 1e-4;

/// Assert that two floats agree within [`EPSILON`].
#[track_caller]
pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// Convenience helper for tests that only need temporary access to an
/// `ExecutorTestRule`.
pub fn run_test_executor<R>(f: impl FnOnce(&mut ExecutorTestRule) -> R) -> R {
    let mut rule = ExecutorTestRule::new();
    f(&mut rule)
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
