use crate::Easing;

/// Timing description for a tween: how long it runs, how its progress is
/// eased, and how long it waits before starting. All times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub duration: f32,
    pub easing: Easing,
    pub delay: f32,
}

impl TweenSpec {
    /// Create a tween with duration and easing.
    pub fn tween(duration: f32, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: 0.0,
        }
    }

    /// Create a linear tween.
    pub fn linear(duration: f32) -> Self {
        Self::tween(duration, Easing::Linear)
    }

    /// Add a delay before the tween starts.
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::linear(0.3)
    }
}
