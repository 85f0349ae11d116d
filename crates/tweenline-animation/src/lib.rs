//! Easing curves and interpolation primitives for Tweenline.
//!
//! This crate has no notion of scheduling. It maps normalized progress to
//! eased progress, blends values, and describes how long a tween runs.

mod easing;
mod lerp;
mod spec;

pub use easing::{Easing, BACK_OVERSHOOT};
pub use lerp::Lerp;
pub use spec::TweenSpec;
