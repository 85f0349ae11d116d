//! Closed-form easing curves.
//!
//! Every curve maps a linear fraction in `[0, 1]` to an eased fraction. The
//! endpoints are preserved, but overshooting curves (`Back`, `Elastic`) leave
//! the unit interval in between, and callers must not clamp the result.

use std::f32::consts::PI;
use std::fmt;

/// Overshoot amount used by the `Back` family unless a custom one is given.
pub const BACK_OVERSHOOT: f32 = 1.70158;

const ELASTIC_PERIOD: f32 = 0.3;

/// Easing curve applied to the progress of an operation.
#[derive(Clone, Copy)]
pub enum Easing {
    /// No easing.
    Linear,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    /// `t^n`.
    InPower(i32),
    OutPower(i32),
    InOutPower(i32),
    InBounce,
    OutBounce,
    InOutBounce,
    InElastic,
    OutElastic,
    InOutElastic,
    /// Pulls back by [`BACK_OVERSHOOT`] before moving forward.
    InBack,
    OutBack,
    InOutBack,
    /// `Back` curves with a caller supplied overshoot.
    InBackWith(f32),
    OutBackWith(f32),
    InOutBackWith(f32),
    InCirc,
    OutCirc,
    InOutCirc,
    /// CSS-style cubic bezier through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    CubicBezier(f32, f32, f32, f32),
    /// Arbitrary user curve.
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// Apply the easing function to a linear fraction.
    pub fn transform(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t,
            Easing::InSine => (PI / 2.0 * (t - 1.0)).sin() + 1.0,
            Easing::OutSine => (t * PI / 2.0).sin(),
            Easing::InOutSine => ((PI * (t - 0.5)).sin() + 1.0) * 0.5,
            Easing::InQuad => t * t,
            Easing::OutQuad => t * (2.0 - t),
            Easing::InOutQuad => {
                let t = t * 2.0;
                if t < 1.0 {
                    t * t * 0.5
                } else {
                    -0.5 * ((t - 1.0) * (t - 3.0) - 1.0)
                }
            }
            Easing::InCubic => in_power(t, 3),
            Easing::OutCubic => out_power(t, 3),
            Easing::InOutCubic => in_out_power(t, 3),
            Easing::InPower(power) => in_power(t, power),
            Easing::OutPower(power) => out_power(t, power),
            Easing::InOutPower(power) => in_out_power(t, power),
            Easing::InBounce => in_bounce(t),
            Easing::OutBounce => out_bounce(t),
            Easing::InOutBounce => {
                if t < 0.5 {
                    in_bounce(t * 2.0) * 0.5
                } else {
                    out_bounce((t - 0.5) * 2.0) * 0.5 + 0.5
                }
            }
            Easing::InElastic => in_elastic(t),
            Easing::OutElastic => out_elastic(t),
            Easing::InOutElastic => {
                if t < 0.5 {
                    in_elastic(t * 2.0) * 0.5
                } else {
                    out_elastic((t - 0.5) * 2.0) * 0.5 + 0.5
                }
            }
            Easing::InBack => in_back(t, BACK_OVERSHOOT),
            Easing::OutBack => out_back(t, BACK_OVERSHOOT),
            Easing::InOutBack => in_out_back(t, BACK_OVERSHOOT),
            Easing::InBackWith(s) => in_back(t, s),
            Easing::OutBackWith(s) => out_back(t, s),
            Easing::InOutBackWith(s) => in_out_back(t, s),
            Easing::InCirc => -((1.0 - t * t).sqrt() - 1.0),
            Easing::OutCirc => {
                let t = t - 1.0;
                (1.0 - t * t).sqrt()
            }
            Easing::InOutCirc => {
                let t = t * 2.0;
                if t < 1.0 {
                    -0.5 * ((1.0 - t * t).sqrt() - 1.0)
                } else {
                    let t = t - 2.0;
                    0.5 * ((1.0 - t * t).sqrt() + 1.0)
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
            Easing::Custom(curve) => curve(t),
        }
    }

    /// Apply the easing function and remap the result onto `[min, max]`.
    pub fn transform_in_range(&self, t: f32, min: f32, max: f32) -> f32 {
        min + (max - min) * self.transform(t)
    }

    /// Whether the curve may leave `[0, 1]` between its endpoints.
    pub fn overshoots(&self) -> bool {
        matches!(
            self,
            Easing::InElastic
                | Easing::OutElastic
                | Easing::InOutElastic
                | Easing::InBack
                | Easing::OutBack
                | Easing::InOutBack
                | Easing::InBackWith(_)
                | Easing::OutBackWith(_)
                | Easing::InOutBackWith(_)
                | Easing::Custom(_)
        )
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Linear
    }
}

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        use Easing::*;
        match (*self, *other) {
            (InPower(a), InPower(b)) | (OutPower(a), OutPower(b)) | (InOutPower(a), InOutPower(b)) => {
                a == b
            }
            (InBackWith(a), InBackWith(b))
            | (OutBackWith(a), OutBackWith(b))
            | (InOutBackWith(a), InOutBackWith(b)) => a == b,
            (CubicBezier(a1, b1, c1, d1), CubicBezier(a2, b2, c2, d2)) => {
                a1 == a2 && b1 == b2 && c1 == c2 && d1 == d2
            }
            (Custom(a), Custom(b)) => a as usize == b as usize,
            (a, b) => std::mem::discriminant(&a) == std::mem::discriminant(&b),
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::InPower(p) => write!(f, "InPower({p})"),
            Easing::OutPower(p) => write!(f, "OutPower({p})"),
            Easing::InOutPower(p) => write!(f, "InOutPower({p})"),
            Easing::InBackWith(s) => write!(f, "InBackWith({s})"),
            Easing::OutBackWith(s) => write!(f, "OutBackWith({s})"),
            Easing::InOutBackWith(s) => write!(f, "InOutBackWith({s})"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({x1}, {y1}, {x2}, {y2})")
            }
            Easing::Custom(_) => f.write_str("Custom(..)"),
            other => f.write_str(other.name()),
        }
    }
}

impl Easing {
    fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::InSine => "InSine",
            Easing::OutSine => "OutSine",
            Easing::InOutSine => "InOutSine",
            Easing::InQuad => "InQuad",
            Easing::OutQuad => "OutQuad",
            Easing::InOutQuad => "InOutQuad",
            Easing::InCubic => "InCubic",
            Easing::OutCubic => "OutCubic",
            Easing::InOutCubic => "InOutCubic",
            Easing::InBounce => "InBounce",
            Easing::OutBounce => "OutBounce",
            Easing::InOutBounce => "InOutBounce",
            Easing::InElastic => "InElastic",
            Easing::OutElastic => "OutElastic",
            Easing::InOutElastic => "InOutElastic",
            Easing::InBack => "InBack",
            Easing::OutBack => "OutBack",
            Easing::InOutBack => "InOutBack",
            Easing::InCirc => "InCirc",
            Easing::OutCirc => "OutCirc",
            Easing::InOutCirc => "InOutCirc",
            _ => "Easing",
        }
    }
}

fn in_power(t: f32, power: i32) -> f32 {
    t.powi(power)
}

// Odd powers approach 1 from below, even powers need the sign flipped.
fn out_power(t: f32, power: i32) -> f32 {
    let sign = if power % 2 != 0 { 1.0 } else { -1.0 };
    sign * ((t - 1.0).powi(power) + sign)
}

fn in_out_power(t: f32, power: i32) -> f32 {
    let t = t * 2.0;
    if t < 1.0 {
        return in_power(t, power) * 0.5;
    }
    let sign = if power % 2 != 0 { 1.0 } else { -1.0 };
    sign * 0.5 * ((t - 2.0).powi(power) + sign * 2.0)
}

fn in_bounce(t: f32) -> f32 {
    1.0 - out_bounce(1.0 - t)
}

fn out_bounce(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

fn in_elastic(t: f32) -> f32 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let shift = ELASTIC_PERIOD / 4.0;
    let t = t - 1.0;
    -(2f32.powf(10.0 * t) * ((t - shift) * (2.0 * PI) / ELASTIC_PERIOD).sin())
}

fn out_elastic(t: f32) -> f32 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let shift = ELASTIC_PERIOD / 4.0;
    2f32.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / ELASTIC_PERIOD).sin() + 1.0
}

fn in_back(t: f32, s: f32) -> f32 {
    t * t * ((s + 1.0) * t - s)
}

fn out_back(t: f32, s: f32) -> f32 {
    1.0 - in_back(1.0 - t, s)
}

fn in_out_back(t: f32, s: f32) -> f32 {
    if t < 0.5 {
        in_back(t * 2.0, s) * 0.5
    } else {
        out_back((t - 0.5) * 2.0, s) * 0.5 + 0.5
    }
}

/// Solve the bezier for `x == t` and return the matching `y`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let (ax, bx, cx) = polynomial(x1, x2);
    let (ay, by, cy) = polynomial(y1, y2);
    let sample = |a: f32, b: f32, c: f32, u: f32| ((a * u + b) * u + c) * u;
    let slope = |a: f32, b: f32, c: f32, u: f32| (3.0 * a * u + 2.0 * b) * u + c;

    let mut u = t;
    let mut solved = false;
    for _ in 0..8 {
        let error = sample(ax, bx, cx, u) - t;
        if error.abs() < 1e-6 {
            solved = true;
            break;
        }
        let d = slope(ax, bx, cx, u);
        if d.abs() < 1e-6 {
            break;
        }
        u = (u - error / d).clamp(0.0, 1.0);
    }

    // Newton stalls on flat segments; bisect instead.
    if !solved {
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        u = t;
        for _ in 0..24 {
            let error = sample(ax, bx, cx, u) - t;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                hi = u;
            } else {
                lo = u;
            }
            u = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, u)
}

fn polynomial(p1: f32, p2: f32) -> (f32, f32, f32) {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (a, b, c)
}

#[cfg(test)]
#[path = "tests/easing_tests.rs"]
mod tests;
