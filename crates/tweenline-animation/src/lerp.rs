/// Trait for types that can be linearly interpolated.
///
/// `fraction` is usually an eased progress value and may fall outside
/// `[0, 1]` for overshooting curves; implementations must extrapolate rather
/// than clamp.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

impl<const N: usize> Lerp for [f32; N] {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        std::array::from_fn(|i| self[i].lerp(&target[i], fraction))
    }
}

impl Lerp for (f32, f32) {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        (
            self.0.lerp(&target.0, fraction),
            self.1.lerp(&target.1, fraction),
        )
    }
}
