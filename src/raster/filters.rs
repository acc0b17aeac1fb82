/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];

    #[inline]
    fn radius(&self) -> usize {
        self.taps().len() / 2
    }
}

/// Sampled Gaussian with radius `round(3σ)`, normalized to unit sum.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    taps: Vec<f32>,
}

impl GaussianKernel {
    /// Build the kernel for `sigma`. Non-positive sigma yields the identity tap `[1.0]`.
    pub fn new(sigma: f32) -> Self {
        if sigma <= 0.0 {
            return Self { taps: vec![1.0] };
        }
        let radius = (3.0 * sigma).round() as isize;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (-radius..=radius)
            .map(|i| (-((i * i) as f32) / denom).exp())
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { taps }
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}
