//! Structure tensor (second-moment matrix) eigen-analysis.
//!
//! The per-pixel outer products `Ix²`, `Iy²`, `Ix·Iy` are Gaussian-smoothed
//! into `Jxx`, `Jyy`, `Jxy`; eigenvalues of the symmetric 2×2 matrix are taken
//! in closed form.
use crate::image::ImageF32;
use crate::raster::{gaussian_blur, normalize01};
use log::debug;

const COHERENCE_EPS: f32 = 1e-6;

#[derive(Clone, Debug)]
pub struct StructureTensor {
    pub jxx: ImageF32,
    pub jyy: ImageF32,
    pub jxy: ImageF32,
    /// Larger eigenvalue
    pub lambda1: ImageF32,
    /// Smaller eigenvalue
    pub lambda2: ImageF32,
    /// `(λ1 − λ2) / (λ1 + λ2)`, zero where the sum is below `1e-6`
    pub coherence: ImageF32,
    /// `λ1` rescaled to [0, 1] over the whole image
    pub corner: ImageF32,
    /// `0.5 · atan2(2Jxy, Jxx − Jyy)`
    pub orientation: ImageF32,
}

impl StructureTensor {
    /// Mean coherence over all pixels.
    pub fn mean_coherence(&self) -> f64 {
        crate::raster::mean(&self.coherence.data)
    }
}

/// Build the structure tensor from first derivatives `ix`, `iy`.
pub fn structure_tensor(ix: &ImageF32, iy: &ImageF32, sigma: f32) -> StructureTensor {
    debug_assert_eq!(ix.len(), iy.len());
    let (w, h) = (ix.w, ix.h);
    debug!("structure_tensor {}x{} sigma={:.2}", w, h, sigma);

    let ixx = ix.map(|v| v * v);
    let iyy = iy.map(|v| v * v);
    let mut ixy = ImageF32::new(w, h);
    for ((dst, &a), &b) in ixy.data.iter_mut().zip(&ix.data).zip(&iy.data) {
        *dst = a * b;
    }

    let jxx = gaussian_blur(&ixx, sigma);
    let jyy = gaussian_blur(&iyy, sigma);
    let jxy = gaussian_blur(&ixy, sigma);

    let mut lambda1 = ImageF32::new(w, h);
    let mut lambda2 = ImageF32::new(w, h);
    let mut coherence = ImageF32::new(w, h);
    let mut orientation = ImageF32::new(w, h);
    for i in 0..w * h {
        let (a, c, b) = (jxx.data[i], jyy.data[i], jxy.data[i]);
        let (l1, l2) = eigenvalues_sym2(a, b, c);
        lambda1.data[i] = l1;
        lambda2.data[i] = l2;
        let sum = l1 + l2;
        coherence.data[i] = if sum > COHERENCE_EPS {
            (l1 - l2) / sum
        } else {
            0.0
        };
        orientation.data[i] = 0.5 * (2.0 * b).atan2(a - c);
    }
    let corner = normalize01(&lambda1);

    StructureTensor {
        jxx,
        jyy,
        jxy,
        lambda1,
        lambda2,
        coherence,
        corner,
        orientation,
    }
}

/// Eigenvalues `(λ1 ≥ λ2)` of `[[a, b], [b, c]]`.
#[inline]
pub fn eigenvalues_sym2(a: f32, b: f32, c: f32) -> (f32, f32) {
    let trace = a + c;
    let det = a * c - b * b;
    let disc = (trace * trace - 4.0 * det).max(0.0);
    let root = disc.sqrt();
    ((trace + root) * 0.5, (trace - root) * 0.5)
}
