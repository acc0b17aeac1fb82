//! Aesthetic charge: local CIELAB contrast plus lightness curvature plus a
//! global texture term.
//!
//! `q = w1·|L − L̄| + w2·|a − ā| + w3·|b − b̄| + w4·|∇²L| + w5·H`, where the bars
//! are `kernel_size × kernel_size` box means (clamp-to-edge), `∇²` is the
//! 4-neighbour Laplacian and `H` is the Shannon entropy (bits) of the 256-bin
//! Rec. 601 gray histogram, broadcast over the field.
use crate::gradient::central::laplacian_4;
use crate::image::{ColorImage, ImageF32, LumaWeights};
use crate::raster::{convolve_separable, SeparableFilter};
use log::debug;
use serde::{Deserialize, Serialize};

pub const LUMA: LumaWeights = LumaWeights::Rec601;

const ENTROPY_EPS: f64 = 1e-9;

// D65 reference white
const XN: f32 = 0.95047;
const YN: f32 = 1.0;
const ZN: f32 = 1.08883;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeOptions {
    /// Box-mean window edge length
    pub kernel_size: usize,
    /// Weights for (ΔL, Δa, Δb, |∇²L|, entropy)
    pub weights: [f32; 5],
}

impl Default for ChargeOptions {
    fn default() -> Self {
        Self {
            kernel_size: 5,
            weights: [1.0, 1.0, 1.0, 0.5, 0.3],
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeResult {
    /// Gray-histogram entropy in bits
    pub entropy: f64,
    #[serde(skip)]
    pub charge: ImageF32,
}

/// Uniform box filter of odd or even width `size` (even widths lean left).
struct BoxFilter {
    taps: Vec<f32>,
}

impl BoxFilter {
    fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            taps: vec![1.0 / size as f32; size],
        }
    }
}

impl SeparableFilter for BoxFilter {
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// CIELAB planes `(L, a, b)` of an sRGB image.
pub fn srgb_to_lab(img: &ColorImage<'_>) -> [ImageF32; 3] {
    let mut l = ImageF32::new(img.w, img.h);
    let mut a = ImageF32::new(img.w, img.h);
    let mut b = ImageF32::new(img.w, img.h);
    for y in 0..img.h {
        for x in 0..img.w {
            let [r, g, bl] = img.rgb(x, y).map(|c| srgb_to_linear(c as f32 / 255.0));
            let xr = (0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * bl) / XN;
            let yr = (0.212_672_9 * r + 0.715_152_2 * g + 0.072_175 * bl) / YN;
            let zr = (0.019_333_9 * r + 0.119_192 * g + 0.950_304_1 * bl) / ZN;
            let (fx, fy, fz) = (lab_f(xr), lab_f(yr), lab_f(zr));
            let i = y * img.w + x;
            l.data[i] = 116.0 * fy - 16.0;
            a.data[i] = 500.0 * (fx - fy);
            b.data[i] = 200.0 * (fy - fz);
        }
    }
    [l, a, b]
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// Shannon entropy in bits of the 256-bin histogram of `gray` (0–255 domain).
pub fn histogram_entropy(gray: &ImageF32) -> f64 {
    if gray.is_empty() {
        return 0.0;
    }
    let mut hist = [0usize; 256];
    for &v in &gray.data {
        hist[v.round().clamp(0.0, 255.0) as usize] += 1;
    }
    let n = gray.len() as f64;
    -hist
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * (p + ENTROPY_EPS).log2()
        })
        .sum::<f64>()
}

pub fn aesthetic_charge(img: &ColorImage<'_>, options: &ChargeOptions) -> ChargeResult {
    let [l, a, b] = srgb_to_lab(img);
    let filter = BoxFilter::new(options.kernel_size);
    let [w1, w2, w3, w4, w5] = options.weights;

    let l_mean = convolve_separable(&l, &filter);
    let a_mean = convolve_separable(&a, &filter);
    let b_mean = convolve_separable(&b, &filter);
    let l_lap = laplacian_4(&l);
    let entropy = histogram_entropy(&img.to_gray(LUMA));

    let mut charge = ImageF32::new(img.w, img.h);
    for (i, q) in charge.data.iter_mut().enumerate() {
        *q = w1 * (l.data[i] - l_mean.data[i]).abs()
            + w2 * (a.data[i] - a_mean.data[i]).abs()
            + w3 * (b.data[i] - b_mean.data[i]).abs()
            + w4 * l_lap.data[i].abs()
            + w5 * entropy as f32;
    }
    debug!(
        "aesthetic_charge {}x{} kernel={} entropy={:.3}",
        img.w, img.h, options.kernel_size, entropy
    );
    ChargeResult { entropy, charge }
}
