//! Box-counting fractal dimension.
//!
//! For each of `steps` geometrically spaced box sizes between `min_box` and
//! `max_box`, the raster is tiled with non-overlapping boxes (edge boxes
//! clipped). A box is occupied when any pixel inside is darker than 250.
//! The dimension is the least-squares slope of `ln(count)` against
//! `ln(1 / size)`; the heat map counts, per pixel, the scales at which its box
//! was occupied, divided by the maximum.
use crate::image::{ImageF32, ImageView, LumaWeights};
use log::debug;
use serde::{Deserialize, Serialize};

pub const LUMA: LumaWeights = LumaWeights::Rec601;

const OCCUPIED_BELOW: f32 = 250.0;
const COUNT_EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalOptions {
    pub min_box: usize,
    pub max_box: usize,
    pub steps: usize,
}

impl Default for FractalOptions {
    fn default() -> Self {
        Self {
            min_box: 2,
            max_box: 64,
            steps: 6,
        }
    }
}

impl FractalOptions {
    /// Box edge length for scale `s`, never below 2.
    pub fn box_size(&self, s: usize) -> usize {
        let min = self.min_box.max(1) as f64;
        let max = self.max_box.max(1) as f64;
        let t = if self.steps > 1 {
            s as f64 / (self.steps - 1) as f64
        } else {
            0.0
        };
        let size = (min * (max / min).powf(t)).round() as usize;
        size.max(2)
    }
}

/// Occupancy at one box size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScale {
    pub box_size: usize,
    pub occupied: usize,
    pub total: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FractalResult {
    /// Estimated box-counting dimension D
    pub dimension: f64,
    pub scales: Vec<BoxScale>,
    #[serde(skip)]
    pub heat: ImageF32,
}

pub fn box_count_fractal(gray: &ImageF32, options: &FractalOptions) -> FractalResult {
    let (w, h) = (gray.w, gray.h);
    let mut heat = ImageF32::new(w, h);
    let mut scales = Vec::with_capacity(options.steps);
    let mut xs = Vec::with_capacity(options.steps);
    let mut ys = Vec::with_capacity(options.steps);

    for s in 0..options.steps {
        let size = options.box_size(s);
        let mut occupied = 0usize;
        let mut total = 0usize;
        for y0 in (0..h).step_by(size) {
            let y1 = (y0 + size).min(h);
            for x0 in (0..w).step_by(size) {
                let x1 = (x0 + size).min(w);
                total += 1;
                let hit = (y0..y1).any(|y| gray.row(y)[x0..x1].iter().any(|&v| v < OCCUPIED_BELOW));
                if !hit {
                    continue;
                }
                occupied += 1;
                for y in y0..y1 {
                    let start = y * w;
                    for v in &mut heat.data[start + x0..start + x1] {
                        *v += 1.0;
                    }
                }
            }
        }
        xs.push((1.0 / size as f64).ln());
        ys.push((occupied as f64 + COUNT_EPS).ln());
        scales.push(BoxScale {
            box_size: size,
            occupied,
            total,
        });
    }

    let dimension = least_squares_slope(&xs, &ys);
    let peak = heat.max_value();
    if peak > 0.0 {
        for v in &mut heat.data {
            *v /= peak;
        }
    }
    debug!(
        "box_count_fractal {}x{} scales={} D={:.4}",
        w,
        h,
        scales.len(),
        dimension
    );

    FractalResult {
        dimension,
        scales,
        heat,
    }
}

/// Ordinary least-squares slope of `ys` over `xs`; zero when `xs` has no spread.
///
/// `ys` is shifted by its first sample before fitting so that a constant
/// series produces an exactly zero numerator.
pub(crate) fn least_squares_slope(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let y0 = ys[0];
    let mx = xs[..n].iter().sum::<f64>() / n as f64;
    let my = ys[..n].iter().map(|y| y - y0).sum::<f64>() / n as f64;
    let mut num = 0.0;
    let mut den = 0.0;
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = x - mx;
        num += dx * ((y - y0) - my);
        den += dx * dx;
    }
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}
