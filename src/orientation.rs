//! Tile orientation coherence from magnitude-weighted Sobel histograms.
//!
//! Each non-overlapping tile (edge tiles clipped) accumulates a histogram of
//! gradient angles mapped from (−π, π] onto `bins` buckets, weighted by
//! gradient magnitude. The spread `sqrt(var(bins)) / Σ bins` is high when one
//! direction dominates; the tile value is `1 − min(1, 2 · spread)`, so ordered
//! tiles score low and isotropic or flat tiles score high.
use crate::gradient::sobel_gradients;
use crate::image::{ImageF32, LumaWeights};
use log::debug;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

pub const LUMA: LumaWeights = LumaWeights::Rec601;

const MIN_TILE: usize = 8;
const MIN_BINS: usize = 6;
const SUM_EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationOptions {
    /// Tile edge length, raised to at least 8
    pub tile: usize,
    /// Histogram buckets, raised to at least 6
    pub bins: usize,
}

impl Default for OrientationOptions {
    fn default() -> Self {
        Self { tile: 16, bins: 12 }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationResult {
    /// Mean of the per-tile values
    pub mean_value: f64,
    pub tiles: usize,
    #[serde(skip)]
    pub field: ImageF32,
}

pub fn orientation_coherence(gray: &ImageF32, options: &OrientationOptions) -> OrientationResult {
    let tile = options.tile.max(MIN_TILE);
    let bins = options.bins.max(MIN_BINS);
    let (w, h) = (gray.w, gray.h);
    let grad = sobel_gradients(gray);

    let mut field = ImageF32::new(w, h);
    let mut hist = vec![0.0f64; bins];
    let mut total = 0.0f64;
    let mut tiles = 0usize;

    for y0 in (0..h).step_by(tile) {
        let y1 = (y0 + tile).min(h);
        for x0 in (0..w).step_by(tile) {
            let x1 = (x0 + tile).min(w);
            hist.iter_mut().for_each(|b| *b = 0.0);
            for y in y0..y1 {
                for x in x0..x1 {
                    let i = y * w + x;
                    let b = angle_bin(grad.ori.data[i], bins);
                    hist[b] += grad.mag.data[i] as f64;
                }
            }
            let value = tile_value(&hist);
            for y in y0..y1 {
                let start = y * w;
                for v in &mut field.data[start + x0..start + x1] {
                    *v = value as f32;
                }
            }
            total += value;
            tiles += 1;
        }
    }

    let mean_value = if tiles > 0 { total / tiles as f64 } else { 0.0 };
    debug!(
        "orientation_coherence {}x{} tile={} bins={} tiles={} mean={:.4}",
        w, h, tile, bins, tiles, mean_value
    );
    OrientationResult {
        mean_value,
        tiles,
        field,
    }
}

#[inline]
fn angle_bin(angle: f32, bins: usize) -> usize {
    let t = (angle + PI) / (2.0 * PI);
    ((t * bins as f32).floor().max(0.0) as usize).min(bins - 1)
}

fn tile_value(hist: &[f64]) -> f64 {
    let n = hist.len() as f64;
    let sum: f64 = hist.iter().sum();
    let mean = sum / n;
    let var = hist.iter().map(|b| (b - mean) * (b - mean)).sum::<f64>() / n;
    let spread = var.sqrt() / (sum + SUM_EPS);
    1.0 - (spread * 2.0).min(1.0)
}
