//! Tiled multi-scale lacunarity.
//!
//! Mass is `255 − intensity`. For each window size the raster is split into
//! non-overlapping tiles (edge tiles clipped); each tile contributes
//! `λ = var / (mean² + ε)` which is stamped over its pixels.
use crate::image::{ImageF32, ImageView, LumaWeights};
use crate::raster::normalize01;
use log::debug;
use serde::{Deserialize, Serialize};

pub const LUMA: LumaWeights = LumaWeights::Rec601;

const LACUNARITY_EPS: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LacunarityOptions {
    pub window_sizes: Vec<usize>,
}

impl Default for LacunarityOptions {
    fn default() -> Self {
        Self {
            window_sizes: vec![4, 8, 16, 32],
        }
    }
}

/// Mean tile lacunarity at one window size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LacunarityScale {
    pub window: usize,
    pub mean_lambda: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LacunarityResult {
    /// Mean of the per-scale averages
    pub mean_lambda: f64,
    pub scales: Vec<LacunarityScale>,
    /// Average of the stamped λ maps across scales, rescaled to [0, 1]
    #[serde(skip)]
    pub heat: ImageF32,
}

pub fn lacunarity(gray: &ImageF32, options: &LacunarityOptions) -> LacunarityResult {
    let (w, h) = (gray.w, gray.h);
    let mut accum = ImageF32::new(w, h);
    let mut scales = Vec::with_capacity(options.window_sizes.len());

    for &window in &options.window_sizes {
        let win = window.max(1);
        let mut running = 0.0f64;
        let mut tiles = 0usize;
        for y0 in (0..h).step_by(win) {
            let y1 = (y0 + win).min(h);
            for x0 in (0..w).step_by(win) {
                let x1 = (x0 + win).min(w);
                let lambda = tile_lambda(gray, x0, x1, y0, y1);
                tiles += 1;
                // incremental mean over tiles
                running += (lambda - running) / tiles as f64;
                let stamp = lambda as f32;
                for y in y0..y1 {
                    let start = y * w;
                    for v in &mut accum.data[start + x0..start + x1] {
                        *v += stamp;
                    }
                }
            }
        }
        scales.push(LacunarityScale {
            window: win,
            mean_lambda: running,
        });
    }

    let heat = if scales.is_empty() {
        accum
    } else {
        let n = scales.len() as f32;
        normalize01(&accum.map(|v| v / n))
    };
    let mean_lambda = if scales.is_empty() {
        0.0
    } else {
        scales.iter().map(|s| s.mean_lambda).sum::<f64>() / scales.len() as f64
    };
    debug!(
        "lacunarity {}x{} windows={:?} mean={:.4}",
        w, h, options.window_sizes, mean_lambda
    );

    LacunarityResult {
        mean_lambda,
        scales,
        heat,
    }
}

fn tile_lambda(gray: &ImageF32, x0: usize, x1: usize, y0: usize, y1: usize) -> f64 {
    let n = ((x1 - x0) * (y1 - y0)) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mut sum = 0.0f64;
    for y in y0..y1 {
        for &v in &gray.row(y)[x0..x1] {
            sum += 255.0 - v as f64;
        }
    }
    let mean = sum / n;
    let mut ss = 0.0f64;
    for y in y0..y1 {
        for &v in &gray.row(y)[x0..x1] {
            let d = (255.0 - v as f64) - mean;
            ss += d * d;
        }
    }
    let variance = ss / n;
    variance / (mean * mean + LACUNARITY_EPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_raster_has_zero_lacunarity() {
        for level in [0.0f32, 37.0, 128.0, 255.0] {
            let img = ImageF32::from_vec(20, 13, vec![level; 20 * 13]);
            let res = lacunarity(&img, &LacunarityOptions::default());
            assert_eq!(res.mean_lambda, 0.0);
            assert!(res.scales.iter().all(|s| s.mean_lambda == 0.0));
            assert!(res.heat.data.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn half_filled_tile_matches_closed_form() {
        // 2x2 tile: two pixels of mass 255, two of mass 0 → mean 127.5, var 127.5²
        let img = ImageF32::from_vec(2, 2, vec![0.0, 255.0, 0.0, 255.0]);
        let res = lacunarity(
            &img,
            &LacunarityOptions {
                window_sizes: vec![2],
            },
        );
        assert!((res.mean_lambda - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sparse_texture_is_more_lacunar_than_dense() {
        let mut sparse = ImageF32::from_vec(32, 32, vec![255.0; 1024]);
        let mut dense = ImageF32::from_vec(32, 32, vec![255.0; 1024]);
        for y in 0..32 {
            for x in 0..32 {
                if x % 8 == 0 && y % 8 == 0 {
                    sparse.set(x, y, 0.0);
                }
                if (x + y) % 2 == 0 {
                    dense.set(x, y, 0.0);
                }
            }
        }
        let opts = LacunarityOptions {
            window_sizes: vec![8],
        };
        let a = lacunarity(&sparse, &opts).mean_lambda;
        let b = lacunarity(&dense, &opts).mean_lambda;
        assert!(a > b, "sparse={a} dense={b}");
    }
}
