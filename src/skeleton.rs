//! Zhang–Suen thinning and a junction-based branching metric.
//!
//! The raster is binarized at `intensity < 180`. Each iteration runs the two
//! classic sub-passes; within a sub-pass all deletions are decided on the
//! current image and applied together. A worklist of live pixels is kept so
//! later passes only revisit the shrinking foreground.
use crate::image::{ImageF32, LumaWeights};
use log::debug;
use serde::{Deserialize, Serialize};

pub const LUMA: LumaWeights = LumaWeights::Rec601;

const FOREGROUND_BELOW: f32 = 180.0;
const PIXELS_PER_EXPECTED_JUNCTION: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonOptions {
    /// Upper bound on thinning iterations (each = both sub-passes)
    pub thinning_iters: usize,
}

impl Default for SkeletonOptions {
    fn default() -> Self {
        Self { thinning_iters: 50 }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkeletonResult {
    pub iterations: usize,
    pub skeleton_pixels: usize,
    pub junctions: usize,
    /// `min(1, junctions / max(1, skeleton_pixels / 50))`
    pub branching_norm: f64,
    /// 0/1 skeleton mask
    #[serde(skip)]
    pub skeleton: ImageF32,
}

pub fn skeletonize(gray: &ImageF32, options: &SkeletonOptions) -> SkeletonResult {
    let (w, h) = (gray.w, gray.h);
    let mut mask: Vec<bool> = gray.data.iter().map(|&v| v < FOREGROUND_BELOW).collect();
    let mut live: Vec<usize> = (0..mask.len()).filter(|&i| mask[i]).collect();
    let mut marked = Vec::new();

    let mut iterations = 0usize;
    while iterations < options.thinning_iters {
        iterations += 1;
        let mut removed = 0usize;
        for first_pass in [true, false] {
            marked.clear();
            for &i in &live {
                if removable(&mask, w, h, i, first_pass) {
                    marked.push(i);
                }
            }
            for &i in &marked {
                mask[i] = false;
            }
            removed += marked.len();
            if !marked.is_empty() {
                live.retain(|&i| mask[i]);
            }
        }
        if removed == 0 {
            break;
        }
    }

    let skeleton_pixels = live.len();
    let junctions = live
        .iter()
        .filter(|&&i| {
            let (x, y) = (i % w, i / w);
            neighbours(&mask, w, h, x, y).iter().filter(|&&b| b).count() >= 3
        })
        .count();
    let branching_norm = (junctions as f64
        / (skeleton_pixels as f64 / PIXELS_PER_EXPECTED_JUNCTION).max(1.0))
    .min(1.0);

    let mut skeleton = ImageF32::new(w, h);
    for &i in &live {
        skeleton.data[i] = 1.0;
    }
    debug!(
        "skeletonize {}x{} iterations={} pixels={} junctions={}",
        w, h, iterations, skeleton_pixels, junctions
    );
    SkeletonResult {
        iterations,
        skeleton_pixels,
        junctions,
        branching_norm,
        skeleton,
    }
}

/// Ring `P2..P9` clockwise from north; out-of-bounds reads as background.
#[inline]
fn neighbours(mask: &[bool], w: usize, h: usize, x: usize, y: usize) -> [bool; 8] {
    let at = |dx: isize, dy: isize| -> bool {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
            return false;
        }
        mask[ny as usize * w + nx as usize]
    };
    [
        at(0, -1),
        at(1, -1),
        at(1, 0),
        at(1, 1),
        at(0, 1),
        at(-1, 1),
        at(-1, 0),
        at(-1, -1),
    ]
}

fn removable(mask: &[bool], w: usize, h: usize, i: usize, first_pass: bool) -> bool {
    let (x, y) = (i % w, i / w);
    let p = neighbours(mask, w, h, x, y);
    let count = p.iter().filter(|&&b| b).count();
    if !(2..=6).contains(&count) {
        return false;
    }
    let transitions = (0..8).filter(|&k| !p[k] && p[(k + 1) % 8]).count();
    if transitions != 1 {
        return false;
    }
    let [p2, _, p4, _, p6, _, p8, _] = p;
    if first_pass {
        !(p2 && p4 && p6) && !(p4 && p6 && p8)
    } else {
        !(p2 && p4 && p8) && !(p2 && p6 && p8)
    }
}
