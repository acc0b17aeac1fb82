//! Sources and sinks of the attention potential.
//!
//! The divergence of ∇φ (central differences applied twice) is z-scored.
//! Strict 3×3 local maxima with `z ≥ z_pos` are sources, strict local minima
//! with `z ≤ z_neg` are sinks. Each class then goes through greedy
//! non-maximum suppression by |z|.
use super::Candidate;
use crate::gradient::central_differences;
use crate::image::ImageF32;
use crate::raster::zscore;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSinkOptions {
    pub z_pos: f32,
    pub z_neg: f32,
    /// Minimum Euclidean spacing between kept candidates of one class, in pixels
    pub nms_radius: f32,
    pub max_points: usize,
}

impl Default for SourceSinkOptions {
    fn default() -> Self {
        Self {
            z_pos: 2.0,
            z_neg: -2.0,
            nms_radius: 8.0,
            max_points: 12,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesSinks {
    pub sources: Vec<Candidate>,
    pub sinks: Vec<Candidate>,
    /// z-scored divergence of ∇φ
    #[serde(skip)]
    pub divergence_z: ImageF32,
}

/// Divergence of the gradient, i.e. a discrete Laplacian built from two
/// central-difference passes.
pub fn gradient_divergence(phi: &ImageF32) -> ImageF32 {
    let g = central_differences(phi);
    let dgx = central_differences(&g.gx);
    let dgy = central_differences(&g.gy);
    let mut div = ImageF32::new(phi.w, phi.h);
    for (i, dst) in div.data.iter_mut().enumerate() {
        *dst = dgx.gx.data[i] + dgy.gy.data[i];
    }
    div
}

pub fn detect_sources_sinks(phi: &ImageF32, options: &SourceSinkOptions) -> SourcesSinks {
    let divergence_z = zscore(&gradient_divergence(phi));
    let (w, h) = (phi.w, phi.h);
    let mut sources = Vec::new();
    let mut sinks = Vec::new();

    if w >= 3 && h >= 3 {
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let z = divergence_z.get(x, y);
                let (is_max, is_min) = strict_extremum(&divergence_z, x, y);
                let c = Candidate {
                    x: x as u32,
                    y: y as u32,
                    z,
                };
                if is_max && z >= options.z_pos {
                    sources.push(c);
                } else if is_min && z <= options.z_neg {
                    sinks.push(c);
                }
            }
        }
    }

    let sources = suppress_non_maxima(sources, options.nms_radius, options.max_points);
    let sinks = suppress_non_maxima(sinks, options.nms_radius, options.max_points);
    debug!(
        "detect_sources_sinks {}x{} sources={} sinks={}",
        w,
        h,
        sources.len(),
        sinks.len()
    );
    SourcesSinks {
        sources,
        sinks,
        divergence_z,
    }
}

fn strict_extremum(field: &ImageF32, x: usize, y: usize) -> (bool, bool) {
    let v = field.get(x, y);
    let mut is_max = true;
    let mut is_min = true;
    for dy in 0..3 {
        for dx in 0..3 {
            if dx == 1 && dy == 1 {
                continue;
            }
            let n = field.get(x + dx - 1, y + dy - 1);
            is_max &= v > n;
            is_min &= v < n;
        }
    }
    (is_max, is_min)
}

/// Greedy NMS: by descending |z|, keep a candidate only when it is farther
/// than `radius` from every kept one; stop at `max_points`.
pub fn suppress_non_maxima(mut candidates: Vec<Candidate>, radius: f32, max_points: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.z.abs().total_cmp(&a.z.abs()));
    let r2 = radius * radius;
    let mut kept: Vec<Candidate> = Vec::with_capacity(max_points.min(candidates.len()));
    for c in candidates {
        if kept.len() >= max_points {
            break;
        }
        let far = kept.iter().all(|k| {
            let dx = k.x as f32 - c.x as f32;
            let dy = k.y as f32 - c.y as f32;
            dx * dx + dy * dy > r2
        });
        if far {
            kept.push(c);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(x: u32, y: u32, z: f32) -> Candidate {
        Candidate { x, y, z }
    }

    #[test]
    fn nms_keeps_stronger_of_close_pair() {
        let kept = suppress_non_maxima(vec![cand(10, 10, 2.5), cand(13, 10, 3.1)], 5.0, 10);
        assert_eq!(kept, vec![cand(13, 10, 3.1)]);
    }

    #[test]
    fn nms_uses_absolute_score_and_caps_output() {
        let kept = suppress_non_maxima(
            vec![cand(0, 0, -2.2), cand(50, 0, -4.0), cand(100, 0, -3.0)],
            5.0,
            2,
        );
        assert_eq!(kept, vec![cand(50, 0, -4.0), cand(100, 0, -3.0)]);
    }

    #[test]
    fn nms_radius_is_exclusive() {
        let kept = suppress_non_maxima(vec![cand(0, 0, 3.0), cand(4, 0, 2.0)], 4.0, 10);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn bright_spot_is_a_sink_of_divergence() {
        // a peak of φ is concave: its divergence is strongly negative
        let mut phi = ImageF32::new(31, 31);
        phi.set(15, 15, 1.0);
        let res = detect_sources_sinks(&phi, &SourceSinkOptions::default());
        assert_eq!(res.sinks.len(), 1, "sinks={:?}", res.sinks);
        assert_eq!((res.sinks[0].x, res.sinks[0].y), (15, 15));
    }

    #[test]
    fn dark_pit_is_a_source_of_divergence() {
        let mut phi = ImageF32::from_vec(31, 31, vec![1.0; 31 * 31]);
        phi.set(15, 15, 0.0);
        let res = detect_sources_sinks(&phi, &SourceSinkOptions::default());
        assert_eq!(res.sources.len(), 1, "sources={:?}", res.sources);
        let s = res.sources[0];
        assert_eq!((s.x, s.y), (15, 15));
        assert!(s.z >= 2.0);
        assert!(res.sinks.iter().all(|c| (c.x, c.y) != (15, 15)));
    }

    #[test]
    fn flat_potential_has_no_candidates() {
        let phi = ImageF32::from_vec(12, 12, vec![0.4; 144]);
        let res = detect_sources_sinks(&phi, &SourceSinkOptions::default());
        assert!(res.sources.is_empty() && res.sinks.is_empty());
    }
}
