use crate::image::ImageF32;
use crate::raster::{gaussian_blur, percentile};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterOptions {
    /// Share of the brightest pixels used for the centroid, in percent
    pub top_percent: f32,
    /// Use blur scales `[1, 2, 4]` instead of `[1]`
    pub multiscale: bool,
}

impl Default for CenterOptions {
    fn default() -> Self {
        Self {
            top_percent: 5.0,
            multiscale: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttentionCenter {
    pub x: f32,
    pub y: f32,
    /// RMS distance of the per-scale centroids from `(x, y)`
    pub radius: f32,
    /// Centroid found at each contributing scale
    pub per_scale: Vec<[f32; 2]>,
}

pub fn attention_center(phi: &ImageF32, options: &CenterOptions) -> AttentionCenter {
    let scales: &[f32] = if options.multiscale {
        &[1.0, 2.0, 4.0]
    } else {
        &[1.0]
    };

    let mut per_scale = Vec::with_capacity(scales.len());
    for &s in scales {
        let blurred;
        let field = if s == 1.0 {
            phi
        } else {
            blurred = gaussian_blur(phi, s);
            &blurred
        };
        let thr = percentile(&field.data, 100.0 - options.top_percent);
        let (mut sw, mut sx, mut sy) = (0.0f64, 0.0f64, 0.0f64);
        for (i, &v) in field.data.iter().enumerate() {
            if v < thr {
                continue;
            }
            let v = v as f64;
            sw += v;
            sx += v * (i % field.w) as f64;
            sy += v * (i / field.w) as f64;
        }
        if sw > 0.0 {
            per_scale.push([(sx / sw) as f32, (sy / sw) as f32]);
        }
    }

    let (x, y) = if per_scale.is_empty() {
        (phi.w as f32 / 2.0, phi.h as f32 / 2.0)
    } else {
        let n = per_scale.len() as f32;
        (
            per_scale.iter().map(|p| p[0]).sum::<f32>() / n,
            per_scale.iter().map(|p| p[1]).sum::<f32>() / n,
        )
    };
    let radius = if per_scale.is_empty() {
        0.0
    } else {
        let ms = per_scale
            .iter()
            .map(|p| (p[0] - x).powi(2) + (p[1] - y).powi(2))
            .sum::<f32>()
            / per_scale.len() as f32;
        ms.sqrt()
    };
    debug!(
        "attention_center ({:.1}, {:.1}) radius={:.2} scales={}",
        x,
        y,
        radius,
        per_scale.len()
    );
    AttentionCenter {
        x,
        y,
        radius,
        per_scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolated_pixel_is_the_center() {
        let mut phi = ImageF32::new(40, 30);
        phi.set(11, 7, 1.0);
        let c = attention_center(
            &phi,
            &CenterOptions {
                top_percent: 0.05,
                multiscale: false,
            },
        );
        assert!((c.x - 11.0).abs() < 1e-4 && (c.y - 7.0).abs() < 1e-4);
        assert!(c.radius < 1e-4);
    }

    #[test]
    fn multiscale_centroids_agree_for_interior_peak() {
        let mut phi = ImageF32::new(41, 41);
        phi.set(20, 20, 1.0);
        let c = attention_center(
            &phi,
            &CenterOptions {
                top_percent: 1.0,
                multiscale: true,
            },
        );
        assert_eq!(c.per_scale.len(), 3);
        assert!((c.x - 20.0).abs() < 1e-3 && (c.y - 20.0).abs() < 1e-3);
        assert!(c.radius < 1e-3);
    }

    #[test]
    fn disagreeing_scales_give_rms_radius() {
        // a lone spike wins only at full resolution; blurring favours the block
        let mut phi = ImageF32::new(64, 64);
        phi.set(10, 10, 10.0);
        for y in 36..45 {
            for x in 36..45 {
                phi.set(x, y, 3.0);
            }
        }
        let c = attention_center(
            &phi,
            &CenterOptions {
                top_percent: 0.5,
                multiscale: true,
            },
        );
        assert_eq!(c.per_scale.len(), 3);
        let fine = c.per_scale[0];
        assert!(fine[0] < 39.5 && fine[1] < 39.5, "fine={fine:?}");
        for p in &c.per_scale[1..] {
            assert!((p[0] - 40.0).abs() < 1.0 && (p[1] - 40.0).abs() < 1.0, "p={p:?}");
        }

        let n = c.per_scale.len() as f32;
        let rms = (c
            .per_scale
            .iter()
            .map(|p| (p[0] - c.x).powi(2) + (p[1] - c.y).powi(2))
            .sum::<f32>()
            / n)
            .sqrt();
        assert!(c.radius > 0.5, "radius={}", c.radius);
        assert!((c.radius - rms).abs() < 1e-5);
    }

    #[test]
    fn zero_field_falls_back_to_image_center() {
        let phi = ImageF32::new(10, 6);
        let c = attention_center(&phi, &CenterOptions::default());
        assert_eq!((c.x, c.y, c.radius), (5.0, 3.0, 0.0));
        assert!(c.per_scale.is_empty());
    }
}
