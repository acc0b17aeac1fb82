use crate::image::ImageF32;
use crate::raster::normalize01;
use serde::{Deserialize, Serialize};

/// Borrowed composer inputs, each expected in [0, 1] with identical dimensions.
#[derive(Clone, Copy, Debug)]
pub struct AttentionInputs<'a> {
    pub edge: &'a ImageF32,
    pub log_pos: &'a ImageF32,
    pub corner: &'a ImageF32,
    pub color_contrast: &'a ImageF32,
    pub homogeneity: &'a ImageF32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttentionWeights {
    pub edge: f32,
    pub log_pos: f32,
    pub corner: f32,
    pub color_contrast: f32,
    /// Subtracted
    pub homogeneity: f32,
}

impl Default for AttentionWeights {
    fn default() -> Self {
        Self {
            edge: 1.0,
            log_pos: 0.8,
            corner: 0.6,
            color_contrast: 0.7,
            homogeneity: 0.5,
        }
    }
}

/// φ = w1·edge + w2·logPos + w3·corner + w4·colorContrast − w5·homogeneity,
/// renormalized to [0, 1].
pub fn compose_attention(inputs: &AttentionInputs<'_>, weights: &AttentionWeights) -> ImageF32 {
    let e = inputs.edge;
    let mut phi = ImageF32::new(e.w, e.h);
    for (i, dst) in phi.data.iter_mut().enumerate() {
        *dst = weights.edge * e.data[i]
            + weights.log_pos * inputs.log_pos.data[i]
            + weights.corner * inputs.corner.data[i]
            + weights.color_contrast * inputs.color_contrast.data[i]
            - weights.homogeneity * inputs.homogeneity.data[i];
    }
    normalize01(&phi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homogeneity_pulls_potential_down() {
        let zeros = ImageF32::new(2, 1);
        let edge = ImageF32::from_vec(2, 1, vec![1.0, 1.0]);
        let homog = ImageF32::from_vec(2, 1, vec![0.0, 1.0]);
        let phi = compose_attention(
            &AttentionInputs {
                edge: &edge,
                log_pos: &zeros,
                corner: &zeros,
                color_contrast: &zeros,
                homogeneity: &homog,
            },
            &AttentionWeights::default(),
        );
        assert_eq!(phi.data, vec![1.0, 0.0]);
    }

    #[test]
    fn result_is_renormalized() {
        let a = ImageF32::from_vec(3, 1, vec![0.0, 0.5, 1.0]);
        let b = ImageF32::from_vec(3, 1, vec![1.0, 1.0, 1.0]);
        let phi = compose_attention(
            &AttentionInputs {
                edge: &a,
                log_pos: &a,
                corner: &b,
                color_contrast: &a,
                homogeneity: &b,
            },
            &AttentionWeights::default(),
        );
        assert_eq!(phi.get(0, 0), 0.0);
        assert!((phi.get(2, 0) - 1.0).abs() < 1e-6);
        assert!((phi.get(1, 0) - 0.5).abs() < 1e-6);
    }
}
