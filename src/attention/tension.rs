use super::Candidate;
use crate::image::ImageF32;
use crate::raster::normalize01;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TensionWeights {
    pub edge: f32,
    pub corner: f32,
    pub phi_gradient: f32,
}

impl Default for TensionWeights {
    fn default() -> Self {
        Self {
            edge: 0.4,
            corner: 0.3,
            phi_gradient: 0.3,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TensionResult {
    /// Global argmax of τ; ties resolve to the first pixel in row-major order
    pub point: Candidate,
    #[serde(skip)]
    pub field: ImageF32,
}

/// τ = w1·edge + w2·corner + w3·|∇φ| with each input rescaled to [0, 1].
pub fn find_tension(
    edge_mag: &ImageF32,
    corner: &ImageF32,
    phi_grad_mag: &ImageF32,
    weights: &TensionWeights,
) -> TensionResult {
    let e = normalize01(edge_mag);
    let c = normalize01(corner);
    let g = normalize01(phi_grad_mag);
    let mut field = ImageF32::new(e.w, e.h);
    let mut best = (0usize, f32::NEG_INFINITY);
    for (i, dst) in field.data.iter_mut().enumerate() {
        let tau = weights.edge * e.data[i] + weights.corner * c.data[i] + weights.phi_gradient * g.data[i];
        *dst = tau;
        if tau > best.1 {
            best = (i, tau);
        }
    }
    let w = field.w.max(1);
    let point = Candidate {
        x: (best.0 % w) as u32,
        y: (best.0 / w) as u32,
        z: if best.1.is_finite() { best.1 } else { 0.0 },
    };
    TensionResult { point, field }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_winner_combines_all_terms() {
        let edge = ImageF32::from_vec(3, 2, vec![0.0, 5.0, 0.0, 0.0, 4.0, 0.0]);
        let corner = ImageF32::from_vec(3, 2, vec![0.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
        let grad = ImageF32::from_vec(3, 2, vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
        let res = find_tension(&edge, &corner, &grad, &TensionWeights::default());
        assert_eq!((res.point.x, res.point.y), (1, 1));
        let expected = 0.4 * 0.8 + 0.3 * 1.0 + 0.3 * 1.0;
        assert!((res.point.z - expected).abs() < 1e-6);
    }

    #[test]
    fn flat_inputs_pick_first_pixel() {
        let flat = ImageF32::from_vec(4, 4, vec![2.0; 16]);
        let res = find_tension(&flat, &flat, &flat, &TensionWeights::default());
        assert_eq!((res.point.x, res.point.y, res.point.z), (0, 0, 0.0));
    }
}
