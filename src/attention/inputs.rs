//! Composer inputs derived from a color image.
use super::compose::AttentionInputs;
use crate::charge::{aesthetic_charge, ChargeOptions};
use crate::gradient::{compute_gradients, compute_laplacian, Gradients, LUMA};
use crate::image::{ColorImage, ImageF32};
use crate::raster::{gaussian_blur, normalize01};
use crate::tensor::{structure_tensor, StructureTensor};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputOptions {
    /// Pre-smoothing for gradients, Laplacian and tensor integration
    pub sigma: f32,
    /// Smoothing of |∇| before it is inverted into homogeneity
    pub homogeneity_sigma: f32,
    pub charge: ChargeOptions,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            homogeneity_sigma: 4.0,
            charge: ChargeOptions::default(),
        }
    }
}

/// Owned composer inputs plus the intermediate fields they came from.
#[derive(Clone, Debug)]
pub struct InputFields {
    pub gradients: Gradients,
    pub tensor: StructureTensor,
    pub edge: ImageF32,
    pub log_pos: ImageF32,
    pub corner: ImageF32,
    pub color_contrast: ImageF32,
    pub homogeneity: ImageF32,
    /// Gray-histogram entropy reported by the charge field
    pub entropy: f64,
}

impl InputFields {
    pub fn as_inputs(&self) -> AttentionInputs<'_> {
        AttentionInputs {
            edge: &self.edge,
            log_pos: &self.log_pos,
            corner: &self.corner,
            color_contrast: &self.color_contrast,
            homogeneity: &self.homogeneity,
        }
    }
}

pub fn build_inputs(img: &ColorImage<'_>, options: &InputOptions) -> InputFields {
    let gray = img.to_gray(LUMA);
    let gradients = compute_gradients(&gray, options.sigma);
    let tensor = structure_tensor(&gradients.gx, &gradients.gy, options.sigma);
    let laplacian = compute_laplacian(&gray, options.sigma);
    let charge = aesthetic_charge(img, &options.charge);

    let edge = normalize01(&gradients.mag);
    let log_pos = normalize01(&laplacian.map(|v| (-v).max(0.0)));
    let corner = tensor.corner.clone();
    let color_contrast = normalize01(&charge.charge);
    let homogeneity = normalize01(&gaussian_blur(&gradients.mag, options.homogeneity_sigma)).map(|v| 1.0 - v);

    InputFields {
        gradients,
        tensor,
        edge,
        log_pos,
        corner,
        color_contrast,
        homogeneity,
        entropy: charge.entropy,
    }
}
