//! Interleaved color views and luma conversion.
//!
//! Two luma coefficient sets are in use: Rec. 709 for the gradient family
//! (gradients, structure tensor, attention inputs) and Rec. 601 for the
//! raster analyzers (fractal, lacunarity, orientation, persistence,
//! skeleton). Each analyzer module exports the set it expects as `LUMA`.
use super::ImageF32;
use serde::{Deserialize, Serialize};

/// Borrowed interleaved 8-bit color image (RGB or RGBA).
///
/// Channel order is R, G, B; a fourth channel, when present, is ignored.
#[derive(Clone, Debug)]
pub struct ColorImage<'a> {
    pub w: usize,
    pub h: usize,
    /// Bytes between consecutive rows
    pub stride: usize,
    /// Bytes per pixel, 3 or 4
    pub channels: usize,
    pub data: &'a [u8],
}

impl<'a> ColorImage<'a> {
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let i = y * self.stride + x * self.channels;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Per-pixel luma in the 0–255 domain.
    pub fn to_gray(&self, weights: LumaWeights) -> ImageF32 {
        let [wr, wg, wb] = weights.coefficients();
        let mut out = ImageF32::new(self.w, self.h);
        for y in 0..self.h {
            for x in 0..self.w {
                let [r, g, b] = self.rgb(x, y);
                out.set(x, y, wr * r as f32 + wg * g as f32 + wb * b as f32);
            }
        }
        out
    }
}

/// Luma coefficient set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LumaWeights {
    /// 0.2126 / 0.7152 / 0.0722
    Rec709,
    /// 0.299 / 0.587 / 0.114
    Rec601,
}

impl LumaWeights {
    pub const fn coefficients(self) -> [f32; 3] {
        match self {
            LumaWeights::Rec709 => [0.2126, 0.7152, 0.0722],
            LumaWeights::Rec601 => [0.299, 0.587, 0.114],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn coefficient_sets_weight_green_differently() {
        // pure green pixel, RGBA with padding stride
        let data = [0u8, 255, 0, 255, 0, 0, 0, 0];
        let img = ColorImage {
            w: 1,
            h: 1,
            stride: 8,
            channels: 4,
            data: &data,
        };
        let g709 = img.to_gray(LumaWeights::Rec709).get(0, 0);
        let g601 = img.to_gray(LumaWeights::Rec601).get(0, 0);
        assert!(approx_eq(g709, 0.7152 * 255.0), "g709={g709}");
        assert!(approx_eq(g601, 0.587 * 255.0), "g601={g601}");
    }

    #[test]
    fn white_maps_to_full_scale_for_both_sets() {
        let data = [255u8; 3];
        let img = ColorImage {
            w: 1,
            h: 1,
            stride: 3,
            channels: 3,
            data: &data,
        };
        for weights in [LumaWeights::Rec709, LumaWeights::Rec601] {
            assert!(approx_eq(img.to_gray(weights).get(0, 0), 255.0));
        }
    }
}
