//! First and second derivatives of grayscale rasters and scalar fields.
//!
//! - `compute_gradients`: Gaussian blur, then central differences, with
//!   magnitude and continuous orientation per pixel.
//! - `compute_laplacian`: Gaussian blur, then the 4-neighbour stencil.
//! - `sobel_gradients`: fixed 3×3 Sobel pair on the raw raster, used by the
//!   orientation-coherence analyzer.
//!
//! Central-difference outputs leave the outer 1-pixel frame at zero.

pub mod central;
pub mod sobel;

use crate::image::LumaWeights;

/// Luma coefficients for color input feeding the gradient family.
pub const LUMA: LumaWeights = LumaWeights::Rec709;

pub use central::{central_differences, compute_gradients, compute_laplacian, Gradients};
pub use sobel::sobel_gradients;
