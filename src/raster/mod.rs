//! Raster primitives shared by every analyzer.
//!
//! - Separable Gaussian blur with clamp-to-edge borders (`gaussian_blur`).
//! - Global statistics and rescaling: `normalize01`, `percentile`, `zscore`.
//!
//! All functions return freshly allocated fields; inputs are never modified.

pub mod blur;
pub mod filters;
pub mod stats;

pub use blur::{convolve_separable, gaussian_blur};
pub use filters::{GaussianKernel, SeparableFilter};
pub use stats::{mean, normalize01, percentile, zscore};
