#![doc = include_str!("../README.md")]

// Shared building blocks
pub mod diagnostics;
pub mod gradient;
pub mod image;
pub mod raster;
pub mod tensor;

// Analyzers over a grayscale raster
pub mod fractal;
pub mod lacunarity;
pub mod orientation;
pub mod persistence;
pub mod skeleton;

// Attention potential and its summaries
pub mod attention;
pub mod charge;

// Whole-image driver and tool configuration
pub mod config;
pub mod overlay;

// --- High-level re-exports -------------------------------------------------

pub use crate::attention::{
    attention_center, compose_attention, detect_sources_sinks, find_tension, Candidate,
};
pub use crate::fractal::box_count_fractal;
pub use crate::lacunarity::lacunarity;
pub use crate::orientation::orientation_coherence;
pub use crate::overlay::{analyze_overlay, OverlayOptions, OverlayReport};
pub use crate::persistence::{persistence_sweep, persistence_union_find, BarcodeEntry};
pub use crate::skeleton::skeletonize;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::image::{ColorImage, ImageF32, ImageU8, LumaWeights};
    pub use crate::{analyze_overlay, OverlayOptions, OverlayReport};
}
