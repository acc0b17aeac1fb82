//! Attention potential φ and the summaries derived from it.
//!
//! - `compose_attention`: weighted blend of five [0, 1] fields into φ.
//! - `attention_center`: multi-scale weighted centroid of φ's top percentile.
//! - `detect_sources_sinks`: z-scored divergence extrema with greedy NMS.
//! - `find_tension`: single argmax of a blend of edge, corner and |∇φ|.
//! - `build_inputs`: the five composer inputs from a color image.

pub mod center;
pub mod compose;
pub mod inputs;
pub mod source_sink;
pub mod tension;

use serde::Serialize;

pub use center::{attention_center, AttentionCenter, CenterOptions};
pub use compose::{compose_attention, AttentionInputs, AttentionWeights};
pub use inputs::{build_inputs, InputFields, InputOptions};
pub use source_sink::{detect_sources_sinks, suppress_non_maxima, SourceSinkOptions, SourcesSinks};
pub use tension::{find_tension, TensionResult, TensionWeights};

/// Scored pixel location.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Candidate {
    pub x: u32,
    pub y: u32,
    pub z: f32,
}
