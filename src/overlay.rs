//! Full overlay run: every analyzer over one color image.
//!
//! The attention chain (inputs → φ → center, sources/sinks, tension) and the
//! five raster analyzers are independent and run concurrently on the rayon
//! pool. Each branch owns its scratch buffers; the input view is only read.
use crate::attention::{
    attention_center, build_inputs, compose_attention, detect_sources_sinks, find_tension,
    AttentionCenter, AttentionWeights, CenterOptions, InputFields, InputOptions, SourceSinkOptions,
    SourcesSinks, TensionResult, TensionWeights,
};
use crate::diagnostics::{timed, StageTiming, TimingBreakdown};
use crate::fractal::{box_count_fractal, FractalOptions, FractalResult};
use crate::gradient::central_differences;
use crate::image::{ColorImage, ImageF32};
use crate::lacunarity::{lacunarity, LacunarityOptions, LacunarityResult};
use crate::orientation::{orientation_coherence, OrientationOptions, OrientationResult};
use crate::persistence::{
    persistence_sweep, persistence_union_find, PersistenceOptions, PersistenceResult,
};
use crate::skeleton::{skeletonize, SkeletonOptions, SkeletonResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Which persistence algorithm the overlay runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceMode {
    /// Independent labeling per threshold slice (`birth == death`)
    #[default]
    PerSlice,
    /// Incremental union-find barcode
    UnionFind,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayOptions {
    pub inputs: InputOptions,
    pub attention: AttentionWeights,
    pub center: CenterOptions,
    pub source_sink: SourceSinkOptions,
    pub tension: TensionWeights,
    pub fractal: FractalOptions,
    pub lacunarity: LacunarityOptions,
    pub orientation: OrientationOptions,
    pub persistence: PersistenceOptions,
    pub persistence_mode: PersistenceMode,
    pub skeleton: SkeletonOptions,
}

/// Attention chain outputs.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttentionReport {
    pub mean_coherence: f64,
    pub entropy: f64,
    pub center: AttentionCenter,
    pub sources_sinks: SourcesSinks,
    pub tension: TensionResult,
    #[serde(skip)]
    pub inputs: InputFields,
    #[serde(skip)]
    pub phi: ImageF32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayReport {
    pub width: usize,
    pub height: usize,
    pub attention: AttentionReport,
    pub fractal: FractalResult,
    pub lacunarity: LacunarityResult,
    pub orientation: OrientationResult,
    pub persistence: PersistenceResult,
    pub skeleton: SkeletonResult,
    pub timings: TimingBreakdown,
}

impl OverlayReport {
    /// Displayable fields by name, each in [0, 1].
    pub fn named_fields(&self) -> Vec<(&'static str, &ImageF32)> {
        let inputs = &self.attention.inputs;
        vec![
            ("phi", &self.attention.phi),
            ("edge", &inputs.edge),
            ("log_pos", &inputs.log_pos),
            ("corner", &inputs.corner),
            ("color_contrast", &inputs.color_contrast),
            ("homogeneity", &inputs.homogeneity),
            ("coherence", &inputs.tensor.coherence),
            ("fractal_heat", &self.fractal.heat),
            ("lacunarity_heat", &self.lacunarity.heat),
            ("orientation", &self.orientation.field),
            ("persistence", &self.persistence.combined),
            ("skeleton", &self.skeleton.skeleton),
        ]
    }
}

pub fn analyze_overlay(img: &ColorImage<'_>, options: &OverlayOptions) -> OverlayReport {
    let start = Instant::now();
    debug!("analyze_overlay {}x{}", img.w, img.h);

    let ((attention, attention_timings), (rasters, raster_timings)) = rayon::join(
        || run_attention(img, options),
        || run_raster_analyzers(img, options),
    );
    let (fractal, lacunarity, orientation, persistence, skeleton) = rasters;

    let mut timings = TimingBreakdown::with_total(start.elapsed().as_secs_f64() * 1000.0);
    timings.extend(attention_timings);
    timings.extend(raster_timings);
    debug!("analyze_overlay finished in {:.2} ms", timings.total_ms);

    OverlayReport {
        width: img.w,
        height: img.h,
        attention,
        fractal,
        lacunarity,
        orientation,
        persistence,
        skeleton,
        timings,
    }
}

fn run_attention(img: &ColorImage<'_>, options: &OverlayOptions) -> (AttentionReport, Vec<StageTiming>) {
    let mut stages = Vec::with_capacity(4);
    let (inputs, t) = timed("attention_inputs", || build_inputs(img, &options.inputs));
    stages.push(t);
    let (phi, t) = timed("attention_compose", || {
        compose_attention(&inputs.as_inputs(), &options.attention)
    });
    stages.push(t);

    let ((center, sources_sinks), t) = timed("attention_summaries", || {
        rayon::join(
            || attention_center(&phi, &options.center),
            || detect_sources_sinks(&phi, &options.source_sink),
        )
    });
    stages.push(t);
    let (tension, t) = timed("tension", || {
        let phi_grad = central_differences(&phi);
        find_tension(
            &inputs.gradients.mag,
            &inputs.tensor.corner,
            &phi_grad.mag,
            &options.tension,
        )
    });
    stages.push(t);

    let report = AttentionReport {
        mean_coherence: inputs.tensor.mean_coherence(),
        entropy: inputs.entropy,
        center,
        sources_sinks,
        tension,
        inputs,
        phi,
    };
    (report, stages)
}

type RasterResults = (
    FractalResult,
    LacunarityResult,
    OrientationResult,
    PersistenceResult,
    SkeletonResult,
);

fn run_raster_analyzers(
    img: &ColorImage<'_>,
    options: &OverlayOptions,
) -> (RasterResults, Vec<StageTiming>) {
    // the five raster analyzers share Rec. 601 luma
    let gray = img.to_gray(crate::fractal::LUMA);
    let gray = &gray;

    let (((fractal, lac), orient), (persist, skel)) = rayon::join(
        || {
            rayon::join(
                || {
                    rayon::join(
                        || timed("fractal", || box_count_fractal(gray, &options.fractal)),
                        || timed("lacunarity", || lacunarity(gray, &options.lacunarity)),
                    )
                },
                || timed("orientation", || orientation_coherence(gray, &options.orientation)),
            )
        },
        || {
            rayon::join(
                || {
                    timed("persistence", || match options.persistence_mode {
                        PersistenceMode::PerSlice => persistence_sweep(gray, &options.persistence),
                        PersistenceMode::UnionFind => {
                            persistence_union_find(gray, &options.persistence)
                        }
                    })
                },
                || timed("skeleton", || skeletonize(gray, &options.skeleton)),
            )
        },
    );

    let stages = vec![fractal.1, lac.1, orient.1, persist.1, skel.1];
    ((fractal.0, lac.0, orient.0, persist.0, skel.0), stages)
}
