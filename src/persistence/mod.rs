//! Threshold persistence over a grayscale raster.
//!
//! Thresholds are swept from 0 to 255 in `thresholds` evenly rounded steps;
//! at each threshold a pixel is foreground when `gray < threshold`.
//!
//! Two algorithms share the result type:
//!
//! - [`persistence_sweep`] labels the 4-connected components of every slice
//!   independently with a global id counter. Ids never span two slices, so
//!   every bar has `birth == death`; bars describe per-threshold blobs.
//! - [`persistence_union_find`] grows components incrementally across
//!   thresholds and kills the younger component on a merge (elder rule),
//!   producing a conventional 0-dimensional barcode.
//!
//! Both reconstruct the masks of the longest bars at their mid threshold.

mod label;
mod sweep;
mod union_find;

use crate::image::{ImageF32, LumaWeights};
use serde::{Deserialize, Serialize};

pub use sweep::persistence_sweep;
pub use union_find::persistence_union_find;

pub const LUMA: LumaWeights = LumaWeights::Rec601;

const MIN_THRESHOLDS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceOptions {
    /// Number of threshold slices, raised to at least 8
    pub thresholds: usize,
    /// How many of the longest bars get a reconstructed mask
    pub max_bars: usize,
}

impl Default for PersistenceOptions {
    fn default() -> Self {
        Self {
            thresholds: 32,
            max_bars: 10,
        }
    }
}

impl PersistenceOptions {
    /// Threshold levels `round(t / (T − 1) · 255)` for `t = 0..T`.
    pub fn levels(&self) -> Vec<u8> {
        let t_count = self.thresholds.max(MIN_THRESHOLDS);
        (0..t_count)
            .map(|t| (t as f64 / (t_count - 1) as f64 * 255.0).round() as u8)
            .collect()
    }
}

/// One component lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeEntry {
    /// Monotonic identifier, never reused within one run
    pub id: u64,
    pub birth: u8,
    pub death: u8,
    /// Pixel count of the component: at its slice for the per-slice sweep,
    /// at its death threshold for the union-find barcode
    pub area: usize,
}

impl BarcodeEntry {
    #[inline]
    pub fn lifetime(&self) -> u8 {
        self.death.saturating_sub(self.birth)
    }
}

/// Bar plus the pixel used to reconstruct its region.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SeededBar {
    pub entry: BarcodeEntry,
    pub seed: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistenceResult {
    /// All bars sorted by descending lifetime
    pub bars: Vec<BarcodeEntry>,
    /// `min(1, longest lifetime / 255)`
    pub span: f64,
    /// 0/1 masks of the longest bars, in `bars` order
    #[serde(skip)]
    pub bar_masks: Vec<ImageF32>,
    /// Union of `bar_masks`
    #[serde(skip)]
    pub combined: ImageF32,
}

/// Sort, reconstruct the top masks, and compute the span score.
pub(crate) fn finish(gray: &ImageF32, mut bars: Vec<SeededBar>, max_bars: usize) -> PersistenceResult {
    // stable: equal lifetimes keep id order
    bars.sort_by(|a, b| b.entry.lifetime().cmp(&a.entry.lifetime()));

    let mut combined = ImageF32::new(gray.w, gray.h);
    let mut bar_masks = Vec::with_capacity(max_bars.min(bars.len()));
    let mut stack = Vec::new();
    for bar in bars.iter().take(max_bars) {
        let mid = ((bar.entry.birth as u16 + bar.entry.death as u16) as f32 / 2.0).round() as u8;
        let mask = label::region_mask(gray, bar.seed, mid, &mut stack);
        for (dst, &m) in combined.data.iter_mut().zip(&mask.data) {
            if m > 0.0 {
                *dst = 1.0;
            }
        }
        bar_masks.push(mask);
    }

    let span = bars
        .first()
        .map(|b| (b.entry.lifetime() as f64 / 255.0).min(1.0))
        .unwrap_or(0.0);

    PersistenceResult {
        bars: bars.into_iter().map(|b| b.entry).collect(),
        span,
        bar_masks,
        combined,
    }
}
