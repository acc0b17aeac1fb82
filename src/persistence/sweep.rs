use super::label::{fill_component, is_foreground};
use super::{finish, BarcodeEntry, PersistenceOptions, PersistenceResult, SeededBar};
use crate::image::ImageF32;
use log::debug;

/// Per-slice component labeling across the threshold sweep.
///
/// The label buffer is cleared before every slice, so ids are never matched
/// across thresholds and every bar has `birth == death`. See
/// [`super::persistence_union_find`] for the incremental barcode.
pub fn persistence_sweep(gray: &ImageF32, options: &PersistenceOptions) -> PersistenceResult {
    let levels = options.levels();
    let n = gray.data.len();
    let mut labels = vec![0u64; n];
    let mut stack = Vec::new();
    let mut bars: Vec<SeededBar> = Vec::new();
    let mut next_id = 1u64;

    for &threshold in &levels {
        labels.iter_mut().for_each(|l| *l = 0);
        let first_in_slice = bars.len();
        for idx in 0..n {
            if labels[idx] != 0 || !is_foreground(gray, idx, threshold) {
                continue;
            }
            let id = next_id;
            next_id += 1;
            let area = fill_component(gray, threshold, idx, id, &mut labels, &mut stack);
            bars.push(SeededBar {
                entry: BarcodeEntry {
                    id,
                    birth: threshold,
                    death: threshold,
                    area,
                },
                seed: idx,
            });
        }
        // every id touched in this slice is re-stamped with the slice threshold
        for bar in &mut bars[first_in_slice..] {
            bar.entry.death = threshold;
        }
    }

    debug!(
        "persistence_sweep {}x{} slices={} bars={}",
        gray.w,
        gray.h,
        levels.len(),
        bars.len()
    );
    finish(gray, bars, options.max_bars)
}
