//! Stack-based 4-connected flood fill.
use crate::image::ImageF32;

#[inline]
pub(super) fn is_foreground(gray: &ImageF32, idx: usize, threshold: u8) -> bool {
    gray.data[idx] < threshold as f32
}

/// Label the component containing `seed` with `id`, returning its pixel count.
///
/// `labels` uses 0 for "unlabeled"; `seed` must be foreground and unlabeled.
pub(super) fn fill_component(
    gray: &ImageF32,
    threshold: u8,
    seed: usize,
    id: u64,
    labels: &mut [u64],
    stack: &mut Vec<usize>,
) -> usize {
    let (w, h) = (gray.w, gray.h);
    stack.clear();
    stack.push(seed);
    labels[seed] = id;
    let mut area = 0usize;
    while let Some(idx) = stack.pop() {
        area += 1;
        let (x, y) = (idx % w, idx / w);
        let mut visit = |n: usize, labels: &mut [u64]| {
            if labels[n] == 0 && is_foreground(gray, n, threshold) {
                labels[n] = id;
                stack.push(n);
            }
        };
        if x > 0 {
            visit(idx - 1, labels);
        }
        if x + 1 < w {
            visit(idx + 1, labels);
        }
        if y > 0 {
            visit(idx - w, labels);
        }
        if y + 1 < h {
            visit(idx + w, labels);
        }
    }
    area
}

/// 0/1 mask of the component containing `seed` at `threshold`.
///
/// Empty when the seed is not foreground at that threshold.
pub(super) fn region_mask(
    gray: &ImageF32,
    seed: usize,
    threshold: u8,
    stack: &mut Vec<usize>,
) -> ImageF32 {
    let mut mask = ImageF32::new(gray.w, gray.h);
    if seed >= gray.data.len() || !is_foreground(gray, seed, threshold) {
        return mask;
    }
    let mut labels = vec![0u64; gray.data.len()];
    fill_component(gray, threshold, seed, 1, &mut labels, stack);
    for (dst, &l) in mask.data.iter_mut().zip(&labels) {
        if l != 0 {
            *dst = 1.0;
        }
    }
    mask
}
