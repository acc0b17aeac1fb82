//! Separable convolution with clamp-to-edge borders.
//!
//! Two passes through an intermediate buffer: horizontal into `tmp`, then
//! vertical into the output.
use super::filters::{GaussianKernel, SeparableFilter};
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Gaussian blur with kernel radius `round(3σ)`. `σ <= 0` returns an unmodified copy.
pub fn gaussian_blur(field: &ImageF32, sigma: f32) -> ImageF32 {
    if sigma <= 0.0 {
        return field.clone();
    }
    convolve_separable(field, &GaussianKernel::new(sigma))
}

/// Apply `filter` along rows, then along columns.
pub fn convolve_separable(src: &ImageF32, filter: &dyn SeparableFilter) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let mut tmp = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    let taps = filter.taps();
    let radius = filter.radius() as isize;

    for y in 0..h {
        let src_row = src.row(y);
        let dst_row = tmp.row_mut(y);
        for (x, dst_px) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = clamp_index(x as isize + k as isize - radius, w);
                acc += tap * src_row[sx];
            }
            *dst_px = acc;
        }
    }

    for y in 0..h {
        let dst_row = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius, h);
            let src_row = tmp.row(sy);
            for (dst_px, &v) in dst_row.iter_mut().zip(src_row) {
                *dst_px += tap * v;
            }
        }
    }
    out
}

#[inline]
pub(crate) fn clamp_index(idx: isize, upper: usize) -> usize {
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}
