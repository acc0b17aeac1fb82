use crate::image::{ImageF32, ImageView};
use crate::raster::gaussian_blur;
use log::debug;

/// Per-pixel derivative buffers.
#[derive(Clone, Debug)]
pub struct Gradients {
    /// Horizontal derivative
    pub gx: ImageF32,
    /// Vertical derivative
    pub gy: ImageF32,
    /// `hypot(gx, gy)`
    pub mag: ImageF32,
    /// `atan2(gy, gx)` in radians, range (−π, π]
    pub ori: ImageF32,
}

/// Blur the grayscale raster by `sigma`, then take central differences.
pub fn compute_gradients(gray: &ImageF32, sigma: f32) -> Gradients {
    debug!(
        "compute_gradients {}x{} sigma={:.2}",
        gray.w, gray.h, sigma
    );
    let smoothed = gaussian_blur(gray, sigma);
    central_differences(&smoothed)
}

/// Central differences `(f[x+1] − f[x−1]) / 2` on interior pixels, without smoothing.
pub fn central_differences(field: &ImageF32) -> Gradients {
    let (w, h) = (field.w, field.h);
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);
    let mut ori = ImageF32::new(w, h);
    if w < 3 || h < 3 {
        return Gradients { gx, gy, mag, ori };
    }

    for y in 1..h - 1 {
        let prev = field.row(y - 1);
        let row = field.row(y);
        let next = field.row(y + 1);
        for x in 1..w - 1 {
            let dx = (row[x + 1] - row[x - 1]) * 0.5;
            let dy = (next[x] - prev[x]) * 0.5;
            let i = y * w + x;
            gx.data[i] = dx;
            gy.data[i] = dy;
            mag.data[i] = dx.hypot(dy);
            ori.data[i] = dy.atan2(dx);
        }
    }
    Gradients { gx, gy, mag, ori }
}

/// Blur by `sigma`, then apply the `[−4, 1, 1, 1, 1]` stencil on interior pixels.
pub fn compute_laplacian(gray: &ImageF32, sigma: f32) -> ImageF32 {
    let smoothed = gaussian_blur(gray, sigma);
    laplacian_4(&smoothed)
}

pub(crate) fn laplacian_4(field: &ImageF32) -> ImageF32 {
    let (w, h) = (field.w, field.h);
    let mut out = ImageF32::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        let prev = field.row(y - 1);
        let row = field.row(y);
        let next = field.row(y + 1);
        for x in 1..w - 1 {
            out.data[y * w + x] = prev[x] + next[x] + row[x - 1] + row[x + 1] - 4.0 * row[x];
        }
    }
    out
}
