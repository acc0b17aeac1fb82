//! 3×3 Sobel gradients with border clamping.
//!
//! Operates on the raw raster (no smoothing). Outputs per-pixel `gx`, `gy`,
//! `mag = sqrt(gx^2+gy^2)` and the continuous orientation `atan2(gy, gx)`.
use super::Gradients;
use crate::image::{ImageF32, ImageView, ImageViewMut};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

pub fn sobel_gradients(l: &ImageF32) -> Gradients {
    let w = l.w;
    let h = l.h;
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);
    let mut ori = ImageF32::new(w, h);

    if w == 0 || h == 0 {
        return Gradients { gx, gy, mag, ori };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        let out_gx = gx.row_mut(y);
        let out_gy = gy.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, row) in rows.iter().enumerate() {
                let kx_row = &SOBEL_KERNEL_X[ky];
                let ky_row = &SOBEL_KERNEL_Y[ky];
                for (k, &sx) in x_idx.iter().enumerate() {
                    sum_x += row[sx] * kx_row[k];
                    sum_y += row[sx] * ky_row[k];
                }
            }
            out_gx[x] = sum_x;
            out_gy[x] = sum_y;
        }
        let mag_row = mag.row_mut(y);
        for x in 0..w {
            mag_row[x] = (out_gx[x] * out_gx[x] + out_gy[x] * out_gy[x]).sqrt();
        }
        let ori_row = ori.row_mut(y);
        for x in 0..w {
            ori_row[x] = out_gy[x].atan2(out_gx[x]);
        }
    }

    Gradients { gx, gy, mag, ori }
}
