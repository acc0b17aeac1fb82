#![allow(dead_code)]

use complexity_fields::image::ImageF32;

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let cx = (x / cell) as i32;
            let cy = (y / cell) as i32;
            let sum = cx + cy;
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            img[y * width + x] = val;
        }
    }
    img
}

/// Dark filled disk of radius `r` centred in a white square of side `2r + 5`.
pub fn filled_disk(r: usize) -> ImageF32 {
    let side = 2 * r + 5;
    let c = (side / 2) as isize;
    let mut img = ImageF32::from_vec(side, side, vec![255.0; side * side]);
    for y in 0..side {
        for x in 0..side {
            let dx = x as isize - c;
            let dy = y as isize - c;
            if dx * dx + dy * dy <= (r * r) as isize {
                img.set(x, y, 0.0);
            }
        }
    }
    img
}

/// Interleaved RGB image: flat background with a saturated rectangle and a
/// thin dark cross.
pub fn color_scene_rgb(width: usize, height: usize) -> Vec<u8> {
    let mut data = vec![0u8; width * height * 3];
    for y in 0..height {
        for x in 0..width {
            let px = if (width / 4..width / 2).contains(&x) && (height / 4..height * 3 / 4).contains(&y) {
                [230, 40, 30]
            } else if x == width * 3 / 4 || y == height / 8 {
                [10, 10, 10]
            } else {
                [200, 210, 220]
            };
            let i = (y * width + x) * 3;
            data[i..i + 3].copy_from_slice(&px);
        }
    }
    data
}

/// Deterministic pseudo-random grayscale noise in the 0–255 domain.
pub fn noise_f32(width: usize, height: usize, seed: u32) -> ImageF32 {
    let mut state = seed;
    let data = (0..width * height)
        .map(|_| {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            ((state >> 16) & 0xff) as f32
        })
        .collect();
    ImageF32::from_vec(width, height, data)
}
