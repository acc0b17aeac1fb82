//! I/O helpers for color images, scalar fields and JSON.
//!
//! - `load_color_image`: read a PNG/JPEG/etc. into an owned RGB8 buffer.
//! - `save_grayscale_f32`: write an `ImageF32` with values in [0, 1] to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ColorImage, ImageF32, ImageView};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned interleaved RGB8 buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct RgbImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbImageU8 {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ColorImage` view
    pub fn as_view(&self) -> ColorImage<'_> {
        ColorImage {
            w: self.width,
            h: self.height,
            stride: self.width * 3,
            channels: 3,
            data: &self.data,
        }
    }
}

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_color_image(path: &Path) -> Result<RgbImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    if width == 0 || height == 0 {
        return Err(format!("Image {} has zero area", path.display()));
    }
    Ok(RgbImageU8::new(width, height, img.into_raw()))
}

/// Save a float field to a grayscale PNG, mapping [0, 1] to [0, 255] with clamping.
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = (px * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
