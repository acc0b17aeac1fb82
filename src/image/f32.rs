//! Owned single-channel f32 raster in row-major layout (stride == width).
//!
//! This is the scalar field type every analyzer returns. Its length always
//! equals `w * h`; analyzers allocate a fresh one per output and never write
//! into a field they were handed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Panics when `data.len() != w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), w * h, "field length must equal w * h");
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// Same dimensions, every sample produced by `f` from the source sample.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            w: self.w,
            h: self.h,
            stride: self.stride,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Largest sample, `0.0` for an empty field.
    pub fn max_value(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl crate::image::traits::ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
