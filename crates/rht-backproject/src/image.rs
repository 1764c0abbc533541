use rht_core::PixelCoord;
use serde::{Deserialize, Serialize};

/// Dense backprojection, shape `(height, width)` = `(NAXIS2, NAXIS1)`.
///
/// Accessors return `None` for cells missing from `data`, so an image
/// deserialized with a short buffer never panics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackprojectionImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>, // row-major, len = w*h
}

impl BackprojectionImage {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.width + col] = value;
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.height {
            return None;
        }
        self.data.get(row * self.width..(row + 1) * self.width)
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn nonzero_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0.0).count()
    }

    /// Store keys of all non-zero cells.
    ///
    /// Cell `[r][c]` is reported as `PixelCoord { row: c, col: r }`, undoing
    /// the transposition applied by the backprojection so the keys can be
    /// looked up in the originating store.
    pub fn nonzero_pixels(&self) -> Vec<PixelCoord> {
        if self.width == 0 {
            return Vec::new();
        }
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(idx, _)| PixelCoord::new(idx % self.width, idx / self.width))
            .collect()
    }
}
