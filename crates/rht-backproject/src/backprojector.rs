use crate::BackprojectionImage;
use log::debug;
use rht_core::{PixelAngleStore, PixelCoord};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Edge exclusion used by the reference RHT backprojection.
pub const DEFAULT_EDGE_EXCLUSION: usize = 15;

/// Backprojection settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackprojectParams {
    /// Bins dropped at the top of the angle axis; `edge_exclusion + 1` are
    /// dropped at the bottom.
    #[serde(default = "default_edge_exclusion")]
    pub edge_exclusion: usize,
}

fn default_edge_exclusion() -> usize {
    DEFAULT_EDGE_EXCLUSION
}

impl Default for BackprojectParams {
    fn default() -> Self {
        Self {
            edge_exclusion: DEFAULT_EDGE_EXCLUSION,
        }
    }
}

/// Errors returned by [`backproject`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BackprojectError {
    #[error("pixel {pixel} outside image extent (width={width}, height={height})")]
    IndexOutOfRange {
        pixel: PixelCoord,
        width: usize,
        height: usize,
    },
    #[error("image extent overflows (width={width}, height={height})")]
    InvalidExtent { width: usize, height: usize },
    #[error("store distributions have {got} entries, angle axis has {expected}")]
    AxisLengthMismatch { expected: usize, got: usize },
}

/// Sum of `distribution` over `[edge_exclusion + 1, len - edge_exclusion)`.
///
/// Empty when `2 * edge_exclusion + 1 >= len`, giving `0.0`.
#[inline]
pub fn masked_sum(distribution: &[f64], edge_exclusion: usize) -> f64 {
    let lo = edge_exclusion.saturating_add(1);
    let hi = distribution.len().saturating_sub(edge_exclusion);
    if lo >= hi {
        return 0.0;
    }
    distribution[lo..hi].iter().sum()
}

/// Reconstruct a `(height, width)` image from `store`.
///
/// A stored pixel `(row, col)` is written to image row `col`, column `row`.
/// Pixels absent from the store stay zero. A non-empty store must hold
/// distributions of exactly `axis_len` entries.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(store, params), fields(pixels = store.len()))
)]
pub fn backproject(
    store: &PixelAngleStore,
    axis_len: usize,
    width: usize,
    height: usize,
    params: &BackprojectParams,
) -> Result<BackprojectionImage, BackprojectError> {
    if !store.is_empty() && store.axis_len() != axis_len {
        return Err(BackprojectError::AxisLengthMismatch {
            expected: axis_len,
            got: store.axis_len(),
        });
    }
    if width.checked_mul(height).is_none() {
        return Err(BackprojectError::InvalidExtent { width, height });
    }

    let mut image = BackprojectionImage::zeros(width, height);
    for (pixel, distribution) in store.iter() {
        let (img_row, img_col) = (pixel.col, pixel.row);
        if img_row >= height || img_col >= width {
            return Err(BackprojectError::IndexOutOfRange {
                pixel,
                width,
                height,
            });
        }
        image.set(img_row, img_col, masked_sum(distribution, params.edge_exclusion));
    }

    debug!(
        "backprojected {} pixels into {}x{}, edge exclusion {}",
        store.len(),
        width,
        height,
        params.edge_exclusion
    );
    Ok(image)
}

/// Reusable backprojector holding its parameters.
#[derive(Clone, Debug, Default)]
pub struct Backprojector {
    params: BackprojectParams,
}

impl Backprojector {
    pub fn new(params: BackprojectParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BackprojectParams {
        &self.params
    }

    pub fn run(
        &self,
        store: &PixelAngleStore,
        axis_len: usize,
        width: usize,
        height: usize,
    ) -> Result<BackprojectionImage, BackprojectError> {
        backproject(store, axis_len, width, height, &self.params)
    }
}
