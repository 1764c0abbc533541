//! RHT backprojection.
//!
//! Reduces every pixel's angle distribution in a
//! [`PixelAngleStore`](rht_core::PixelAngleStore) to one masked sum and
//! writes it into a dense image.
//!
//! ## Quickstart
//!
//! ```
//! use rht_backproject::{BackprojectParams, Backprojector};
//! use rht_core::PixelAngleStore;
//!
//! let mut dist = vec![0.0; 8];
//! dist[2] = 7.0;
//! let store = PixelAngleStore::build(&[2], &[5], &[dist])?;
//!
//! let bp = Backprojector::new(BackprojectParams { edge_exclusion: 1 });
//! let image = bp.run(&store, 8, 10, 10)?;
//! assert_eq!(image.get(5, 2), Some(7.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Masking: the first `edge_exclusion + 1` and the last `edge_exclusion`
//! angle bins are dropped before summing. Those bins sit next to the
//! 0/180° wrap where the RHT orientation is dominated by discretization.
//!
//! Axis order: a stored pixel `(row, col)` lands at image `[col][row]`.

mod backprojector;
mod image;

pub use backprojector::{
    backproject, masked_sum, BackprojectError, BackprojectParams, Backprojector,
    DEFAULT_EDGE_EXCLUSION,
};
pub use image::BackprojectionImage;
