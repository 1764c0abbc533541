//! Core types for Rolling Hough Transform (RHT) post-processing.
//!
//! The RHT emits, for every pixel it considers "lit", a distribution of
//! intensities over a fixed axis of candidate orientations. This crate holds
//! those distributions in a pixel-keyed store and provides the half-polar
//! angle helpers shared by the backprojection and comparison crates.
//!
//! It does *not* run the RHT and knows nothing about FITS.
//!
//! ```
//! use rht_core::{PixelAngleStore, PixelCoord};
//!
//! let store = PixelAngleStore::build(&[2], &[5], &[vec![0.0, 1.0, 2.0]])?;
//! assert_eq!(store.get(PixelCoord::new(2, 5))?, &[0.0, 1.0, 2.0]);
//! # Ok::<(), rht_core::StoreError>(())
//! ```

mod angle;
mod axis;
mod logger;
mod pixel;
mod store;

pub use angle::{circular_mean_half, linear_mean, wrap_difference, wrap_half};
pub use axis::{AngleAxis, AngleUnit};
pub use pixel::PixelCoord;
pub use store::{DuplicatePolicy, PixelAngleStore, StoreError, StoreParams};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};
