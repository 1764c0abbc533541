//! Angle matching between two RHT orientation fields.
//!
//! For every pixel shared by two stores (e.g. a polarization-gradient RHT
//! and an HI RHT) the comparator takes the mean of the angles with positive
//! intensity in each field, subtracts them (`A - B`) and reports the total
//! intensity of each field.
//!
//! ```
//! use rht_compare::{compare, shared_pixels, CompareParams};
//! use rht_core::{AngleAxis, PixelAngleStore};
//!
//! let axis = AngleAxis::degrees(vec![0.0, 45.0, 90.0, 135.0]);
//! let a = PixelAngleStore::build(&[0], &[0], &[[0.0, 3.0, 0.0, 5.0]])?;
//! let b = PixelAngleStore::build(&[0], &[0], &[[2.0, 0.0, 4.0, 0.0]])?;
//!
//! let pixels = shared_pixels(&a, &b);
//! let res = compare(&a, &b, &axis, &axis, &pixels, &CompareParams::default())?;
//! assert_eq!(res.differences, vec![45.0]);
//! assert_eq!(res.intensities_b, vec![6.0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Defaults reproduce the long-standing behaviour: a *linear* mean of the
//! selected angles, an unwrapped difference, and NaN for a pixel whose field
//! has no positive-intensity angle. Circular statistics and strict empty
//! handling are available through [`CompareParams`].

mod comparator;
mod error;
mod params;
mod result;
mod shared;

pub use comparator::{compare, AngleFieldComparator};
pub use error::{CompareError, Field};
pub use params::{CompareParams, DifferenceKind, EmptySelectionPolicy, MeanKind};
pub use result::AngleComparisonResult;
pub use shared::{intersect_pixels, shared_pixels};
