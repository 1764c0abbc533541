use rht_core::{AngleUnit, PixelCoord, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two compared fields an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    A,
    B,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::A => f.write_str("A"),
            Field::B => f.write_str("B"),
        }
    }
}

/// Errors returned by the angle comparator.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("field {field}: angle axis has {axis} values, distributions have {store}")]
    AxisLengthMismatch {
        field: Field,
        axis: usize,
        store: usize,
    },
    #[error("angle axes use different units (A={a:?}, B={b:?})")]
    UnitMismatch { a: AngleUnit, b: AngleUnit },
    #[error("pixel {pixel} has no positive-intensity angle in field {field}")]
    EmptySelection { pixel: PixelCoord, field: Field },
}
