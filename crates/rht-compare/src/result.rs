use rht_core::{AngleUnit, PixelCoord};
use serde::{Deserialize, Serialize};

/// Output of one comparison, index-aligned with the requested pixels.
///
/// Angle vectors may hold NaN (see
/// [`EmptySelectionPolicy`](crate::EmptySelectionPolicy)); in JSON a NaN is
/// written as `null` and read back as NaN.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AngleComparisonResult {
    pub unit: AngleUnit,
    pub pixels: Vec<PixelCoord>,
    #[serde(with = "nan_as_null")]
    pub mean_a: Vec<f64>,
    #[serde(with = "nan_as_null")]
    pub mean_b: Vec<f64>,
    /// `mean_a - mean_b`.
    #[serde(with = "nan_as_null")]
    pub differences: Vec<f64>,
    /// Sum of the full field A distribution.
    pub intensities_a: Vec<f64>,
    /// Sum of the full field B distribution.
    pub intensities_b: Vec<f64>,
}

impl AngleComparisonResult {
    pub(crate) fn with_capacity(n: usize, unit: AngleUnit) -> Self {
        Self {
            unit,
            pixels: Vec::with_capacity(n),
            mean_a: Vec::with_capacity(n),
            mean_b: Vec::with_capacity(n),
            differences: Vec::with_capacity(n),
            intensities_a: Vec::with_capacity(n),
            intensities_b: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Number of pixels whose difference is NaN.
    pub fn nan_count(&self) -> usize {
        self.differences.iter().filter(|d| d.is_nan()).count()
    }

    /// `(difference, intensity_b)` pairs with a finite difference.
    pub fn finite(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.differences
            .iter()
            .zip(&self.intensities_b)
            .filter(|(d, _)| d.is_finite())
            .map(|(&d, &i)| (d, i))
    }
}

mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], s: S) -> Result<S::Ok, S::Error> {
        values
            .iter()
            .map(|v| (!v.is_nan()).then_some(*v))
            .collect::<Vec<Option<f64>>>()
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<f64>, D::Error> {
        let raw = Vec::<Option<f64>>::deserialize(d)?;
        Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}
