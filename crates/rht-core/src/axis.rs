use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Unit of the values on an [`AngleAxis`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Orientation period (a half turn) in this unit.
    #[inline]
    pub fn half_turn(self) -> f64 {
        match self {
            AngleUnit::Degrees => 180.0,
            AngleUnit::Radians => PI,
        }
    }
}

/// Ordered candidate orientations indexing every distribution of a store.
///
/// Values are kept as given: the axis may be `[0, 180)` or a signed
/// equivalent such as `[-90, 90)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngleAxis {
    pub values: Vec<f64>,
    #[serde(default)]
    pub unit: AngleUnit,
}

impl AngleAxis {
    pub fn new(values: Vec<f64>, unit: AngleUnit) -> Self {
        Self { values, unit }
    }

    pub fn degrees(values: Vec<f64>) -> Self {
        Self::new(values, AngleUnit::Degrees)
    }

    pub fn radians(values: Vec<f64>) -> Self {
        Self::new(values, AngleUnit::Radians)
    }

    /// `n` evenly spaced angles on `[0, half turn)`, the RHT default.
    pub fn uniform(n: usize, unit: AngleUnit) -> Self {
        let step = unit.half_turn() / n.max(1) as f64;
        Self::new((0..n).map(|i| i as f64 * step).collect(), unit)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn period(&self) -> f64 {
        self.unit.half_turn()
    }

    /// Angles whose intensity in `distribution` is strictly positive.
    ///
    /// Pairs are zipped, so a shorter slice truncates the selection; callers
    /// check lengths first.
    pub fn select_positive<'a>(
        &'a self,
        distribution: &'a [f64],
    ) -> impl Iterator<Item = f64> + 'a {
        self.values
            .iter()
            .zip(distribution)
            .filter(|(_, &w)| w > 0.0)
            .map(|(&theta, _)| theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn uniform_axis_is_half_open() {
        let axis = AngleAxis::uniform(4, AngleUnit::Degrees);
        assert_eq!(axis.values, vec![0.0, 45.0, 90.0, 135.0]);

        let rad = AngleAxis::uniform(2, AngleUnit::Radians);
        assert_relative_eq!(rad.values[1], PI / 2.0);
        assert_relative_eq!(rad.period(), PI);
    }

    #[test]
    fn select_positive_skips_zero_and_negative() {
        let axis = AngleAxis::degrees(vec![0.0, 45.0, 90.0, 135.0]);
        let picked: Vec<f64> = axis.select_positive(&[0.0, 3.0, -1.0, 5.0]).collect();
        assert_eq!(picked, vec![45.0, 135.0]);
    }

    #[test]
    fn unit_defaults_to_degrees_in_json() {
        let axis: AngleAxis = serde_json::from_str(r#"{"values":[0.0,90.0]}"#).unwrap();
        assert_eq!(axis.unit, AngleUnit::Degrees);
    }
}
