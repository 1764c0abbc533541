use serde::{Deserialize, Serialize};

/// How the selected angles of one pixel are averaged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanKind {
    /// Arithmetic mean. Not wrap-aware: `{5, 175}` averages to 90.
    #[default]
    Linear,
    /// Doubled-angle circular mean on the half-polar axis, in `[0, period)`.
    Circular,
}

/// How the per-pixel difference `mean_a - mean_b` is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Plain subtraction.
    #[default]
    Linear,
    /// Wrapped to `[-period/2, period/2)`.
    Wrapped,
}

/// What to do when a field has no positive-intensity angle at a pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    /// Mean and difference become NaN.
    #[default]
    PropagateNan,
    /// Fail the whole comparison.
    Error,
}

/// Comparator configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareParams {
    #[serde(default)]
    pub mean: MeanKind,
    #[serde(default)]
    pub difference: DifferenceKind,
    #[serde(default)]
    pub empty_selection: EmptySelectionPolicy,
}
