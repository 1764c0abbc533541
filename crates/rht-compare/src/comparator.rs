use crate::{
    AngleComparisonResult, CompareError, CompareParams, DifferenceKind, EmptySelectionPolicy,
    Field, MeanKind,
};
use log::{debug, warn};
use rht_core::{
    circular_mean_half, linear_mean, wrap_difference, AngleAxis, PixelAngleStore, PixelCoord,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Compare two orientation fields at `shared_pixels`.
///
/// Every pixel in `shared_pixels` must be present in both stores; compute
/// the list with [`shared_pixels`](crate::shared_pixels) or
/// [`intersect_pixels`](crate::intersect_pixels). A missing pixel fails with
/// [`StoreError::KeyNotFound`](rht_core::StoreError::KeyNotFound).
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(store_a, store_b, axis_a, axis_b, shared_pixels, params),
        fields(pixels = shared_pixels.len())
    )
)]
pub fn compare(
    store_a: &PixelAngleStore,
    store_b: &PixelAngleStore,
    axis_a: &AngleAxis,
    axis_b: &AngleAxis,
    shared_pixels: &[PixelCoord],
    params: &CompareParams,
) -> Result<AngleComparisonResult, CompareError> {
    check_axis(store_a, axis_a, Field::A)?;
    check_axis(store_b, axis_b, Field::B)?;
    if axis_a.unit != axis_b.unit {
        return Err(CompareError::UnitMismatch {
            a: axis_a.unit,
            b: axis_b.unit,
        });
    }
    let period = axis_a.period();

    let mut out = AngleComparisonResult::with_capacity(shared_pixels.len(), axis_a.unit);
    let mut empty = 0usize;

    for &pixel in shared_pixels {
        let dist_a = store_a.get(pixel)?;
        let dist_b = store_b.get(pixel)?;

        let mean_a = field_mean(axis_a, dist_a, pixel, Field::A, params, period, &mut empty)?;
        let mean_b = field_mean(axis_b, dist_b, pixel, Field::B, params, period, &mut empty)?;

        let diff = match params.difference {
            DifferenceKind::Linear => mean_a - mean_b,
            DifferenceKind::Wrapped => wrap_difference(mean_a - mean_b, period),
        };

        out.pixels.push(pixel);
        out.mean_a.push(mean_a);
        out.mean_b.push(mean_b);
        out.differences.push(diff);
        out.intensities_a.push(dist_a.iter().sum());
        out.intensities_b.push(dist_b.iter().sum());
    }

    if empty > 0 {
        warn!("{empty} field selections had no positive-intensity angle; differences are NaN");
    }
    debug!(
        "compared {} shared pixels ({} NaN differences)",
        out.len(),
        out.nan_count()
    );
    Ok(out)
}

fn check_axis(store: &PixelAngleStore, axis: &AngleAxis, field: Field) -> Result<(), CompareError> {
    if !store.is_empty() && store.axis_len() != axis.len() {
        return Err(CompareError::AxisLengthMismatch {
            field,
            axis: axis.len(),
            store: store.axis_len(),
        });
    }
    Ok(())
}

fn field_mean(
    axis: &AngleAxis,
    distribution: &[f64],
    pixel: PixelCoord,
    field: Field,
    params: &CompareParams,
    period: f64,
    empty: &mut usize,
) -> Result<f64, CompareError> {
    if axis.select_positive(distribution).next().is_none() {
        return match params.empty_selection {
            EmptySelectionPolicy::Error => Err(CompareError::EmptySelection { pixel, field }),
            EmptySelectionPolicy::PropagateNan => {
                *empty += 1;
                Ok(f64::NAN)
            }
        };
    }

    let selected = axis.select_positive(distribution);
    Ok(match params.mean {
        MeanKind::Linear => linear_mean(selected),
        MeanKind::Circular => circular_mean_half(selected, period),
    })
}

/// Comparator holding its parameters.
#[derive(Clone, Debug, Default)]
pub struct AngleFieldComparator {
    params: CompareParams,
}

impl AngleFieldComparator {
    pub fn new(params: CompareParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CompareParams {
        &self.params
    }

    pub fn compare(
        &self,
        store_a: &PixelAngleStore,
        store_b: &PixelAngleStore,
        axis_a: &AngleAxis,
        axis_b: &AngleAxis,
        shared_pixels: &[PixelCoord],
    ) -> Result<AngleComparisonResult, CompareError> {
        compare(store_a, store_b, axis_a, axis_b, shared_pixels, &self.params)
    }
}
