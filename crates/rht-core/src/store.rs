//! Pixel-keyed storage of RHT angle distributions.
//!
//! Distributions are packed into one arena (`values`, slot `k` occupying
//! `k * axis_len .. (k + 1) * axis_len`) and addressed through a hash index
//! keyed by [`PixelCoord`]. The store is immutable once built.

use crate::PixelCoord;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do when the same pixel appears more than once in the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later entry replaces the earlier one.
    #[default]
    Overwrite,
    /// Fail with [`StoreError::DuplicatePixel`].
    Reject,
    /// Element-wise sum of all entries for the pixel.
    Sum,
}

/// Parameters for building a [`PixelAngleStore`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreParams {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

/// Errors returned while building or querying a store.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("input lengths differ (rows={rows}, cols={cols}, distributions={distributions})")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        distributions: usize,
    },
    #[error("distribution {index} has {got} entries, expected {expected}")]
    AxisLengthMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },
    #[error("pixel {pixel} appears more than once (entry {index})")]
    DuplicatePixel { pixel: PixelCoord, index: usize },
    #[error("pixel {0} not present in store")]
    KeyNotFound(PixelCoord),
}

/// Mapping from pixel to its angle-intensity distribution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelAngleStore {
    axis_len: usize,
    values: Vec<f64>,
    index: HashMap<PixelCoord, usize>,
    order: Vec<PixelCoord>,
}

impl PixelAngleStore {
    /// Build a store with [`DuplicatePolicy::Overwrite`].
    pub fn build<D: AsRef<[f64]>>(
        rows: &[usize],
        cols: &[usize],
        distributions: &[D],
    ) -> Result<Self, StoreError> {
        Self::build_with(rows, cols, distributions, &StoreParams::default())
    }

    /// Build a store from three parallel sequences.
    ///
    /// The axis length is taken from the first distribution; an empty input
    /// yields an empty store with `axis_len() == 0`.
    pub fn build_with<D: AsRef<[f64]>>(
        rows: &[usize],
        cols: &[usize],
        distributions: &[D],
        params: &StoreParams,
    ) -> Result<Self, StoreError> {
        check_parallel(rows.len(), cols.len(), distributions.len())?;
        let axis_len = distributions.first().map_or(0, |d| d.as_ref().len());

        let mut builder = StoreBuilder::new(axis_len, rows.len(), params.duplicates);
        for (k, ((&row, &col), dist)) in rows.iter().zip(cols).zip(distributions).enumerate() {
            let dist = dist.as_ref();
            if dist.len() != axis_len {
                return Err(StoreError::AxisLengthMismatch {
                    index: k,
                    expected: axis_len,
                    got: dist.len(),
                });
            }
            builder.insert(k, PixelCoord::new(row, col), dist)?;
        }
        Ok(builder.finish())
    }

    /// Build a store from a flattened `N x axis_len` buffer.
    pub fn from_flat(
        rows: &[usize],
        cols: &[usize],
        values: &[f64],
        axis_len: usize,
        params: &StoreParams,
    ) -> Result<Self, StoreError> {
        if axis_len == 0 && !values.is_empty() {
            return Err(StoreError::AxisLengthMismatch {
                index: 0,
                expected: 0,
                got: values.len(),
            });
        }
        let n = if axis_len == 0 {
            rows.len()
        } else {
            values.len() / axis_len
        };
        if axis_len > 0 && values.len() % axis_len != 0 {
            return Err(StoreError::AxisLengthMismatch {
                index: n,
                expected: axis_len,
                got: values.len() % axis_len,
            });
        }
        check_parallel(rows.len(), cols.len(), n)?;

        let mut builder = StoreBuilder::new(axis_len, n, params.duplicates);
        for (k, (&row, &col)) in rows.iter().zip(cols).enumerate() {
            let dist = &values[k * axis_len..(k + 1) * axis_len];
            builder.insert(k, PixelCoord::new(row, col), dist)?;
        }
        Ok(builder.finish())
    }

    /// Distribution stored for `pixel`.
    pub fn get(&self, pixel: PixelCoord) -> Result<&[f64], StoreError> {
        self.index
            .get(&pixel)
            .map(|&slot| self.slot(slot))
            .ok_or(StoreError::KeyNotFound(pixel))
    }

    #[inline]
    pub fn contains(&self, pixel: PixelCoord) -> bool {
        self.index.contains_key(&pixel)
    }

    /// Number of distinct pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Length of every distribution in the store.
    #[inline]
    pub fn axis_len(&self) -> usize {
        self.axis_len
    }

    /// Distinct pixels in order of first appearance in the input.
    #[inline]
    pub fn pixels(&self) -> &[PixelCoord] {
        &self.order
    }

    /// `(pixel, distribution)` pairs in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (PixelCoord, &[f64])> + '_ {
        self.order.iter().map(move |&p| (p, self.slot(self.index[&p])))
    }

    #[inline]
    fn slot(&self, slot: usize) -> &[f64] {
        &self.values[slot * self.axis_len..(slot + 1) * self.axis_len]
    }
}

fn check_parallel(rows: usize, cols: usize, distributions: usize) -> Result<(), StoreError> {
    if rows != cols || rows != distributions {
        return Err(StoreError::ShapeMismatch {
            rows,
            cols,
            distributions,
        });
    }
    Ok(())
}

struct StoreBuilder {
    store: PixelAngleStore,
    policy: DuplicatePolicy,
    duplicates: usize,
}

impl StoreBuilder {
    fn new(axis_len: usize, capacity: usize, policy: DuplicatePolicy) -> Self {
        Self {
            store: PixelAngleStore {
                axis_len,
                values: Vec::with_capacity(axis_len * capacity),
                index: HashMap::with_capacity(capacity),
                order: Vec::with_capacity(capacity),
            },
            policy,
            duplicates: 0,
        }
    }

    fn insert(&mut self, k: usize, pixel: PixelCoord, dist: &[f64]) -> Result<(), StoreError> {
        let store = &mut self.store;
        let Some(&slot) = store.index.get(&pixel) else {
            store.index.insert(pixel, store.order.len());
            store.order.push(pixel);
            store.values.extend_from_slice(dist);
            return Ok(());
        };

        self.duplicates += 1;
        let l = store.axis_len;
        let dst = &mut store.values[slot * l..(slot + 1) * l];
        match self.policy {
            DuplicatePolicy::Reject => return Err(StoreError::DuplicatePixel { pixel, index: k }),
            DuplicatePolicy::Overwrite => dst.copy_from_slice(dist),
            DuplicatePolicy::Sum => dst.iter_mut().zip(dist).for_each(|(d, s)| *d += s),
        }
        Ok(())
    }

    fn finish(self) -> PixelAngleStore {
        if self.duplicates > 0 {
            warn!(
                "{} duplicate pixel entries resolved with {:?}",
                self.duplicates, self.policy
            );
        }
        debug!(
            "pixel angle store: {} pixels, axis length {}",
            self.store.len(),
            self.store.axis_len
        );
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(row: usize, col: usize) -> PixelCoord {
        PixelCoord::new(row, col)
    }

    #[test]
    fn empty_input_builds_empty_store() {
        let store = PixelAngleStore::build::<Vec<f64>>(&[], &[], &[]).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.axis_len(), 0);
        assert_eq!(store.get(px(0, 0)), Err(StoreError::KeyNotFound(px(0, 0))));
    }

    #[test]
    fn lookup_returns_distribution() {
        let store =
            PixelAngleStore::build(&[0, 1], &[2, 3], &[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(px(0, 2)).unwrap(), &[1.0, 2.0]);
        assert_eq!(store.get(px(1, 3)).unwrap(), &[3.0, 4.0]);
        assert!(!store.contains(px(2, 0)));
    }

    #[test]
    fn unequal_inputs_are_shape_mismatch() {
        let err = PixelAngleStore::build(&[0, 1], &[0], &[vec![1.0], vec![2.0]]).unwrap_err();
        assert_eq!(
            err,
            StoreError::ShapeMismatch {
                rows: 2,
                cols: 1,
                distributions: 2
            }
        );
    }

    #[test]
    fn ragged_distribution_is_rejected() {
        let err =
            PixelAngleStore::build(&[0, 1], &[0, 0], &[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            StoreError::AxisLengthMismatch {
                index: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn duplicate_keeps_later_entry_by_default() {
        let store = PixelAngleStore::build(
            &[4, 1, 4],
            &[4, 1, 4],
            &[vec![1.0, 1.0], vec![0.0, 9.0], vec![2.0, 3.0]],
        )
        .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(px(4, 4)).unwrap(), &[2.0, 3.0]);
        assert_eq!(store.pixels(), &[px(4, 4), px(1, 1)]);
    }

    #[test]
    fn duplicate_policies_reject_and_sum() {
        let rows = [0, 0];
        let cols = [1, 1];
        let dists = [vec![1.0, 2.0], vec![10.0, 20.0]];

        let reject = StoreParams {
            duplicates: DuplicatePolicy::Reject,
        };
        assert_eq!(
            PixelAngleStore::build_with(&rows, &cols, &dists, &reject).unwrap_err(),
            StoreError::DuplicatePixel {
                pixel: px(0, 1),
                index: 1
            }
        );

        let sum = StoreParams {
            duplicates: DuplicatePolicy::Sum,
        };
        let store = PixelAngleStore::build_with(&rows, &cols, &dists, &sum).unwrap();
        assert_eq!(store.get(px(0, 1)).unwrap(), &[11.0, 22.0]);
    }

    #[test]
    fn flat_buffer_matches_nested_build() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let flat =
            PixelAngleStore::from_flat(&[0, 1], &[0, 1], &values, 3, &StoreParams::default())
                .unwrap();
        let nested =
            PixelAngleStore::build(&[0, 1], &[0, 1], &[&values[..3], &values[3..]]).unwrap();
        assert_eq!(flat, nested);

        let err = PixelAngleStore::from_flat(&[0], &[0], &values[..4], 3, &StoreParams::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::AxisLengthMismatch { .. }));
    }

    #[test]
    fn flat_buffer_with_zero_axis_must_be_empty() {
        let err = PixelAngleStore::from_flat(&[0], &[0], &[1.0, 2.0], 0, &StoreParams::default())
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::AxisLengthMismatch {
                index: 0,
                expected: 0,
                got: 2
            }
        );

        let store =
            PixelAngleStore::from_flat(&[0, 1], &[0, 1], &[], 0, &StoreParams::default()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(px(1, 1)).unwrap(), &[] as &[f64]);
    }

    #[test]
    fn iter_follows_first_appearance() {
        let store = PixelAngleStore::build(&[5, 2], &[0, 7], &[[1.0], [2.0]]).unwrap();
        let seen: Vec<(PixelCoord, f64)> = store.iter().map(|(p, d)| (p, d[0])).collect();
        assert_eq!(seen, vec![(px(5, 0), 1.0), (px(2, 7), 2.0)]);
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: StoreParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.duplicates, DuplicatePolicy::Overwrite);
        let params: StoreParams = serde_json::from_str(r#"{"duplicates":"sum"}"#).unwrap();
        assert_eq!(params.duplicates, DuplicatePolicy::Sum);
    }
}
