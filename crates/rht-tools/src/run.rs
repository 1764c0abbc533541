use crate::{RhtIoError, RhtRunConfig, RhtTable, SharedSelection};
use log::info;
use rht_backproject::{backproject, BackprojectError, BackprojectionImage};
use rht_compare::{compare, intersect_pixels, shared_pixels, AngleComparisonResult, CompareError};
use rht_core::{PixelAngleStore, PixelCoord, StoreError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level run helpers.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Io(#[from] RhtIoError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Backproject(#[from] BackprojectError),
    #[error(transparent)]
    Compare(#[from] CompareError),
}

/// Table → store → backprojection image of shape `(naxis2, naxis1)`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(table, cfg),
        fields(naxis1 = table.naxis1, naxis2 = table.naxis2)
    )
)]
pub fn run_backproject(
    table: &RhtTable,
    cfg: &RhtRunConfig,
) -> Result<BackprojectionImage, RunError> {
    let store = table.store(&cfg.store)?;
    Ok(backproject_table(&store, table, cfg)?)
}

/// Pixels to compare between two tables according to `cfg.shared`.
pub fn select_shared_pixels(
    table_a: &RhtTable,
    store_a: &PixelAngleStore,
    table_b: &RhtTable,
    store_b: &PixelAngleStore,
    cfg: &RhtRunConfig,
) -> Result<Vec<PixelCoord>, RunError> {
    Ok(match cfg.shared {
        SharedSelection::AllShared => shared_pixels(store_a, store_b),
        SharedSelection::NonzeroBackprojection => {
            let bp_a = backproject_table(store_a, table_a, cfg)?;
            let bp_b = backproject_table(store_b, table_b, cfg)?;
            intersect_pixels(bp_a.nonzero_pixels(), bp_b.nonzero_pixels())
        }
    })
}

fn backproject_table(
    store: &PixelAngleStore,
    table: &RhtTable,
    cfg: &RhtRunConfig,
) -> Result<BackprojectionImage, BackprojectError> {
    backproject(
        store,
        table.angles.len(),
        table.naxis1,
        table.naxis2,
        &cfg.backproject,
    )
}

/// Compare field A (`table_a`) against field B (`table_b`).
#[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
pub fn run_compare(
    table_a: &RhtTable,
    table_b: &RhtTable,
    cfg: &RhtRunConfig,
) -> Result<AngleComparisonResult, RunError> {
    let store_a = table_a.store(&cfg.store)?;
    let store_b = table_b.store(&cfg.store)?;
    let pixels = select_shared_pixels(table_a, &store_a, table_b, &store_b, cfg)?;
    info!(
        "comparing {} shared pixels ({} in A, {} in B)",
        pixels.len(),
        store_a.len(),
        store_b.len()
    );
    Ok(compare(
        &store_a,
        &store_b,
        &table_a.axis(),
        &table_b.axis(),
        &pixels,
        &cfg.compare,
    )?)
}
