//! Facade crate for the `rht-*` workspace.
//!
//! This crate provides:
//! - re-exports of the store, backprojection and comparison crates,
//! - a JSON container for RHT tables ([`RhtTable`]) standing in for the
//!   FITS table the RHT writes,
//! - run configuration and JSON reports,
//! - a directory batch driver and the `rht` command-line tool (feature `cli`).
//!
//! ## Quickstart
//!
//! ```no_run
//! use rht_tools::{run_backproject, RhtRunConfig, RhtTable};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = RhtTable::load_json("field_rht.json")?;
//! let image = run_backproject(&table, &RhtRunConfig::default())?;
//! println!("total intensity {}", image.sum());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `rht_tools::core`: pixel coordinates, angle axes, the pixel angle store.
//! - `rht_tools::backproject`: masked-sum backprojection.
//! - `rht_tools::compare`: angle matching between two fields.

pub use rht_backproject as backproject;
pub use rht_compare as compare;
pub use rht_core as core;

pub use rht_backproject::{BackprojectParams, BackprojectionImage};
pub use rht_compare::{AngleComparisonResult, CompareParams};
pub use rht_core::{AngleAxis, AngleUnit, PixelAngleStore, PixelCoord, StoreParams};

mod batch;
mod header;
mod io;
mod run;

pub use batch::{batch_backproject, backproj_output_path, BatchEntry};
pub use header::{is_valid_keyword, merge_missing_header_keys, Header, HeaderMergeSummary};
pub use io::{
    BackprojectReport, CompareReport, RhtIoError, RhtRunConfig, RhtTable, SharedSelection,
};
pub use run::{run_backproject, run_compare, select_shared_pixels, RunError};
