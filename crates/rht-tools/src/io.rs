//! JSON tables, run configuration and reports.

use crate::{Header, RunError};
use rht_backproject::{BackprojectParams, BackprojectionImage};
use rht_compare::{AngleComparisonResult, CompareParams};
use rht_core::{AngleAxis, AngleUnit, PixelAngleStore, StoreError, StoreParams};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum RhtIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn read_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T, RhtIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), RhtIoError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// RHT output for one image.
///
/// `rows[k]`, `cols[k]` and `hthets[k]` describe one lit pixel;
/// `hthets[k][i]` is the intensity at `angles[i]`. `naxis1`/`naxis2` are the
/// image width/height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhtTable {
    pub naxis1: usize,
    pub naxis2: usize,
    pub angles: Vec<f64>,
    #[serde(default)]
    pub unit: AngleUnit,
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
    pub hthets: Vec<Vec<f64>>,
    #[serde(default)]
    pub header: Header,
}

impl RhtTable {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RhtIoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RhtIoError> {
        write_json(self, path)
    }

    pub fn axis(&self) -> AngleAxis {
        AngleAxis::new(self.angles.clone(), self.unit)
    }

    /// Build the pixel angle store for this table.
    ///
    /// Every `hthets[k]` must have one entry per value in `angles`.
    pub fn store(&self, params: &StoreParams) -> Result<PixelAngleStore, StoreError> {
        let expected = self.angles.len();
        if let Some((index, dist)) = self
            .hthets
            .iter()
            .enumerate()
            .find(|(_, d)| d.len() != expected)
        {
            return Err(StoreError::AxisLengthMismatch {
                index,
                expected,
                got: dist.len(),
            });
        }
        PixelAngleStore::build_with(&self.rows, &self.cols, &self.hthets, params)
    }
}

/// How the pixels to compare are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharedSelection {
    /// Every pixel present in both tables.
    #[default]
    AllShared,
    /// Pixels non-zero in both backprojections.
    NonzeroBackprojection,
}

/// Parameters for `rht` runs, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RhtRunConfig {
    #[serde(default)]
    pub store: StoreParams,
    #[serde(default)]
    pub backproject: BackprojectParams,
    #[serde(default)]
    pub compare: CompareParams,
    #[serde(default)]
    pub shared: SharedSelection,
}

impl RhtRunConfig {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RhtIoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RhtIoError> {
        write_json(self, path)
    }
}

/// Backprojection output plus the table header, as written by `rht backproject`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackprojectReport {
    pub table_path: String,
    pub naxis1: usize,
    pub naxis2: usize,
    pub num_pixels: usize,
    pub edge_exclusion: usize,
    #[serde(default)]
    pub total_intensity: f64,
    #[serde(default)]
    pub header: Header,
    #[serde(default)]
    pub image: Option<BackprojectionImage>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BackprojectReport {
    /// Base report for `table`; the image is filled by [`Self::set_image`].
    pub fn new(table_path: &Path, table: &RhtTable, params: &BackprojectParams) -> Self {
        Self {
            table_path: table_path.to_string_lossy().into_owned(),
            naxis1: table.naxis1,
            naxis2: table.naxis2,
            num_pixels: table.rows.len(),
            edge_exclusion: params.edge_exclusion,
            total_intensity: 0.0,
            header: table.header.clone(),
            image: None,
            error: None,
        }
    }

    pub fn set_image(&mut self, image: BackprojectionImage) {
        self.total_intensity = image.sum();
        self.image = Some(image);
        self.error = None;
    }

    pub fn set_error(&mut self, err: &RunError) {
        self.error = Some(err.to_string());
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RhtIoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RhtIoError> {
        write_json(self, path)
    }
}

/// Angle comparison between two tables, as written by `rht compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareReport {
    pub table_a: String,
    pub table_b: String,
    pub shared: SharedSelection,
    pub compare: CompareParams,
    #[serde(default)]
    pub num_compared: usize,
    #[serde(default)]
    pub num_nan: usize,
    #[serde(default)]
    pub result: Option<AngleComparisonResult>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CompareReport {
    pub fn new(table_a: &Path, table_b: &Path, cfg: &RhtRunConfig) -> Self {
        Self {
            table_a: table_a.to_string_lossy().into_owned(),
            table_b: table_b.to_string_lossy().into_owned(),
            shared: cfg.shared,
            compare: cfg.compare.clone(),
            num_compared: 0,
            num_nan: 0,
            result: None,
            error: None,
        }
    }

    pub fn set_result(&mut self, result: AngleComparisonResult) {
        self.num_compared = result.len();
        self.num_nan = result.nan_count();
        self.result = Some(result);
        self.error = None;
    }

    pub fn set_error(&mut self, err: &RunError) {
        self.error = Some(err.to_string());
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RhtIoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RhtIoError> {
        write_json(self, path)
    }
}
