//! Directory batch driver: backproject every RHT table in a directory.

use crate::{run_backproject, BackprojectReport, RhtIoError, RhtRunConfig, RhtTable, RunError};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const OUTPUT_SUFFIX: &str = "_backproj";

/// Outcome for one table in a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

/// `<dir>/<stem>_backproj.json` for `<dir>/<stem>.json`.
pub fn backproj_output_path(table_path: &Path) -> PathBuf {
    let stem = table_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    table_path.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.json"))
}

fn is_table_candidate(path: &Path) -> bool {
    let is_json = path.extension().is_some_and(|e| e == "json");
    let is_output = path
        .file_stem()
        .is_some_and(|s| s.to_string_lossy().ends_with(OUTPUT_SUFFIX));
    path.is_file() && is_json && !is_output
}

/// Backproject every `*.json` table in `dir` (sorted by name).
///
/// Each table gets a `<stem>_backproj.json` report next to it; earlier
/// outputs are not treated as inputs. A table that fails to load or
/// backproject is recorded in its [`BatchEntry`] and the batch continues.
/// Only failing to list `dir` is an error.
pub fn batch_backproject(dir: &Path, cfg: &RhtRunConfig) -> Result<Vec<BatchEntry>, RhtIoError> {
    let mut inputs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| is_table_candidate(p))
        .collect();
    inputs.sort();

    let mut entries = Vec::with_capacity(inputs.len());
    for input in inputs {
        info!("backprojecting {}", input.display());
        let entry = match backproject_one(&input, cfg) {
            Ok(output) => BatchEntry {
                input,
                output: Some(output),
                error: None,
            },
            Err(err) => {
                warn!("{}: {err}", input.display());
                BatchEntry {
                    input,
                    output: None,
                    error: Some(err.to_string()),
                }
            }
        };
        entries.push(entry);
    }
    Ok(entries)
}

fn backproject_one(input: &Path, cfg: &RhtRunConfig) -> Result<PathBuf, RunError> {
    let table = RhtTable::load_json(input)?;
    let mut report = BackprojectReport::new(input, &table, &cfg.backproject);
    let output = backproj_output_path(input);
    match run_backproject(&table, cfg) {
        Ok(image) => {
            report.set_image(image);
            report.write_json(&output)?;
            Ok(output)
        }
        Err(err) => {
            report.set_error(&err);
            if let Err(write_err) = report.write_json(&output) {
                warn!("{}: failure report not written: {write_err}", output.display());
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_appends_suffix() {
        assert_eq!(
            backproj_output_path(Path::new("/data/hi_rht.json")),
            PathBuf::from("/data/hi_rht_backproj.json")
        );
    }

    #[test]
    fn candidates_skip_outputs_and_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("a.json");
        let output = dir.path().join("a_backproj.json");
        let other = dir.path().join("notes.txt");
        for p in [&table, &output, &other] {
            fs::write(p, "{}").unwrap();
        }
        assert!(is_table_candidate(&table));
        assert!(!is_table_candidate(&output));
        assert!(!is_table_candidate(&other));
        assert!(!is_table_candidate(dir.path()));
    }

    #[test]
    fn run_error_survives_unwritable_report() {
        let dir = tempfile::tempdir().unwrap();
        let table = serde_json::json!({
            "naxis1": 2, "naxis2": 2,
            "angles": [0.0, 90.0],
            "rows": [5], "cols": [0],
            "hthets": [[1.0, 1.0]]
        });
        fs::write(dir.path().join("t.json"), table.to_string()).unwrap();
        // a directory where the report should go makes the write fail
        fs::create_dir(dir.path().join("t_backproj.json")).unwrap();

        let entries = batch_backproject(dir.path(), &RhtRunConfig::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].output.is_none());
        let err = entries[0].error.as_deref().unwrap();
        assert!(err.contains("outside image extent"), "{err}");
    }
}
