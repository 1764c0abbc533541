use approx::assert_abs_diff_eq;
use rht_tools::{
    batch_backproject, run_backproject, run_compare, BackprojectReport, PixelCoord, RhtRunConfig,
    RhtTable, SharedSelection,
};
use serde_json::json;

fn axis_table(rows: Vec<usize>, cols: Vec<usize>, hthets: Vec<Vec<f64>>) -> RhtTable {
    serde_json::from_value(json!({
        "naxis1": 6,
        "naxis2": 5,
        "angles": [0.0, 45.0, 90.0, 135.0],
        "rows": rows,
        "cols": cols,
        "hthets": hthets,
        "header": { "OBJECT": "TEST" }
    }))
    .expect("table json")
}

#[test]
fn polgrad_vs_hi_end_to_end() {
    let polgrad = axis_table(vec![0], vec![0], vec![vec![0.0, 3.0, 0.0, 5.0]]);
    let hi = axis_table(vec![0], vec![0], vec![vec![2.0, 0.0, 4.0, 0.0]]);

    let res = run_compare(&polgrad, &hi, &RhtRunConfig::default()).expect("compare");
    assert_eq!(res.pixels, vec![PixelCoord::new(0, 0)]);
    assert_abs_diff_eq!(res.mean_a[0], 90.0);
    assert_abs_diff_eq!(res.mean_b[0], 45.0);
    assert_abs_diff_eq!(res.differences[0], 45.0);
    assert_abs_diff_eq!(res.intensities_b[0], 6.0);
}

#[test]
fn duplicate_rows_keep_last_distribution() {
    let table = axis_table(
        vec![2, 2],
        vec![4, 4],
        vec![vec![0.0, 100.0, 0.0, 0.0], vec![0.0, 1.0, 2.0, 0.0]],
    );
    let mut cfg = RhtRunConfig::default();
    cfg.backproject.edge_exclusion = 0;
    let img = run_backproject(&table, &cfg).expect("backproject");
    assert_eq!(img.get(4, 2), Some(3.0));
    assert_eq!(img.nonzero_count(), 1);
}

#[test]
fn nonzero_selection_needs_both_fields() {
    let a = axis_table(
        vec![0, 1, 2],
        vec![0, 1, 2],
        vec![
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ],
    );
    let b = axis_table(
        vec![1, 2],
        vec![1, 2],
        vec![vec![0.0, 1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0, 0.0]],
    );
    let mut cfg = RhtRunConfig {
        shared: SharedSelection::NonzeroBackprojection,
        ..Default::default()
    };
    cfg.backproject.edge_exclusion = 0;

    let res = run_compare(&a, &b, &cfg).expect("compare");
    assert_eq!(res.pixels, vec![PixelCoord::new(1, 1)]);
    assert_abs_diff_eq!(res.differences[0], 45.0);
}

#[test]
fn batch_writes_one_report_per_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = axis_table(vec![1], vec![3], vec![vec![0.0, 2.0, 2.0, 0.0]]);
    good.write_json(dir.path().join("a.json")).expect("write a");
    // pixel row 9 is outside naxis1 = 6
    let bad = axis_table(vec![9], vec![0], vec![vec![1.0; 4]]);
    bad.write_json(dir.path().join("b.json")).expect("write b");
    std::fs::write(dir.path().join("readme.txt"), "ignored").expect("write txt");

    let cfg = RhtRunConfig {
        backproject: rht_tools::BackprojectParams { edge_exclusion: 0 },
        ..Default::default()
    };
    let entries = batch_backproject(dir.path(), &cfg).expect("batch");
    assert_eq!(entries.len(), 2);
    assert!(entries[0].error.is_none());
    assert!(entries[1].error.is_some());

    let report =
        BackprojectReport::load_json(dir.path().join("a_backproj.json")).expect("report a");
    assert_abs_diff_eq!(report.total_intensity, 4.0);
    assert_eq!(report.header["OBJECT"], json!("TEST"));
    let image = report.image.expect("image");
    assert_eq!(image.get(3, 1), Some(4.0));

    let failed =
        BackprojectReport::load_json(dir.path().join("b_backproj.json")).expect("report b");
    assert!(failed.image.is_none());
    assert!(failed.error.expect("error").contains("outside image extent"));

    // rerunning does not pick up the generated reports as inputs
    assert_eq!(batch_backproject(dir.path(), &cfg).expect("rerun").len(), 2);
}
