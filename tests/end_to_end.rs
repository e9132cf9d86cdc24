use std::path::{Path, PathBuf};

use frp_bond_predictor::batch::{
    run_batch, BatchError, BatchOutcome, BatchStructureError, PREDICTION_COLUMN,
};
use frp_bond_predictor::data::{load_table, Cell};
use frp_bond_predictor::features::{Feature, FeatureVector, FEATURE_COUNT};
use frp_bond_predictor::model::{ArtifactError, ModelArtifact, ScalerArtifact, Tree};
use frp_bond_predictor::pipeline::Predictor;

fn write_artifacts(dir: &Path) -> (PathBuf, PathBuf) {
    let scaler = ScalerArtifact::MinMax {
        min: vec![-0.1, -0.25, -0.5, -0.25, -0.42, -0.2, -0.625, -0.14],
        scale: vec![0.005, 0.25, 0.5, 0.25, 0.07, 0.005, 0.025, 0.14],
    };
    // Split on scaled fc (feature 6) then on scaled d (feature 4).
    let tree = Tree {
        children_left: vec![1, 3, -1, -1, -1],
        children_right: vec![2, 4, -1, -1, -1],
        feature: vec![6, 4, -2, -2, -2],
        threshold: vec![0.5, 0.4, -2.0, -2.0, -2.0],
        value: vec![0.0, 0.0, 18.0, 14.0, 10.0],
    };
    let model = ModelArtifact::RandomForest {
        n_features: FEATURE_COUNT,
        trees: vec![tree, Tree::constant(12.0)],
    };

    let scaler_path = dir.join("scaler.json");
    let model_path = dir.join("model.json");
    std::fs::write(&scaler_path, serde_json::to_string(&scaler).unwrap()).unwrap();
    std::fs::write(&model_path, serde_json::to_string(&model).unwrap()).unwrap();
    (scaler_path, model_path)
}

const ROWS: &str = "\
25,1,2,3,8,100,30,2.5
200,5,1,1,16,60,55,5.0
60,3,3,5,12,,45,3.0
";

#[test]
fn batch_results_saved_to_xlsx_match_single_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let (scaler_path, model_path) = write_artifacts(dir.path());
    let predictor = Predictor::load(&scaler_path, &model_path).unwrap();

    // The third row has an empty la cell; fill it so the batch is valid.
    let input = dir.path().join("specimens.csv");
    std::fs::write(&input, ROWS.replace(",,", ",120,")).unwrap();

    let output = dir.path().join("out.xlsx");
    let choose = |name: &str| {
        assert_eq!(name, "predicted_specimens.csv");
        Some(output.clone())
    };
    let mut phases = Vec::new();
    let outcome = run_batch(&predictor, &input, &choose, &mut |p| phases.push(p)).unwrap();

    let BatchOutcome::Saved { path, report } = outcome else {
        panic!("expected the results to be saved");
    };
    assert_eq!(path, output);
    assert_eq!(report.predictions.len(), 3);
    assert_eq!(report.out_of_range_rows, 0);
    assert_eq!(phases.len(), 6);

    let saved = load_table(&output).unwrap();
    // Header row plus three data rows.
    assert_eq!(saved.len(), 4);
    assert_eq!(saved.width(), FEATURE_COUNT + 1);
    assert_eq!(
        saved.cell(0, FEATURE_COUNT),
        &Cell::Text(PREDICTION_COLUMN.to_string())
    );

    for (i, expected) in report.predictions.iter().enumerate() {
        let row: Vec<f64> = (0..FEATURE_COUNT)
            .map(|c| saved.cell(i + 1, c).as_f64().unwrap())
            .collect();
        let features = FeatureVector::from_row(row.try_into().unwrap()).unwrap();
        let single = predictor.predict_one(&features).unwrap();
        assert!((single - expected).abs() < 1e-9);
        let stored = saved.cell(i + 1, FEATURE_COUNT).as_f64().unwrap();
        assert!((stored - expected).abs() < 1e-9);
    }
}

#[test]
fn missing_cell_stops_the_batch_before_saving() {
    let dir = tempfile::tempdir().unwrap();
    let (scaler_path, model_path) = write_artifacts(dir.path());
    let predictor = Predictor::load(&scaler_path, &model_path).unwrap();

    let input = dir.path().join("specimens.csv");
    std::fs::write(&input, ROWS).unwrap();

    let choose = |_: &str| -> Option<PathBuf> { panic!("no destination should be asked for") };
    let err = run_batch(&predictor, &input, &choose, &mut |_| {}).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("la"), "{text}");
}

#[test]
fn missing_model_file_is_reported_by_path() {
    let dir = tempfile::tempdir().unwrap();
    let (scaler_path, _) = write_artifacts(dir.path());
    let missing = dir.path().join("nope.json");

    match Predictor::load(&scaler_path, &missing) {
        Err(ArtifactError::NotFound { path }) => assert_eq!(path, missing),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

/// Write `rows` into the first sheet with the top-left value at
/// (`first_row`, `first_col`), zero-based.
fn write_workbook(path: &Path, rows: &[[f64; FEATURE_COUNT]], first_row: u32, first_col: u16) {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, v) in row.iter().enumerate() {
            sheet
                .write_number(first_row + r as u32, first_col + c as u16, *v)
                .unwrap();
        }
    }
    workbook.save(path).unwrap();
}

fn ten_specimens() -> Vec<[f64; FEATURE_COUNT]> {
    (0..10)
        .map(|i| {
            let i = i as f64;
            [
                25.0 + 10.0 * i,
                1.0 + i % 5.0,
                1.0 + i % 3.0,
                1.0 + (i + 2.0) % 5.0,
                8.0 + i,
                60.0 + 15.0 * i,
                28.0 + 3.0 * i,
                1.5 + 0.4 * i,
            ]
        })
        .collect()
}

#[test]
fn ten_row_workbook_gains_a_ninth_prediction_column() {
    let dir = tempfile::tempdir().unwrap();
    let (scaler_path, model_path) = write_artifacts(dir.path());
    let predictor = Predictor::load(&scaler_path, &model_path).unwrap();

    let rows = ten_specimens();
    let input = dir.path().join("specimens.xlsx");
    write_workbook(&input, &rows, 0, 0);

    let output = dir.path().join("results.xlsx");
    let choose = |name: &str| {
        assert_eq!(name, "predicted_specimens.xlsx");
        Some(output.clone())
    };
    let outcome = run_batch(&predictor, &input, &choose, &mut |_| {}).unwrap();
    let report = outcome.report();
    assert_eq!(report.predictions.len(), 10);
    assert!(report.predictions.iter().all(|v| v.is_finite()));

    let saved = load_table(&output).unwrap();
    assert_eq!(saved.len(), 11);
    assert_eq!(saved.width(), FEATURE_COUNT + 1);
    for (i, row) in rows.iter().enumerate() {
        for (c, v) in row.iter().enumerate() {
            assert_eq!(saved.cell(i + 1, c).as_f64(), Some(*v));
        }
        let features = FeatureVector::from_row(*row).unwrap();
        let single = predictor.predict_one(&features).unwrap();
        assert_eq!(saved.cell(i + 1, FEATURE_COUNT).as_f64(), Some(single));
    }
}

#[test]
fn workbook_with_blank_first_column_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (scaler_path, model_path) = write_artifacts(dir.path());
    let predictor = Predictor::load(&scaler_path, &model_path).unwrap();

    let input = dir.path().join("offset.xlsx");
    write_workbook(&input, &ten_specimens()[..1], 1, 1);

    let choose = |_: &str| -> Option<PathBuf> { panic!("no destination should be asked for") };
    let err = run_batch(&predictor, &input, &choose, &mut |_| {}).unwrap_err();
    assert_eq!(
        err,
        BatchError::Structure(BatchStructureError::MissingValue {
            column: 1,
            feature: Feature::Temperature,
            row: 1,
        })
    );
}
