//! End-to-end integration tests: CSV -> near-miss scan -> JSON -> deserialize.

use std::fs;
use std::path::Path;

use nearmiss_core::{FastDtwOracle, OracleKind, ProfileConfig, ScanMode};
use nearmiss_io::{ColumnSelector, ExperimentName, IoError, ResultWriter, ScanMetadata, SeriesReader};
use tempfile::TempDir;

/// Path to the test fixture directory.
fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str, column: &str) -> Vec<f64> {
    SeriesReader::new(&fixture_path(name))
        .with_column(ColumnSelector::Named(column.into()))
        .read()
        .expect("fixture should parse")
        .values
}

fn scan_and_write(mode: ScanMode, experiment: &str, dir: &Path) -> serde_json::Value {
    let series = load("trip_40.csv", "speed");
    let query = load("pattern_2.csv", "speed");
    assert_eq!(series.len(), 40);
    assert_eq!(query, vec![1.0, 2.0]);

    let config = ProfileConfig::new().with_mode(mode);
    let profile = config.compute(&series, &query, &FastDtwOracle).unwrap();

    let meta = ScanMetadata {
        mode,
        oracle: OracleKind::FastDtw,
        radius: config.radius(),
        n: series.len(),
        m: query.len(),
    };
    let writer = ResultWriter::new(dir, ExperimentName::new(experiment.into()).unwrap()).unwrap();
    let path = writer.write_profile(&meta, &profile, Some(1.0)).unwrap();
    assert_eq!(path, dir.join(format!("{experiment}_profile.json")));

    serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// a) fixed-length round trip
// ---------------------------------------------------------------------------

#[test]
fn fixed_round_trip() {
    let dir = TempDir::new().unwrap();
    let content = scan_and_write(ScanMode::FixedLength, "fixed_rt", dir.path());

    assert_eq!(content["experiment"], "fixed_rt");
    assert_eq!(content["mode"], "fixed");
    assert_eq!(content["n"], 40);
    assert_eq!(content["m"], 2);
    // k = min(40, 8) = 8: anchors 0, 8, 16, 24, 32
    assert_eq!(content["stride"], 8);
    assert_eq!(content["computed"], 5);

    let profile = content["profile"].as_array().unwrap();
    assert_eq!(profile.len(), 39);
    assert!(profile[5..].iter().all(serde_json::Value::is_null));

    // Flat segments [5, 5]: alignment 7 + penalty 2 * |5 - 1.5| = 14.
    for i in [0, 1, 3, 4] {
        assert!((profile[i].as_f64().unwrap() - 14.0).abs() < 1e-9, "position {i}");
    }
    assert_eq!(profile[2].as_f64().unwrap(), 0.0);

    assert_eq!(content["best"]["position"], 2);
    assert_eq!(content["best"]["anchor"], 16);
    assert_eq!(content["flagged"], serde_json::json!([2]));
}

// ---------------------------------------------------------------------------
// b) variable-length round trip
// ---------------------------------------------------------------------------

#[test]
fn variable_round_trip() {
    let dir = TempDir::new().unwrap();
    let fixed = scan_and_write(ScanMode::FixedLength, "v1", dir.path());
    let variable = scan_and_write(ScanMode::VariableLength, "v2", dir.path());

    assert_eq!(variable["mode"], "variable");
    assert_eq!(variable["computed"], 5);
    assert_eq!(variable["best"]["anchor"], 16);
    assert_eq!(variable["flagged"], serde_json::json!([2]));

    let f = fixed["profile"].as_array().unwrap();
    let v = variable["profile"].as_array().unwrap();
    assert_eq!(f.len(), v.len());
    for i in 0..5 {
        assert!(v[i].as_f64().unwrap() <= f[i].as_f64().unwrap() + 1e-9);
    }

    // Both artifacts live side by side.
    assert!(dir.path().join("v1_profile.json").is_file());
    assert!(dir.path().join("v2_profile.json").is_file());
}

// ---------------------------------------------------------------------------
// c) query longer than series
// ---------------------------------------------------------------------------

#[test]
fn long_query_writes_empty_profile() {
    let dir = TempDir::new().unwrap();
    let series = load("pattern_2.csv", "speed");
    let query = load("trip_40.csv", "speed");

    let profile = ProfileConfig::new()
        .compute(&series, &query, &FastDtwOracle)
        .unwrap();
    let meta = ScanMetadata {
        mode: ScanMode::FixedLength,
        oracle: OracleKind::FastDtw,
        radius: 3,
        n: series.len(),
        m: query.len(),
    };
    let writer = ResultWriter::new(dir.path(), ExperimentName::new("swap".into()).unwrap()).unwrap();
    let path = writer.write_profile(&meta, &profile, None).unwrap();

    let content: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(content["profile"], serde_json::json!([]));
    assert_eq!(content["computed"], 0);
    assert!(content["best"].is_null());
}

// ---------------------------------------------------------------------------
// d) bad input fixture
// ---------------------------------------------------------------------------

#[test]
fn non_finite_fixture_is_rejected() {
    let result = SeriesReader::new(&fixture_path("bad_value.csv"))
        .with_column(ColumnSelector::Named("speed".into()))
        .read();
    match result {
        Err(IoError::NonFiniteValue { row_index, column, raw, .. }) => {
            assert_eq!(row_index, 1);
            assert_eq!(column, "speed");
            assert_eq!(raw, "NaN");
        }
        other => panic!("expected NonFiniteValue, got {other:?}"),
    }
}
