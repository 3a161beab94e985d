//! Accuracy regression tests for nearmiss-dtw.
//!
//! Reference values are hand-derived on small inputs so that changes to the
//! window projection or the rolling buffer show up as exact mismatches.

use nearmiss_dtw::{Dtw, FastDtw, TimeSeries, WarpingStep};

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn ts(values: &[f64]) -> TimeSeries {
    TimeSeries::new(values.to_vec()).expect("valid test series")
}

// ---------------------------------------------------------------------------
// a) exact DTW on fixed pairs
// ---------------------------------------------------------------------------

#[test]
fn exact_distances_match_known_values() {
    let cases: Vec<(Vec<f64>, Vec<f64>, f64)> = vec![
        (vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0], 3.0_f64.sqrt()),
        (vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 0.0], 1.0),
        (vec![1.0, 2.0, 3.0, 4.0], vec![1.0, 2.0, 3.0, 4.0], 0.0),
        (vec![1.0], vec![5.0], 4.0),
        (vec![0.0, 0.0, 1.0], vec![1.0, 0.0, 0.0], 2.0_f64.sqrt()),
        (vec![10.0, 10.0, 10.0], vec![10.1, 9.9, 10.0], 0.02_f64.sqrt()),
    ];

    let dtw = Dtw::unconstrained();
    for (i, (a, b, expected)) in cases.iter().enumerate() {
        let dist = dtw.distance(ts(a).as_view(), ts(b).as_view()).value();
        assert!(
            (dist - expected).abs() < 1e-10,
            "pair {i}: got {dist:.15}, expected {expected:.15}"
        );
    }
}

// ---------------------------------------------------------------------------
// b) FastDTW on fixed pairs (absolute cost, no root)
// ---------------------------------------------------------------------------

#[test]
fn fastdtw_distances_match_known_values() {
    let cases: Vec<(Vec<f64>, Vec<f64>, f64)> = vec![
        // constant offset, lock-step alignment
        (vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0], 3.0),
        // single point against a level query
        (vec![2.0], vec![1.0, 2.0, 3.0], 2.0),
        // a repeated sample is absorbed by warping
        (vec![1.0, 2.0, 2.0, 3.0], vec![1.0, 2.0, 3.0], 0.0),
        // the segment at the start of a rising trip equals the query
        (vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0], 0.0),
        // one step up from the query baseline
        (vec![1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0], 2.0),
    ];

    let fast = FastDtw::new(1);
    for (i, (a, b, expected)) in cases.iter().enumerate() {
        let dist = fast.distance(ts(a).as_view(), ts(b).as_view()).value();
        assert!(
            (dist - expected).abs() < 1e-10,
            "pair {i}: got {dist:.15}, expected {expected:.15}"
        );
    }
}

// ---------------------------------------------------------------------------
// c) FastDTW is an upper bound on exact absolute-cost DTW
// ---------------------------------------------------------------------------

#[test]
fn fastdtw_radius_growth_tightens() {
    let a: Vec<f64> = (0..64).map(|i| (i as f64 * 0.21).sin() * 2.0).collect();
    let b: Vec<f64> = (0..48).map(|i| (i as f64 * 0.29 + 0.5).sin() * 2.0).collect();
    let a = ts(&a);
    let b = ts(&b);

    let exact = FastDtw::new(64).distance(a.as_view(), b.as_view()).value();
    for radius in [0usize, 1, 3, 8] {
        let approx = FastDtw::new(radius).distance(a.as_view(), b.as_view()).value();
        assert!(
            approx >= exact - 1e-9,
            "radius {radius}: approx {approx} below exact {exact}"
        );
    }
}

// ---------------------------------------------------------------------------
// d) warping path endpoints on unequal lengths
// ---------------------------------------------------------------------------

#[test]
fn fastdtw_path_spans_both_series() {
    let a = ts(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    let b = ts(&[1.0, 3.0, 5.0, 7.0, 9.0]);
    let (_, path) = FastDtw::new(1).distance_and_path(a.as_view(), b.as_view());
    assert_eq!(path.steps().first(), Some(&WarpingStep { a: 0, b: 0 }));
    assert_eq!(path.end(), Some(WarpingStep { a: 8, b: 4 }));
}
