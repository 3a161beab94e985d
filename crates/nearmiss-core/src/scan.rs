//! Anchor scan shared by the fixed-length and variable-length profiles.

use std::ops::RangeInclusive;

use nearmiss_dtw::TimeSeriesView;
use rayon::prelude::*;
use tracing::debug;

use crate::error::ProfileError;
use crate::oracle::AlignmentOracle;
use crate::penalty::weighted_mean_gap;
use crate::profile::DistanceProfile;
use crate::stride::determine_k;

/// Candidate segment lengths tried at each anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Candidates {
    /// Exactly the query length.
    FixedLength,
    /// Every length in `[m - half_width, m + half_width]`, ascending.
    VariableLengthWindow { half_width: usize },
}

impl Candidates {
    fn lengths(self, m: usize) -> RangeInclusive<usize> {
        match self {
            Self::FixedLength => m..=m,
            Self::VariableLengthWindow { half_width } => (m - half_width)..=(m + half_width),
        }
    }
}

/// Score anchors `0, k, 2k, ...` up to `n - m` and normalize to `n - m + 1` entries.
///
/// Results are collected in anchor order whether or not the scan runs in
/// parallel. The first oracle failure aborts the whole scan.
pub(crate) fn scan<O>(
    series: TimeSeriesView<'_>,
    query: TimeSeriesView<'_>,
    candidates: Candidates,
    radius: usize,
    parallel: bool,
    oracle: &O,
) -> Result<DistanceProfile, ProfileError>
where
    O: AlignmentOracle + ?Sized,
{
    let n = series.len();
    let m = query.len();
    let k = determine_k(n, m)?;
    let expected_len = (n + 1).saturating_sub(m);

    if expected_len == 0 {
        debug!(n, m, k, "query longer than series, empty profile");
        return Ok(DistanceProfile::from_raw(Vec::new(), 0, k));
    }

    let anchors: Vec<usize> = (0..expected_len).step_by(k).collect();
    debug!(k, anchors = anchors.len(), ?candidates, radius, "scanning anchors");

    let query_mean = query.mean();
    let score = |&start: &usize| {
        score_anchor(series, query, query_mean, start, candidates, radius, oracle)
    };
    let raw: Vec<f64> = if parallel {
        anchors.par_iter().map(score).collect::<Result<_, _>>()?
    } else {
        anchors.iter().map(score).collect::<Result<_, _>>()?
    };

    let profile = DistanceProfile::from_raw(raw, expected_len, k);
    debug!(
        computed = profile.computed(),
        padded = profile.len() - profile.computed(),
        "profile normalized"
    );
    Ok(profile)
}

/// Lowest `alignment + scale penalty` over the candidate lengths that fit at `start`.
///
/// Lengths are tried in ascending order and a later candidate replaces the
/// current best only when strictly lower.
fn score_anchor<O>(
    series: TimeSeriesView<'_>,
    query: TimeSeriesView<'_>,
    query_mean: f64,
    start: usize,
    candidates: Candidates,
    radius: usize,
    oracle: &O,
) -> Result<f64, ProfileError>
where
    O: AlignmentOracle + ?Sized,
{
    let mut best = f64::INFINITY;
    for len in candidates.lengths(query.len()) {
        let Some(segment) = series.window(start, len) else {
            continue;
        };
        let distance = oracle
            .align(segment.as_slice(), query.as_slice(), radius)
            .map_err(|source| ProfileError::Alignment { start, len, source })?;
        let score = distance + weighted_mean_gap(segment.as_slice(), query_mean);
        if score < best {
            best = score;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use nearmiss_dtw::DtwError;

    use super::*;

    /// Records every call and returns the segment length as the distance.
    #[derive(Default)]
    struct LengthOracle {
        calls: Mutex<Vec<(usize, usize)>>,
    }

    impl AlignmentOracle for LengthOracle {
        fn align(&self, a: &[f64], _b: &[f64], radius: usize) -> Result<f64, DtwError> {
            self.calls.lock().unwrap().push((a.len(), radius));
            Ok(a.len() as f64)
        }
    }

    fn view(values: &[f64]) -> TimeSeriesView<'_> {
        TimeSeriesView::new(values).unwrap()
    }

    #[test]
    fn fixed_candidates_are_query_length() {
        assert_eq!(Candidates::FixedLength.lengths(5), 5..=5);
        assert_eq!(
            Candidates::VariableLengthWindow { half_width: 2 }.lengths(5),
            3..=7
        );
    }

    #[test]
    fn variable_window_skips_lengths_past_the_end() {
        let series = vec![0.0; 10];
        let query = vec![0.0; 4];
        let oracle = LengthOracle::default();
        let score = score_anchor(
            view(&series),
            view(&query),
            0.0,
            6,
            Candidates::VariableLengthWindow { half_width: 2 },
            1,
            &oracle,
        )
        .unwrap();
        // Lengths 2, 3, 4 fit at 6; 5 and 6 would overrun.
        assert_eq!(score, 2.0);
        let lens: Vec<usize> = oracle.calls.lock().unwrap().iter().map(|c| c.0).collect();
        assert_eq!(lens, vec![2, 3, 4]);
    }

    #[test]
    fn anchors_follow_stride_in_order() {
        // n = 40, m = 2 -> k = 8, anchors 0, 8, 16, 24, 32
        let series: Vec<f64> = (0..40).map(f64::from).collect();
        let query = [0.0, 1.0];
        let oracle = LengthOracle::default();
        let profile = scan(
            view(&series),
            view(&query),
            Candidates::FixedLength,
            3,
            false,
            &oracle,
        )
        .unwrap();
        assert_eq!(profile.stride(), 8);
        assert_eq!(profile.len(), 39);
        assert_eq!(profile.computed(), 5);
        // distance 2 + penalty 2 * |(start + 0.5) - 0.5|
        for (i, start) in [0usize, 8, 16, 24, 32].iter().enumerate() {
            let expected = 2.0 + 2.0 * *start as f64;
            assert!((profile.score(i).unwrap() - expected).abs() < 1e-9);
        }
        assert_eq!(profile.score(5), None);
        assert!(oracle.calls.lock().unwrap().iter().all(|&(_, r)| r == 3));
    }

    #[test]
    fn parallel_matches_sequential() {
        let series: Vec<f64> = (0..300).map(|i| (i as f64 * 0.13).sin() * 4.0).collect();
        let query: Vec<f64> = (0..6).map(|i| (i as f64 * 0.4).cos()).collect();
        let oracle = crate::oracle::FastDtwOracle;
        let candidates = Candidates::VariableLengthWindow { half_width: 3 };
        let seq = scan(view(&series), view(&query), candidates, 1, false, &oracle).unwrap();
        let par = scan(view(&series), view(&query), candidates, 1, true, &oracle).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn oracle_failure_aborts_scan() {
        struct Failing;
        impl AlignmentOracle for Failing {
            fn align(&self, _a: &[f64], _b: &[f64], _radius: usize) -> Result<f64, DtwError> {
                Err(DtwError::NonFiniteValue { index: 0 })
            }
        }
        let series = vec![1.0; 20];
        let query = vec![1.0; 3];
        let err = scan(view(&series), view(&query), Candidates::FixedLength, 3, false, &Failing)
            .unwrap_err();
        assert_eq!(
            err,
            ProfileError::Alignment {
                start: 0,
                len: 3,
                source: DtwError::NonFiniteValue { index: 0 },
            }
        );
    }
}
