//! Distance profile type and length normalization.

use serde::Serialize;

/// Force a raw anchor-indexed score list to exactly `expected_len` entries.
///
/// Longer lists keep their first `expected_len` scores; shorter lists are
/// right-padded with `None`. Scores are reindexed by position: entry `i` is
/// the `i`-th anchor's score, not the score of the segment starting at `i`.
#[must_use]
pub fn normalize(raw: Vec<f64>, expected_len: usize) -> Vec<Option<f64>> {
    let mut values: Vec<Option<f64>> = raw.into_iter().take(expected_len).map(Some).collect();
    values.resize(expected_len, None);
    values
}

/// Near-miss distance profile of length `n - m + 1`.
///
/// Each entry is either a non-negative score (lower is more similar) or
/// `None`, the missing-value marker for positions past the last anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceProfile {
    values: Vec<Option<f64>>,
    stride: usize,
    computed: usize,
}

impl DistanceProfile {
    /// Normalize `raw` anchor scores to `expected_len` entries.
    #[must_use]
    pub fn from_raw(raw: Vec<f64>, expected_len: usize, stride: usize) -> Self {
        let computed = raw.len().min(expected_len);
        Self {
            values: normalize(raw, expected_len),
            stride,
            computed,
        }
    }

    /// Profile entries, `None` marking padded positions.
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Consume the profile and return its entries.
    #[must_use]
    pub fn into_values(self) -> Vec<Option<f64>> {
        self.values
    }

    /// Number of entries, always `max(0, n - m + 1)`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the query was longer than the series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Anchor stride `k` used by the scan. Entry `i` was scored at anchor `i * k`.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of leading entries holding a computed score.
    #[must_use]
    pub fn computed(&self) -> usize {
        self.computed
    }

    /// Score at position `i`, or `None` when padded or out of range.
    #[must_use]
    pub fn score(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied().flatten()
    }

    /// Entries as plain floats, padding mapped to NaN.
    #[must_use]
    pub fn to_nan_vec(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
    }

    /// Lowest computed score and its position. The earliest position wins ties.
    #[must_use]
    pub fn best(&self) -> Option<(usize, f64)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|s| (i, s)))
            .fold(None, |best, (i, s)| match best {
                Some((_, b)) if b <= s => best,
                _ => Some((i, s)),
            })
    }

    /// Positions whose score is at or below `threshold`, in profile order.
    ///
    /// Overlapping detections are not merged.
    #[must_use]
    pub fn positions_below(&self, threshold: f64) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.filter(|&s| s <= threshold).map(|_| i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_list_is_padded() {
        let values = normalize(vec![1.0, 2.0], 5);
        assert_eq!(values, vec![Some(1.0), Some(2.0), None, None, None]);
    }

    #[test]
    fn long_list_is_truncated() {
        let values = normalize(vec![1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(values, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn exact_list_is_unchanged() {
        assert_eq!(normalize(vec![0.5, 0.25], 2), vec![Some(0.5), Some(0.25)]);
        assert!(normalize(vec![], 0).is_empty());
        assert!(normalize(vec![3.0], 0).is_empty());
    }

    #[test]
    fn computed_counts_kept_scores() {
        let p = DistanceProfile::from_raw(vec![1.0, 2.0, 3.0], 2, 4);
        assert_eq!(p.computed(), 2);
        assert_eq!(p.stride(), 4);
        let p = DistanceProfile::from_raw(vec![1.0], 6, 16);
        assert_eq!(p.computed(), 1);
        assert_eq!(p.len(), 6);
    }

    #[test]
    fn nan_export_marks_padding() {
        let p = DistanceProfile::from_raw(vec![0.0, 1.5], 3, 2);
        let out = p.to_nan_vec();
        assert_eq!(&out[..2], &[0.0, 1.5]);
        assert!(out[2].is_nan());
        assert_eq!(p.score(2), None);
        assert_eq!(p.score(7), None);
        assert_eq!(p.score(1), Some(1.5));
    }

    #[test]
    fn best_prefers_earliest_minimum() {
        let p = DistanceProfile::from_raw(vec![3.0, 1.0, 4.0, 1.0], 6, 1);
        assert_eq!(p.best(), Some((1, 1.0)));
        let empty = DistanceProfile::from_raw(vec![], 0, 1);
        assert_eq!(empty.best(), None);
    }

    #[test]
    fn threshold_skips_padding() {
        let p = DistanceProfile::from_raw(vec![0.5, 2.0, 0.1], 5, 8);
        assert_eq!(p.positions_below(0.5), vec![0, 2]);
        assert!(p.positions_below(-1.0).is_empty());
    }
}
