//! Scale penalty for amplitude-level mismatch.

use crate::error::ProfileError;

/// Score the mean-level mismatch between a candidate segment and the query.
///
/// `penalty = len(segment) * |mean(segment) - mean(query)|`. Only the
/// segment's length weights the difference, so swapping the arguments changes
/// the result whenever the lengths differ.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ProfileError::EmptySegment`] | `segment` is empty |
/// | [`ProfileError::EmptyQuery`] | `query` is empty |
pub fn compute_scale_penalty(segment: &[f64], query: &[f64]) -> Result<f64, ProfileError> {
    if segment.is_empty() {
        return Err(ProfileError::EmptySegment);
    }
    if query.is_empty() {
        return Err(ProfileError::EmptyQuery);
    }
    Ok(weighted_mean_gap(segment, mean(query)))
}

/// Penalty against a precomputed query mean. Callers guarantee `segment` is non-empty.
pub(crate) fn weighted_mean_gap(segment: &[f64], query_mean: f64) -> f64 {
    segment.len() as f64 * (mean(segment) - query_mean).abs()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
