//! Error types for distance-profile construction.

use nearmiss_dtw::DtwError;

/// Errors from building a near-miss distance profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    /// Returned when the long series is empty or contains a non-finite value.
    #[error("invalid series: {0}")]
    InvalidSeries(#[source] DtwError),

    /// Returned when the query is empty or contains a non-finite value.
    #[error("invalid query: {0}")]
    InvalidQuery(#[source] DtwError),

    /// Returned by stride selection when either length is zero.
    #[error("series length {n} and query length {m} must both be positive")]
    InvalidLength {
        /// Series length.
        n: usize,
        /// Query length.
        m: usize,
    },

    /// Returned when a scale penalty is requested for an empty segment.
    #[error("cannot compute scale penalty of an empty segment")]
    EmptySegment,

    /// Returned when a scale penalty is requested against an empty query.
    #[error("cannot compute scale penalty against an empty query")]
    EmptyQuery,

    /// Returned when a [`ProfileConfig`](crate::ProfileConfig) field is out of range.
    #[error("invalid profile configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the offending field.
        reason: String,
    },

    /// Wraps a failure from the alignment oracle. The scan stops at the first one.
    #[error("alignment failed for segment at {start} of length {len}")]
    Alignment {
        /// Anchor index of the segment.
        start: usize,
        /// Candidate segment length.
        len: usize,
        /// Underlying oracle error.
        #[source]
        source: DtwError,
    },
}
