//! Near-miss distance profiles over long time series.
//!
//! A query pattern is compared against segments of a long series at anchors
//! spaced `k` apart. Each comparison adds a warping-tolerant alignment
//! distance to a length-weighted mean-mismatch penalty. Fixed-length scans
//! compare one segment of the query's length per anchor; variable-length
//! scans try a window of lengths around it and keep the best score.
//!
//! ```
//! use nearmiss_core::{near_miss, near_miss_variable};
//!
//! let trip: Vec<f64> = (0..10).map(f64::from).collect();
//! let pattern = [0.0, 1.0, 2.0];
//!
//! let fixed = near_miss(&trip, &pattern, 3).unwrap();
//! assert_eq!(fixed.len(), 8);
//! assert_eq!(fixed.score(0), Some(0.0));
//!
//! let variable = near_miss_variable(&trip, &pattern, 3).unwrap();
//! assert_eq!(variable.len(), 8);
//! ```

mod config;
mod error;
mod oracle;
mod penalty;
mod profile;
mod scan;
mod stride;

pub use config::{ProfileConfig, ScanMode};
pub use error::ProfileError;
pub use oracle::{AlignmentOracle, BandedDtwOracle, DEFAULT_ORACLE_RADIUS, FastDtwOracle, OracleKind};
pub use penalty::compute_scale_penalty;
pub use profile::{DistanceProfile, normalize};
pub use stride::determine_k;

/// Fixed-length near-miss profile using FastDTW with the given radius.
///
/// # Errors
///
/// See [`ProfileConfig::compute`].
pub fn near_miss(series: &[f64], query: &[f64], radius: usize) -> Result<DistanceProfile, ProfileError> {
    ProfileConfig::new()
        .with_radius(radius)
        .compute(series, query, &FastDtwOracle)
}

/// Variable-length near-miss profile using FastDTW.
///
/// `radius` is recorded in the configuration only. Every candidate is aligned
/// at [`AlignmentOracle::default_radius`].
///
/// # Errors
///
/// See [`ProfileConfig::compute`].
pub fn near_miss_variable(
    series: &[f64],
    query: &[f64],
    radius: usize,
) -> Result<DistanceProfile, ProfileError> {
    ProfileConfig::new()
        .with_mode(ScanMode::VariableLength)
        .with_radius(radius)
        .compute(series, query, &FastDtwOracle)
}
