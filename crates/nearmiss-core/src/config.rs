//! Configuration for distance-profile construction.

use std::fmt;
use std::str::FromStr;

use nearmiss_dtw::TimeSeriesView;
use tracing::instrument;

use crate::error::ProfileError;
use crate::oracle::AlignmentOracle;
use crate::profile::DistanceProfile;
use crate::scan::{Candidates, scan};

/// How candidate segments are generated at each anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// One segment of exactly the query length per anchor.
    #[default]
    FixedLength,
    /// Every length in `[m - h, m + h]` per anchor, keeping the lowest score.
    /// Tolerates the pattern occurring faster or slower than the query.
    VariableLength,
}

impl ScanMode {
    /// Stable lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FixedLength => "fixed",
            Self::VariableLength => "variable",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::FixedLength),
            "variable" => Ok(Self::VariableLength),
            other => Err(format!("unknown scan mode: {other} (expected fixed or variable)")),
        }
    }
}

/// Configuration for a near-miss scan.
///
/// Construct via [`ProfileConfig::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter                | Default                   |
/// |--------------------------|---------------------------|
/// | `mode`                   | `ScanMode::FixedLength`   |
/// | `radius`                 | 3                         |
/// | `length_window_fraction` | 0.5                       |
/// | `parallel`               | true                      |
///
/// The radius reaches the oracle in fixed-length mode only. Variable-length
/// scans call the oracle with [`AlignmentOracle::default_radius`], whatever
/// radius is configured here.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileConfig {
    pub(crate) mode: ScanMode,
    pub(crate) radius: usize,
    pub(crate) length_window_fraction: f64,
    pub(crate) parallel: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileConfig {
    /// Create a fixed-length configuration with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: ScanMode::FixedLength,
            radius: 3,
            length_window_fraction: 0.5,
            parallel: true,
        }
    }

    /// Set the candidate-generation mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the warping radius. Larger values are more accurate and slower.
    #[must_use]
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    /// Set the variable-length half-width as a fraction of the query length.
    ///
    /// The half-width is `floor(m * fraction)`. Must lie in `[0, 1)`, checked
    /// when the scan runs.
    #[must_use]
    pub fn with_length_window_fraction(mut self, fraction: f64) -> Self {
        self.length_window_fraction = fraction;
        self
    }

    /// Score anchors on the rayon pool (`true`) or on the calling thread.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Return the candidate-generation mode.
    #[must_use]
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Return the configured warping radius.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Return the variable-length half-width fraction.
    #[must_use]
    pub fn length_window_fraction(&self) -> f64 {
        self.length_window_fraction
    }

    /// Return whether anchors are scored in parallel.
    #[must_use]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Check the configuration without running a scan.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidConfig`] when `length_window_fraction`
    /// is not a finite value in `[0, 1)`.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let f = self.length_window_fraction;
        if !f.is_finite() || !(0.0..1.0).contains(&f) {
            return Err(ProfileError::InvalidConfig {
                reason: format!("length_window_fraction must be in [0, 1), got {f}"),
            });
        }
        Ok(())
    }

    /// Resolve the candidate strategy for a query of length `m`.
    pub(crate) fn candidates(&self, m: usize) -> Candidates {
        match self.mode {
            ScanMode::FixedLength => Candidates::FixedLength,
            ScanMode::VariableLength => Candidates::VariableLengthWindow {
                half_width: (m as f64 * self.length_window_fraction).floor() as usize,
            },
        }
    }

    /// Build the distance profile of `query` against `series`.
    ///
    /// The profile has exactly `max(0, n - m + 1)` entries. A query longer
    /// than the series yields an empty profile without calling the oracle.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ProfileError::InvalidConfig`] | Configuration fails [`validate`](Self::validate) |
    /// | [`ProfileError::InvalidSeries`] | `series` is empty or non-finite |
    /// | [`ProfileError::InvalidQuery`] | `query` is empty or non-finite |
    /// | [`ProfileError::Alignment`] | The oracle fails on any candidate |
    #[instrument(skip_all, fields(n = series.len(), m = query.len(), mode = %self.mode))]
    pub fn compute<O>(
        &self,
        series: &[f64],
        query: &[f64],
        oracle: &O,
    ) -> Result<DistanceProfile, ProfileError>
    where
        O: AlignmentOracle + ?Sized,
    {
        self.validate()?;
        let series = TimeSeriesView::new(series).map_err(ProfileError::InvalidSeries)?;
        let query = TimeSeriesView::new(query).map_err(ProfileError::InvalidQuery)?;

        let radius = match self.mode {
            ScanMode::FixedLength => self.radius,
            ScanMode::VariableLength => oracle.default_radius(),
        };
        scan(
            series,
            query,
            self.candidates(query.len()),
            radius,
            self.parallel,
            oracle,
        )
    }
}
