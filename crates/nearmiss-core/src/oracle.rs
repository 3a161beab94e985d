//! Alignment oracle seam between the anchor scan and the warping distance.

use std::fmt;
use std::str::FromStr;

use nearmiss_dtw::{Dtw, DtwError, FastDtw, TimeSeriesView};

/// Radius an oracle uses when the caller does not forward one.
pub const DEFAULT_ORACLE_RADIUS: usize = FastDtw::DEFAULT_RADIUS;

/// A warping-tolerant distance between two numeric sequences.
///
/// Implementations must accept sequences of unequal length, return a finite
/// non-negative value for non-empty finite inputs, and be deterministic and
/// free of side effects, since anchors may be scored concurrently.
pub trait AlignmentOracle: Send + Sync {
    /// Distance between `a` and `b` with warping neighbourhood `radius`.
    ///
    /// # Errors
    ///
    /// Returns a [`DtwError`] when either input is empty or non-finite.
    fn align(&self, a: &[f64], b: &[f64], radius: usize) -> Result<f64, DtwError>;

    /// Radius used when the caller relies on the oracle's own default.
    fn default_radius(&self) -> usize {
        DEFAULT_ORACLE_RADIUS
    }
}

/// [`FastDtw`] with the radius chosen per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastDtwOracle;

impl AlignmentOracle for FastDtwOracle {
    fn align(&self, a: &[f64], b: &[f64], radius: usize) -> Result<f64, DtwError> {
        let a = TimeSeriesView::new(a)?;
        let b = TimeSeriesView::new(b)?;
        Ok(FastDtw::new(radius).distance(a, b).value())
    }
}

/// Exact [`Dtw`] inside a Sakoe-Chiba band of the given radius.
///
/// Radius 0 means unconstrained. The band is widened to the length gap of the
/// two inputs, so unequal lengths always align.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandedDtwOracle;

impl AlignmentOracle for BandedDtwOracle {
    fn align(&self, a: &[f64], b: &[f64], radius: usize) -> Result<f64, DtwError> {
        let a = TimeSeriesView::new(a)?;
        let b = TimeSeriesView::new(b)?;
        let dtw = if radius == 0 {
            Dtw::unconstrained()
        } else {
            Dtw::with_sakoe_chiba(radius)
        };
        Ok(dtw.distance(a, b).value())
    }
}

/// Built-in oracle selection, usable directly as an oracle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OracleKind {
    /// Multi-resolution approximate DTW, absolute local cost.
    #[default]
    FastDtw,
    /// Exact DTW in a Sakoe-Chiba band, squared local cost.
    BandedDtw,
}

impl OracleKind {
    /// Stable lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FastDtw => "fast",
            Self::BandedDtw => "banded",
        }
    }
}

impl AlignmentOracle for OracleKind {
    fn align(&self, a: &[f64], b: &[f64], radius: usize) -> Result<f64, DtwError> {
        match self {
            Self::FastDtw => FastDtwOracle.align(a, b, radius),
            Self::BandedDtw => BandedDtwOracle.align(a, b, radius),
        }
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OracleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(Self::FastDtw),
            "banded" => Ok(Self::BandedDtw),
            other => Err(format!("unknown oracle: {other} (expected fast or banded)")),
        }
    }
}
