//! Band constraint for exact DTW.

use std::ops::Range;

/// Constraint on the exact DTW warping window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BandConstraint {
    /// No constraint, the full cost matrix is computed.
    #[default]
    Unconstrained,

    /// Sakoe-Chiba band: cell (i,j) is valid only if |i - j| <= radius.
    SakoeChibaRadius(usize),
}

impl BandConstraint {
    /// Build a constraint from a radius where zero means unconstrained.
    #[must_use]
    pub fn from_radius(radius: usize) -> Self {
        if radius == 0 {
            Self::Unconstrained
        } else {
            Self::SakoeChibaRadius(radius)
        }
    }

    /// Widen a Sakoe-Chiba band so the end cell `(n-1, m-1)` lies inside it.
    ///
    /// Series of unequal length need a radius of at least `|n - m|`, otherwise
    /// the last row's band never reaches the last column.
    #[must_use]
    pub fn covering(self, n: usize, m: usize) -> Self {
        match self {
            Self::Unconstrained => Self::Unconstrained,
            Self::SakoeChibaRadius(r) => Self::SakoeChibaRadius(r.max(n.abs_diff(m))),
        }
    }

    /// Return the valid column range for a given row in the cost matrix.
    #[must_use]
    pub fn column_range(&self, row: usize, n_cols: usize) -> Range<usize> {
        match self {
            Self::Unconstrained => 0..n_cols,
            Self::SakoeChibaRadius(r) => {
                let start = row.saturating_sub(*r);
                let end = (row + r + 1).min(n_cols);
                start..end
            }
        }
    }

    /// Return the maximum band width for `m` columns.
    #[must_use]
    pub fn band_width(&self, m: usize) -> usize {
        match self {
            Self::Unconstrained => m,
            Self::SakoeChibaRadius(r) => (2 * r + 1).min(m),
        }
    }
}
