//! Exact DTW distance computation.

use tracing::instrument;

use crate::constraint::BandConstraint;
use crate::distance::DtwDistance;
use crate::series::TimeSeriesView;

/// Exact Dynamic Time Warping with squared local cost.
///
/// The distance is the square root of the minimum accumulated squared
/// difference along a warping path. Immutable, thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dtw {
    constraint: BandConstraint,
}

impl Dtw {
    /// Create an unconstrained DTW calculator.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self {
            constraint: BandConstraint::Unconstrained,
        }
    }

    /// Create a DTW calculator with a Sakoe-Chiba band constraint.
    #[must_use]
    pub fn with_sakoe_chiba(radius: usize) -> Self {
        Self {
            constraint: BandConstraint::SakoeChibaRadius(radius),
        }
    }

    /// Return the band constraint configuration.
    #[must_use]
    pub fn constraint(&self) -> BandConstraint {
        self.constraint
    }

    /// Compute the DTW distance between two series, which may differ in length.
    ///
    /// A Sakoe-Chiba band is widened to `|a.len() - b.len()|` when narrower, so
    /// the end cell is always reachable and the result is finite. Runs in
    /// O(n * bw) time and O(bw) space using a rolling two-row buffer.
    #[must_use]
    #[instrument(level = "trace", skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance(&self, a: TimeSeriesView<'_>, b: TimeSeriesView<'_>) -> DtwDistance {
        let constraint = self.constraint.covering(a.len(), b.len());
        DtwDistance::new(rolling_distance(constraint, a.as_slice(), b.as_slice()))
    }
}

/// Rolling two-row DTW.
///
/// Each row buffer has `bw + 2` slots. Slot 0 and slot `bw + 1` are INF
/// sentinels; active columns occupy `1..=bw`, with column `j` of row `i` at
/// `j - column_range(i).start + 1`. Out-of-band predecessors read INF.
fn rolling_distance(constraint: BandConstraint, a: &[f64], b: &[f64]) -> f64 {
    let n = a.len();
    let m = b.len();

    let buf_width = constraint.band_width(m) + 2;
    let mut prev = vec![f64::INFINITY; buf_width];
    let mut curr = vec![f64::INFINITY; buf_width];
    let mut prev_start = 0usize;

    for (i, &ai) in a.iter().enumerate() {
        curr.fill(f64::INFINITY);
        let cols = constraint.column_range(i, m);
        let curr_start = cols.start;

        for j in cols {
            let cost = (ai - b[j]).powi(2);
            let cj = j - curr_start + 1;

            if i == 0 && j == 0 {
                curr[cj] = cost;
                continue;
            }

            let left = curr[cj - 1];
            let (above, diag) = if i > 0 {
                let read = |col: usize| {
                    col.checked_sub(prev_start)
                        .map(|p| p + 1)
                        .filter(|&p| p < buf_width)
                        .map_or(f64::INFINITY, |p| prev[p])
                };
                let diag = if j > 0 { read(j - 1) } else { f64::INFINITY };
                (read(j), diag)
            } else {
                (f64::INFINITY, f64::INFINITY)
            };

            curr[cj] = cost + left.min(above).min(diag);
        }

        prev_start = curr_start;
        std::mem::swap(&mut prev, &mut curr);
    }

    // `prev` holds the last completed row after the final swap.
    let last = constraint.column_range(n - 1, m);
    prev[(m - 1) - last.start + 1].sqrt()
}
