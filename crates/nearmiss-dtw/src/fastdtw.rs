//! FastDTW: linear-time approximate DTW by multi-resolution refinement.
//!
//! The series are repeatedly halved by averaging adjacent pairs until they are
//! short enough for a full DTW pass. The path found at each resolution is
//! projected one level up and widened by the radius, and DTW is re-run inside
//! that window only. Local cost is `|a_i - b_j|` and the distance is the plain
//! sum along the path.

use tracing::instrument;

use crate::distance::DtwDistance;
use crate::path::{WarpingPath, WarpingStep};
use crate::series::TimeSeriesView;
use crate::window::SearchWindow;

/// FastDTW calculator. Immutable, thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastDtw {
    radius: usize,
}

impl Default for FastDtw {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RADIUS)
    }
}

impl FastDtw {
    /// Radius used when none is given.
    pub const DEFAULT_RADIUS: usize = 1;

    /// Create a calculator that widens each projected path by `radius` cells.
    ///
    /// Larger radii are more accurate and cost more; once the radius reaches
    /// the series length the result is exact DTW.
    #[must_use]
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }

    /// Return the neighbourhood radius.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Compute the approximate DTW distance between two series of any lengths.
    #[must_use]
    #[instrument(level = "trace", skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance(&self, a: TimeSeriesView<'_>, b: TimeSeriesView<'_>) -> DtwDistance {
        let (dist, _) = refine(a.as_slice(), b.as_slice(), self.radius);
        DtwDistance::new(dist)
    }

    /// Compute the approximate DTW distance and the warping path realising it.
    #[must_use]
    #[instrument(level = "trace", skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance_and_path(
        &self,
        a: TimeSeriesView<'_>,
        b: TimeSeriesView<'_>,
    ) -> (DtwDistance, WarpingPath) {
        let (dist, steps) = refine(a.as_slice(), b.as_slice(), self.radius);
        (DtwDistance::new(dist), WarpingPath::new(steps))
    }
}

fn refine(a: &[f64], b: &[f64], radius: usize) -> (f64, Vec<WarpingStep>) {
    let min_len = radius + 2;
    if a.len() < min_len || b.len() < min_len {
        return windowed_dtw(a, b, &SearchWindow::full(a.len(), b.len()));
    }

    let a_half = halve(a);
    let b_half = halve(b);
    let (_, coarse_path) = refine(&a_half, &b_half, radius);
    let window = SearchWindow::project(&coarse_path, a.len(), b.len(), radius);
    windowed_dtw(a, b, &window)
}

/// Average adjacent pairs; a trailing odd element is dropped.
fn halve(x: &[f64]) -> Vec<f64> {
    x.chunks_exact(2).map(|p| (p[0] + p[1]) / 2.0).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Start,
    Up,
    Left,
    Diagonal,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    cost: f64,
    from: Move,
}

/// DTW restricted to `window`. Predecessors are tried in the order
/// up `(i-1, j)`, left `(i, j-1)`, diagonal `(i-1, j-1)`; the first minimum wins.
fn windowed_dtw(a: &[f64], b: &[f64], window: &SearchWindow) -> (f64, Vec<WarpingStep>) {
    let n = a.len();
    let m = b.len();
    let unreached = Cell {
        cost: f64::INFINITY,
        from: Move::Start,
    };

    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(n);
    for (i, &ai) in a.iter().enumerate() {
        let span = window.span(i);
        let mut row = vec![unreached; span.len()];
        let above = i.checked_sub(1).map(|p| (&rows[p], window.span(p)));
        let lookup = |j: usize| match &above {
            Some((prev, prev_span)) if prev_span.contains(&j) => prev[j - prev_span.start].cost,
            _ => f64::INFINITY,
        };

        for j in span.clone() {
            let local = (ai - b[j]).abs();
            let k = j - span.start;
            if i == 0 && j == 0 {
                row[k] = Cell {
                    cost: local,
                    from: Move::Start,
                };
                continue;
            }

            let mut best = (lookup(j), Move::Up);
            let left = if k > 0 { row[k - 1].cost } else { f64::INFINITY };
            if left < best.0 {
                best = (left, Move::Left);
            }
            let diag = if j > 0 { lookup(j - 1) } else { f64::INFINITY };
            if diag < best.0 {
                best = (diag, Move::Diagonal);
            }
            row[k] = Cell {
                cost: local + best.0,
                from: best.1,
            };
        }
        rows.push(row);
    }

    let cell_at = |i: usize, j: usize| rows[i][j - window.span(i).start];
    let dist = cell_at(n - 1, m - 1).cost;

    let mut steps = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n - 1, m - 1);
    loop {
        steps.push(WarpingStep { a: i, b: j });
        match cell_at(i, j).from {
            Move::Start => break,
            Move::Up => i -= 1,
            Move::Left => j -= 1,
            Move::Diagonal => {
                i -= 1;
                j -= 1;
            }
        }
    }
    steps.reverse();

    (dist, steps)
}
