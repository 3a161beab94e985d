//! Per-row column spans that restrict a windowed DTW pass.

use std::ops::Range;

use crate::path::WarpingStep;

/// Set of admissible cost-matrix cells, stored as one contiguous column span per row.
///
/// Spans are non-empty, their starts never decrease from one row to the next,
/// the first row starts at column 0 and the last row ends at the last column,
/// so a monotone path from `(0, 0)` to `(n-1, m-1)` always exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchWindow {
    cols: usize,
    spans: Vec<Range<usize>>,
}

impl SearchWindow {
    /// Every cell of an `rows x cols` matrix.
    #[must_use]
    pub fn full(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            spans: vec![0..cols; rows],
        }
    }

    /// Project a warping path found on half-resolution series back to full
    /// resolution, widened by `radius` coarse cells in every direction.
    ///
    /// Coarse cell `(i, j)` covers fine cells `(2i..=2i+1, 2j..=2j+1)`. A fine
    /// row or column left over by an odd length maps to the coarse index one
    /// past the end; when the radius is zero nothing reaches it, so the last
    /// coarse row's span is reused for the row and the final row is stretched
    /// to the last column.
    #[must_use]
    pub fn project(coarse_path: &[WarpingStep], rows: usize, cols: usize, radius: usize) -> Self {
        let coarse_rows = rows / 2;
        // One slot past the coarse matrix for the odd tail row.
        let mut lo = vec![usize::MAX; coarse_rows + 1];
        let mut hi = vec![0usize; coarse_rows + 1];

        for step in coarse_path {
            let first = step.a.saturating_sub(radius);
            let last = (step.a + radius).min(coarse_rows);
            for c in first..=last {
                lo[c] = lo[c].min(step.b.saturating_sub(radius));
                hi[c] = hi[c].max(step.b + radius);
            }
        }

        let mut spans = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut c = row / 2;
            if lo[c] == usize::MAX {
                c = c.saturating_sub(1);
            }
            let start = (2 * lo[c]).min(cols - 1);
            let end = (2 * hi[c] + 2).min(cols);
            spans.push(start..end.max(start + 1));
        }

        if let Some(first) = spans.first_mut() {
            first.start = 0;
        }
        if let Some(last) = spans.last_mut() {
            last.end = cols;
        }
        // Starts must not decrease; the reused tail span can otherwise sit left of its neighbour.
        for row in 1..rows {
            if spans[row].start < spans[row - 1].start {
                spans[row].start = spans[row - 1].start;
                spans[row].end = spans[row].end.max(spans[row].start + 1);
            }
        }

        Self { cols, spans }
    }

    /// Column span admitted for `row`.
    #[must_use]
    pub fn span(&self, row: usize) -> Range<usize> {
        self.spans[row].clone()
    }

    /// Number of rows covered.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.spans.len()
    }

    /// Number of columns in the underlying matrix.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of admissible cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.spans.iter().map(|s| s.len()).sum()
    }

    /// Whether cell `(row, col)` is admissible.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.spans.get(row).is_some_and(|s| s.contains(&col))
    }
}
