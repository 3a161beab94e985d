//! Time series types with validation guarantees.

use std::ops::Index;

use crate::error::DtwError;

fn validate(values: &[f64]) -> Result<(), DtwError> {
    if values.is_empty() {
        return Err(DtwError::EmptySeries);
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(DtwError::NonFiniteValue { index });
    }
    Ok(())
}

/// Owned, validated time series. Guaranteed non-empty with all finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries(Vec<f64>);

impl TimeSeries {
    /// Create a new time series, validating that it is non-empty and all values are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `values` is empty |
    /// | [`DtwError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(values: Vec<f64>) -> Result<Self, DtwError> {
        validate(&values)?;
        Ok(Self(values))
    }

    /// Borrow this series as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> TimeSeriesView<'_> {
        TimeSeriesView(&self.0)
    }

    /// Return the number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed series; present for the `len_without_is_empty` lint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Arithmetic mean of the values.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.as_view().mean()
    }

    /// Consume and return the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for TimeSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for TimeSeries {
    type Error = DtwError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

/// Borrowed, validated view into a time series.
///
/// Sub-ranges taken with [`TimeSeriesView::window`] stay validated, so anchor
/// scans can slice segments without re-checking every value.
#[derive(Debug, Clone, Copy)]
pub struct TimeSeriesView<'a>(&'a [f64]);

impl<'a> TimeSeriesView<'a> {
    /// Create a new view, validating that the slice is non-empty and all values are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `slice` is empty |
    /// | [`DtwError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(slice: &'a [f64]) -> Result<Self, DtwError> {
        validate(slice)?;
        Ok(Self(slice))
    }

    /// Return the non-empty sub-view `[start, start + len)`, or `None` if it
    /// would be empty or run past the end.
    #[must_use]
    pub fn window(&self, start: usize, len: usize) -> Option<TimeSeriesView<'a>> {
        if len == 0 {
            return None;
        }
        let end = start.checked_add(len)?;
        self.0.get(start..end).map(TimeSeriesView)
    }

    /// Return the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [f64] {
        self.0
    }

    /// Return the number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed view; present for the `len_without_is_empty` lint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Arithmetic mean of the values.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.0.iter().sum::<f64>() / self.0.len() as f64
    }
}

impl Index<usize> for TimeSeriesView<'_> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl AsRef<[f64]> for TimeSeriesView<'_> {
    fn as_ref(&self) -> &[f64] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_vec() {
        assert_eq!(TimeSeries::new(vec![]), Err(DtwError::EmptySeries));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(
            TimeSeries::new(vec![1.0, f64::NAN, 3.0]),
            Err(DtwError::NonFiniteValue { index: 1 })
        );
        assert_eq!(
            TimeSeries::new(vec![f64::NEG_INFINITY, 2.0]),
            Err(DtwError::NonFiniteValue { index: 0 })
        );
        let data = [0.0, 1.0, f64::INFINITY];
        assert!(matches!(
            TimeSeriesView::new(&data),
            Err(DtwError::NonFiniteValue { index: 2 })
        ));
    }

    #[test]
    fn view_rejects_empty() {
        assert!(matches!(TimeSeriesView::new(&[]), Err(DtwError::EmptySeries)));
    }

    #[test]
    fn mean_of_trip_readings() {
        let ts = TimeSeries::new(vec![2.0, 4.0, 6.0, 8.0]).unwrap();
        assert!((ts.mean() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn window_slices_inside_bounds() {
        let data = [0.0, 1.0, 2.0, 3.0, 4.0];
        let view = TimeSeriesView::new(&data).unwrap();
        let seg = view.window(1, 3).unwrap();
        assert_eq!(seg.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(seg[0], 1.0);
    }

    #[test]
    fn window_rejects_empty_or_overrun() {
        let data = [0.0, 1.0, 2.0];
        let view = TimeSeriesView::new(&data).unwrap();
        assert!(view.window(0, 0).is_none());
        assert!(view.window(2, 2).is_none());
        assert!(view.window(usize::MAX, 2).is_none());
        assert!(view.window(0, 3).is_some());
    }

    #[test]
    fn try_from_vec() {
        let ts: Result<TimeSeries, _> = vec![1.0, 2.0].try_into();
        assert_eq!(ts.unwrap().into_inner(), vec![1.0, 2.0]);
    }
}
