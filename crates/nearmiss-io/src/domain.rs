//! Domain types for nearmiss-io.

use std::fmt;

use crate::IoError;

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which CSV column holds the series values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnSelector {
    /// The first column of the header.
    #[default]
    First,
    /// The column whose header matches exactly.
    Named(String),
}

impl ColumnSelector {
    /// Select by name, or the first column when `name` is `None`.
    #[must_use]
    pub fn from_option(name: Option<String>) -> Self {
        name.map_or(Self::First, Self::Named)
    }
}

/// A single series loaded from CSV, with the column it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSeries {
    /// Header name of the source column.
    pub column: String,
    /// Finite values in row order.
    pub values: Vec<f64>,
}

impl LoadedSeries {
    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a successfully loaded series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
