//! CSV series loading and JSON distance-profile artifacts for nearmiss.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::{ColumnSelector, ExperimentName, LoadedSeries};
pub use error::IoError;
pub use reader::SeriesReader;
pub use writer::{ResultWriter, ScanMetadata};
