//! Alignment distances for near-miss scanning.
//!
//! Pure math library, zero I/O. Provides validated series types, exact
//! Dynamic Time Warping with an optional Sakoe-Chiba band, and FastDTW, the
//! multi-resolution approximation whose radius trades accuracy for speed.

mod constraint;
mod distance;
mod dtw;
mod error;
mod fastdtw;
mod path;
mod series;
mod window;

pub use constraint::BandConstraint;
pub use distance::DtwDistance;
pub use dtw::Dtw;
pub use error::DtwError;
pub use fastdtw::FastDtw;
pub use path::{WarpingPath, WarpingStep};
pub use series::{TimeSeries, TimeSeriesView};
pub use window::SearchWindow;
