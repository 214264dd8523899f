//! Elevation sampling and land/water classification
//!
//! Provides the first pipeline stages: the elevation field, thresholding,
//! speck removal and region labeling.

mod classify;
mod elevation;
mod stats;

pub use classify::{
    classify, classify_all, label_regions, remove_specks, Classification, MIN_LAND_NEIGHBORS,
};
pub use elevation::{blend, radial_falloff, ElevationField};
pub use stats::ElevationStats;
