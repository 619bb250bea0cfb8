//! Enumeration of geohash cells covering bounding boxes and polygons.

pub mod bbox;
pub mod polygon;
#[cfg(feature = "async")]
pub mod task;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Unordered, duplicate-free set of geohash strings.
pub type GeohashSet = FxHashSet<String>;

/// Limits applied while enumerating cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerateOptions {
    /// Fail with `CellLimitExceeded` once more than this many cells are
    /// produced. `None` means unlimited.
    pub max_cells: Option<usize>,
}

impl EnumerateOptions {
    pub fn with_max_cells(max_cells: usize) -> Self {
        Self {
            max_cells: Some(max_cells),
        }
    }
}

pub use bbox::{bbox_hashes, bbox_hashes_with};
pub use polygon::{
    multi_polygon_hashes, multi_polygon_hashes_with, polygon_hashes, polygon_hashes_cancellable,
    polygon_hashes_with,
};
#[cfg(feature = "async")]
pub use task::{PolygonHashTask, polygon_hashes_async, spawn_polygon_hashes};
