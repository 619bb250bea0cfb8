//! Geohash cells for points, bounding boxes and polygons, with CRS
//! reprojection of GeoJSON into WGS84.
//!
//! ```rust
//! use geocells::{BoundingBox, Coordinate, Direction, Geocells, Polygon};
//!
//! let cells = Geocells::new();
//!
//! let hash = cells.encode(Coordinate::new(57.64911, 10.40744))?;
//! assert_eq!(hash, "u4pruy");
//! assert_eq!(cells.neighbor(&hash, Direction::N)?, "u4pruz");
//!
//! let bbox = BoundingBox::new(57.6, 10.3, 57.7, 10.5);
//! let covering = cells.bbox_hashes_with_precision(&bbox, 5)?;
//! assert!(covering.contains("u4pru"));
//!
//! let triangle = Polygon::from_lon_lat_pairs(&[[10.2, 56.6], [10.6, 56.6], [10.4, 57.2]]);
//! assert_eq!(cells.polygon_hashes_with_precision(&triangle, 3)?.len(), 1);
//! # Ok::<(), geocells::GeocellError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod crs;
pub mod error;
pub mod geocells;
pub mod geohash;
pub mod index;

pub use builder::GeocellsBuilder;
pub use config::Config;
pub use error::{GeocellError, Result};
pub use crate::geocells::Geocells;

pub use geocells_types::{BoundingBox, Coordinate, Direction, ParseDirectionError, Polygon};

pub use crate::geohash::{
    Decoded, GeohashInput, Neighbors, decode, decode_bbox, decode_with_error, encode, neighbor,
    neighbors,
};
pub use compute::validation::MAX_PRECISION;
pub use compute::{centroid, geometry_hashes, hashes_to_feature_collection, polygons_from_geometry};
pub use crs::{CrsDefinition, CrsLookup, CrsTable, reproject, try_reproject};
pub use index::{EnumerateOptions, GeohashSet, bbox_hashes, polygon_hashes};
#[cfg(feature = "async")]
pub use index::{PolygonHashTask, polygon_hashes_async, spawn_polygon_hashes};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, Geocells, GeocellsBuilder, GeocellError, Result};

    pub use crate::{BoundingBox, Coordinate, Direction, Polygon};

    pub use crate::geohash::{decode, decode_bbox, encode, neighbor, neighbors};

    pub use crate::index::{EnumerateOptions, GeohashSet, bbox_hashes, polygon_hashes};

    pub use crate::crs::{CrsLookup, CrsTable, reproject};

    #[cfg(feature = "async")]
    pub use crate::index::{PolygonHashTask, spawn_polygon_hashes};
}
