//! Validation, planar geometry, and GeoJSON conversion shared by the indexers.

pub mod algorithms;
pub mod geojson;
pub mod validation;

pub use self::geojson::{
    geometry_hashes, geometry_hashes_with, hashes_to_feature_collection, polygons_from_geo,
    polygons_from_geometry,
};
pub use algorithms::{bbox_touches_polygon, centroid, point_in_polygon, segment_intersects_bbox};
