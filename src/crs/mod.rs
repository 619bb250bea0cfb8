//! Coordinate reference system lookup and reprojection to WGS84.
//!
//! CRS definitions are proj4 strings keyed by code (`EPSG:3857`, ...) and are
//! supplied through the [`CrsLookup`] trait, so callers can inject their own
//! table. [`CrsTable::with_defaults`] carries a small set of common codes.

pub mod lookup;
pub mod reproject;
pub mod transform;

pub use lookup::{CrsDefinition, CrsLookup, CrsTable, WGS84_CODE, normalize_code};
pub use reproject::{crs_code, reproject, try_reproject};
pub use transform::Wgs84Transformer;
