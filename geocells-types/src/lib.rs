//! # geocells-types
//!
//! Value types shared by the geocells indexing library.
//!
//! - **Coordinate**: a latitude/longitude pair in WGS84 degrees
//! - **BoundingBox**: an axis-aligned lat/lon rectangle (no antimeridian wrap)
//! - **Polygon**: a simple ring of coordinates, implicitly closed
//! - **Direction**: the eight compass directions used for geohash adjacency
//!
//! All types are serializable with Serde and convert to and from the `geo`
//! crate's primitives (`x` is longitude, `y` is latitude).
//!
//! ## Examples
//!
//! ```rust
//! use geocells_types::bbox::BoundingBox;
//! use geocells_types::coordinate::Coordinate;
//!
//! let aalborg = Coordinate::new(57.64911, 10.40744);
//! let jutland = BoundingBox::new(54.5, 8.0, 57.8, 11.0);
//! assert!(jutland.contains(&aalborg));
//! ```

pub mod bbox;
pub mod coordinate;
pub mod direction;
pub mod polygon;

pub use bbox::BoundingBox;
pub use coordinate::Coordinate;
pub use direction::{Direction, ParseDirectionError};
pub use polygon::Polygon;
