//! Validation for geographic inputs.

use crate::error::{GeocellError, Result};
use geocells_types::{BoundingBox, Coordinate, Polygon};

/// Longest supported geohash (60 bits, well inside f64 mantissa precision).
pub const MAX_PRECISION: usize = 12;

/// Validates a coordinate has finite, in-range latitude and longitude.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use geocells::compute::validation::validate_coordinate;
/// use geocells::Coordinate;
///
/// assert!(validate_coordinate(&Coordinate::new(40.7128, -74.0060)).is_ok());
/// assert!(validate_coordinate(&Coordinate::new(95.0, -74.0)).is_err());
/// assert!(validate_coordinate(&Coordinate::new(40.0, 200.0)).is_err());
/// ```
pub fn validate_coordinate(c: &Coordinate) -> Result<()> {
    if !c.lat.is_finite() {
        return Err(GeocellError::InvalidArgument(format!(
            "Latitude must be finite, got: {}",
            c.lat
        )));
    }

    if !c.lon.is_finite() {
        return Err(GeocellError::InvalidArgument(format!(
            "Longitude must be finite, got: {}",
            c.lon
        )));
    }

    if !(-90.0..=90.0).contains(&c.lat) {
        return Err(GeocellError::InvalidArgument(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            c.lat
        )));
    }

    if !(-180.0..=180.0).contains(&c.lon) {
        return Err(GeocellError::InvalidArgument(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            c.lon
        )));
    }

    Ok(())
}

/// Validates a geohash precision (character length), 1 to [`MAX_PRECISION`].
///
/// # Examples
///
/// ```
/// use geocells::compute::validation::validate_precision;
///
/// assert!(validate_precision(6).is_ok());
/// assert!(validate_precision(0).is_err());
/// assert!(validate_precision(13).is_err());
/// ```
pub fn validate_precision(precision: usize) -> Result<()> {
    if precision == 0 {
        return Err(GeocellError::InvalidArgument(
            "Precision must be positive, got: 0".to_string(),
        ));
    }
    if precision > MAX_PRECISION {
        return Err(GeocellError::InvalidArgument(format!(
            "Precision must be at most {}, got: {}",
            MAX_PRECISION, precision
        )));
    }
    Ok(())
}

/// Validates a bounding box.
///
/// Both corners must be valid coordinates and min <= max on each axis.
/// A zero-width or zero-height box is accepted.
///
/// # Examples
///
/// ```
/// use geocells::compute::validation::validate_bbox;
/// use geocells::BoundingBox;
///
/// assert!(validate_bbox(&BoundingBox::new(-10.0, -10.0, 10.0, 10.0)).is_ok());
/// assert!(validate_bbox(&BoundingBox::new(10.0, -10.0, -10.0, 10.0)).is_err()); // min > max
/// ```
pub fn validate_bbox(bbox: &BoundingBox) -> Result<()> {
    validate_coordinate(&bbox.south_west())
        .map_err(|e| GeocellError::InvalidArgument(format!("Bounding box minimum: {}", e)))?;
    validate_coordinate(&bbox.north_east())
        .map_err(|e| GeocellError::InvalidArgument(format!("Bounding box maximum: {}", e)))?;

    if bbox.min_lat > bbox.max_lat {
        return Err(GeocellError::InvalidArgument(format!(
            "min_lat ({}) must be <= max_lat ({})",
            bbox.min_lat, bbox.max_lat
        )));
    }
    if bbox.min_lon > bbox.max_lon {
        return Err(GeocellError::InvalidArgument(format!(
            "min_lon ({}) must be <= max_lon ({})",
            bbox.min_lon, bbox.max_lon
        )));
    }

    Ok(())
}

/// Validates a polygon ring.
///
/// Every vertex must be a valid coordinate, the ring needs at least three
/// distinct vertices, and they must not all lie on one line. Self-intersecting
/// rings are accepted.
///
/// # Examples
///
/// ```
/// use geocells::compute::validation::validate_polygon;
/// use geocells::Polygon;
///
/// let triangle = Polygon::from_lon_lat_pairs(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
/// assert!(validate_polygon(&triangle).is_ok());
///
/// let line = Polygon::from_lon_lat_pairs(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
/// assert!(validate_polygon(&line).is_err());
/// ```
pub fn validate_polygon(polygon: &Polygon) -> Result<()> {
    for (idx, vertex) in polygon.vertices().iter().enumerate() {
        validate_coordinate(vertex).map_err(|e| {
            GeocellError::InvalidArgument(format!("Polygon vertex at index {}: {}", idx, e))
        })?;
    }

    let distinct = polygon.distinct_vertex_count();
    if distinct < 3 {
        return Err(GeocellError::InvalidArgument(format!(
            "Polygon needs at least 3 distinct vertices, got: {}",
            distinct
        )));
    }

    if is_collinear(polygon.vertices()) {
        return Err(GeocellError::InvalidArgument(
            "Polygon has zero area: all vertices are collinear".to_string(),
        ));
    }

    Ok(())
}

fn is_collinear(vertices: &[Coordinate]) -> bool {
    let origin = vertices[0];
    let Some(anchor) = vertices.iter().find(|v| **v != origin) else {
        return true;
    };
    let (ax, ay) = (anchor.lon - origin.lon, anchor.lat - origin.lat);
    let anchor_len = ax.hypot(ay);

    !vertices.iter().any(|v| {
        let (bx, by) = (v.lon - origin.lon, v.lat - origin.lat);
        let cross = ax * by - ay * bx;
        cross.abs() > f64::EPSILON * anchor_len * bx.hypot(by)
    })
}
