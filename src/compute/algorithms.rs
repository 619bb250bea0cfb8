//! Planar geometry on lat/lon degrees used to refine geohash cells.
//!
//! Everything here treats longitude as `x` and latitude as `y` on a flat
//! plane; no spherical correction is applied.

use geocells_types::{BoundingBox, Coordinate, Polygon};

/// Even-odd ray casting test. Points exactly on an edge may land on either side.
///
/// # Examples
///
/// ```
/// use geocells::compute::algorithms::point_in_polygon;
/// use geocells::{Coordinate, Polygon};
///
/// let square = Polygon::from_lon_lat_pairs(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
/// assert!(point_in_polygon(&square, &Coordinate::new(1.0, 1.0)));
/// assert!(!point_in_polygon(&square, &Coordinate::new(3.0, 1.0)));
/// ```
pub fn point_in_polygon(polygon: &Polygon, point: &Coordinate) -> bool {
    let mut inside = false;
    for (a, b) in polygon.edges() {
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let crossing = a.lon + (point.lat - a.lat) * (b.lon - a.lon) / (b.lat - a.lat);
            if point.lon < crossing {
                inside = !inside;
            }
        }
    }
    inside
}

/// Segment vs. rectangle test (Liang-Barsky clipping). Touching counts.
pub fn segment_intersects_bbox(a: &Coordinate, b: &Coordinate, bbox: &BoundingBox) -> bool {
    let dx = b.lon - a.lon;
    let dy = b.lat - a.lat;
    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;

    let boundaries = [
        (-dx, a.lon - bbox.min_lon),
        (dx, bbox.max_lon - a.lon),
        (-dy, a.lat - bbox.min_lat),
        (dy, bbox.max_lat - a.lat),
    ];

    for (p, q) in boundaries {
        if p == 0.0 {
            // Parallel to this boundary and outside it
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t_exit {
                return false;
            }
            t_enter = t_enter.max(t);
        } else {
            if t < t_enter {
                return false;
            }
            t_exit = t_exit.min(t);
        }
    }

    t_enter <= t_exit
}

/// Whether a cell rectangle touches or overlaps the polygon: the cell center is
/// inside the polygon, or some polygon edge meets the rectangle.
pub fn bbox_touches_polygon(bbox: &BoundingBox, polygon: &Polygon) -> bool {
    point_in_polygon(polygon, &bbox.center())
        || polygon
            .edges()
            .any(|(a, b)| segment_intersects_bbox(&a, &b, bbox))
}

/// Arithmetic mean of the coordinates, `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use geocells::compute::algorithms::centroid;
/// use geocells::Coordinate;
///
/// let c = centroid(&[Coordinate::new(0.0, 0.0), Coordinate::new(2.0, 4.0)]).unwrap();
/// assert_eq!(c, Coordinate::new(1.0, 2.0));
/// assert!(centroid(&[]).is_none());
/// ```
pub fn centroid(coordinates: &[Coordinate]) -> Option<Coordinate> {
    if coordinates.is_empty() {
        return None;
    }
    let n = coordinates.len() as f64;
    let (lat_sum, lon_sum) = coordinates
        .iter()
        .fold((0.0, 0.0), |(lat, lon), c| (lat + c.lat, lon + c.lon));
    Some(Coordinate::new(lat_sum / n, lon_sum / n))
}
