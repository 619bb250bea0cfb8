//! Polygon to geohash cells.
//!
//! Candidates come from the polygon's bounding box; a candidate is kept when
//! the polygon touches or covers its rectangle (center inside the ring, or a
//! ring edge meeting the rectangle). Partially covered cells are included.

use super::bbox::walk_bbox;
use super::{EnumerateOptions, GeohashSet};
use crate::compute::algorithms::bbox_touches_polygon;
use crate::compute::validation::{validate_polygon, validate_precision};
use crate::error::{GeocellError, Result};
use crate::geohash::decode_bbox;
use geocells_types::Polygon;

/// All geohash cells of `precision` characters that the polygon touches or covers.
///
/// A polygon smaller than one cell yields the few cells it overlaps.
/// Self-intersecting rings are indexed best-effort with even-odd filling.
///
/// # Errors
///
/// `InvalidArgument` for an invalid precision, out-of-range vertices, fewer
/// than three distinct vertices, or a zero-area (collinear) ring.
///
/// # Examples
///
/// ```rust
/// use geocells::{Polygon, index};
///
/// // A small triangle well inside the precision-3 cell "u4p"
/// let triangle = Polygon::from_lon_lat_pairs(&[[10.2, 56.6], [10.6, 56.6], [10.4, 57.2]]);
/// let cells = index::polygon_hashes(&triangle, 3)?;
/// assert_eq!(cells.len(), 1);
/// assert!(cells.contains("u4p"));
/// # Ok::<(), geocells::GeocellError>(())
/// ```
pub fn polygon_hashes(polygon: &Polygon, precision: usize) -> Result<GeohashSet> {
    polygon_hashes_with(polygon, precision, &EnumerateOptions::default())
}

/// [`polygon_hashes`] with enumeration limits.
pub fn polygon_hashes_with(
    polygon: &Polygon,
    precision: usize,
    options: &EnumerateOptions,
) -> Result<GeohashSet> {
    polygon_hashes_cancellable(polygon, precision, options, || false)
}

/// [`polygon_hashes`] that polls `is_cancelled` between cells.
///
/// Returns `Cancelled` as soon as the predicate reports true; partial results
/// are discarded.
pub fn polygon_hashes_cancellable<F>(
    polygon: &Polygon,
    precision: usize,
    options: &EnumerateOptions,
    is_cancelled: F,
) -> Result<GeohashSet>
where
    F: Fn() -> bool,
{
    validate_precision(precision)?;
    validate_polygon(polygon)?;

    let bbox = polygon.bounding_box().ok_or_else(|| {
        GeocellError::InvalidArgument("Polygon has no vertices".to_string())
    })?;
    // The cap applies to kept cells, not to the bounding-box candidates
    let candidates = walk_bbox(&bbox, precision, &EnumerateOptions::default(), &is_cancelled)?;
    let candidate_count = candidates.len();

    let mut cells = GeohashSet::default();
    for hash in candidates {
        if is_cancelled() {
            return Err(GeocellError::Cancelled);
        }
        let cell = decode_bbox(&hash)?;
        if bbox_touches_polygon(&cell, polygon) {
            cells.insert(hash);
            if let Some(limit) = options.max_cells
                && cells.len() > limit
            {
                return Err(GeocellError::CellLimitExceeded { limit });
            }
        }
    }

    log::debug!(
        "Polygon with {} vertices kept {} of {} candidate cells at precision {}",
        polygon.len(),
        cells.len(),
        candidate_count,
        precision
    );

    Ok(cells)
}

/// Union of [`polygon_hashes`] over several polygons.
pub fn multi_polygon_hashes(polygons: &[Polygon], precision: usize) -> Result<GeohashSet> {
    multi_polygon_hashes_with(polygons, precision, &EnumerateOptions::default())
}

/// [`multi_polygon_hashes`] with enumeration limits. The cell cap applies to
/// the union as well as to each polygon's walk.
pub fn multi_polygon_hashes_with(
    polygons: &[Polygon],
    precision: usize,
    options: &EnumerateOptions,
) -> Result<GeohashSet> {
    let mut cells = GeohashSet::default();
    for polygon in polygons {
        cells.extend(polygon_hashes_with(polygon, precision, options)?);
        if let Some(limit) = options.max_cells
            && cells.len() > limit
        {
            return Err(GeocellError::CellLimitExceeded { limit });
        }
    }
    Ok(cells)
}
