//! Bounding box to geohash cells.
//!
//! The walk starts at the cell holding the south-west corner and steps east
//! along each row and north between rows, stopping as soon as a stepped cell
//! no longer intersects the box. The result equals the set of every grid cell
//! at that precision whose rectangle intersects the box (edges included).

use super::{EnumerateOptions, GeohashSet};
use crate::compute::validation::{validate_bbox, validate_precision};
use crate::error::{GeocellError, Result};
use crate::geohash::{decode_bbox, encode, neighbor};
use geocells_types::{BoundingBox, Direction};

/// All geohash cells of `precision` characters that intersect `bbox`.
///
/// # Errors
///
/// `InvalidArgument` for an invalid precision, or a box with non-finite or
/// out-of-range corners or `min > max` on either axis.
///
/// # Examples
///
/// ```rust
/// use geocells::{BoundingBox, geohash, index};
///
/// let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
/// let cells = index::bbox_hashes(&bbox, 3)?;
/// assert!(!cells.is_empty());
/// for hash in &cells {
///     assert!(geohash::decode_bbox(hash)?.intersects(&bbox));
/// }
/// # Ok::<(), geocells::GeocellError>(())
/// ```
pub fn bbox_hashes(bbox: &BoundingBox, precision: usize) -> Result<GeohashSet> {
    bbox_hashes_with(bbox, precision, &EnumerateOptions::default())
}

/// [`bbox_hashes`] with enumeration limits.
pub fn bbox_hashes_with(
    bbox: &BoundingBox,
    precision: usize,
    options: &EnumerateOptions,
) -> Result<GeohashSet> {
    walk_bbox(bbox, precision, options, &|| false)
}

pub(crate) fn walk_bbox<F>(
    bbox: &BoundingBox,
    precision: usize,
    options: &EnumerateOptions,
    is_cancelled: &F,
) -> Result<GeohashSet>
where
    F: Fn() -> bool,
{
    validate_precision(precision)?;
    validate_bbox(bbox)?;

    let mut cells = GeohashSet::default();
    let mut row_start = encode(bbox.south_west(), precision)?;

    loop {
        if is_cancelled() {
            return Err(GeocellError::Cancelled);
        }

        let mut cell = row_start.clone();
        let mut cell_box = decode_bbox(&cell)?;
        loop {
            if !cells.insert(cell.clone()) {
                break;
            }
            if let Some(limit) = options.max_cells
                && cells.len() > limit
            {
                return Err(GeocellError::CellLimitExceeded { limit });
            }

            let next = neighbor(&cell, Direction::E)?;
            let next_box = decode_bbox(&next)?;
            // A smaller west edge means the step wrapped across the antimeridian
            if next_box.min_lon < cell_box.min_lon || !next_box.intersects(bbox) {
                break;
            }
            cell = next;
            cell_box = next_box;
        }

        let next_row = neighbor(&row_start, Direction::N)?;
        if next_row == row_start || !decode_bbox(&next_row)?.intersects(bbox) {
            break;
        }
        row_start = next_row;
    }

    log::debug!(
        "Enumerated {} cells at precision {} for box {}",
        cells.len(),
        precision,
        bbox
    );

    Ok(cells)
}
