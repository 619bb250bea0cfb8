//! Bit-level geohash codec.

use crate::compute::validation::{MAX_PRECISION, validate_coordinate, validate_precision};
use crate::error::{GeocellError, Result};
use geocells_types::{BoundingBox, Coordinate};

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";
const BITS_PER_CHAR: usize = 5;

/// Encode a coordinate as a geohash of `precision` characters.
///
/// A value exactly on a bisection midpoint falls into the lower half.
///
/// # Errors
///
/// `InvalidArgument` if `precision` is 0 or above 12, or if the coordinate is
/// non-finite or out of range.
///
/// # Examples
///
/// ```rust
/// use geocells::{Coordinate, geohash};
///
/// let hash = geohash::encode(Coordinate::new(57.64911, 10.40744), 6)?;
/// assert_eq!(hash, "u4pruy");
/// # Ok::<(), geocells::GeocellError>(())
/// ```
pub fn encode(coord: Coordinate, precision: usize) -> Result<String> {
    validate_precision(precision)?;
    validate_coordinate(&coord)?;

    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut hash = String::with_capacity(precision);
    let mut is_lon = true;

    for _ in 0..precision {
        let mut index = 0usize;
        for _ in 0..BITS_PER_CHAR {
            let upper = if is_lon {
                bisect_toward(&mut lon_range, coord.lon)
            } else {
                bisect_toward(&mut lat_range, coord.lat)
            };
            index = (index << 1) | usize::from(upper);
            is_lon = !is_lon;
        }
        hash.push(BASE32[index] as char);
    }

    Ok(hash)
}

/// Narrow `range` to the half containing `value`; true when the upper half was taken.
#[inline]
fn bisect_toward(range: &mut (f64, f64), value: f64) -> bool {
    let mid = (range.0 + range.1) / 2.0;
    if value > mid {
        range.0 = mid;
        true
    } else {
        range.1 = mid;
        false
    }
}

fn char_index(c: char) -> Option<usize> {
    let lower = c.to_ascii_lowercase();
    if !lower.is_ascii() {
        return None;
    }
    BASE32.iter().position(|&b| b == lower as u8)
}

/// Replay the bisection encoded in `hash`, returning the final lat and lon ranges.
fn cell_ranges(hash: &str) -> Result<((f64, f64), (f64, f64))> {
    if hash.is_empty() {
        return Err(GeocellError::InvalidGeohash(
            "Geohash must not be empty".to_string(),
        ));
    }
    if hash.chars().count() > MAX_PRECISION {
        return Err(GeocellError::InvalidGeohash(format!(
            "Geohash '{}' is longer than {} characters",
            hash, MAX_PRECISION
        )));
    }

    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut is_lon = true;

    for (pos, c) in hash.chars().enumerate() {
        let index = char_index(c).ok_or_else(|| {
            GeocellError::InvalidGeohash(format!(
                "Invalid character '{}' at position {} in '{}'",
                c, pos, hash
            ))
        })?;

        for shift in (0..BITS_PER_CHAR).rev() {
            let upper = (index >> shift) & 1 == 1;
            let range = if is_lon { &mut lon_range } else { &mut lat_range };
            let mid = (range.0 + range.1) / 2.0;
            if upper {
                range.0 = mid;
            } else {
                range.1 = mid;
            }
            is_lon = !is_lon;
        }
    }

    Ok((lat_range, lon_range))
}

/// Decode a geohash to the center of its cell.
///
/// # Errors
///
/// `InvalidGeohash` for empty strings, strings longer than 12 characters, or
/// characters outside the base-32 alphabet. Upper-case input is accepted.
pub fn decode(hash: &str) -> Result<Coordinate> {
    decode_with_error(hash).map(|(center, _, _)| center)
}

/// Decode a geohash to its cell center plus the half-height and half-width
/// of the cell, in degrees.
///
/// # Examples
///
/// ```rust
/// use geocells::geohash;
///
/// let (center, lat_err, lon_err) = geohash::decode_with_error("u")?;
/// assert_eq!(lat_err, 22.5);
/// assert_eq!(lon_err, 22.5);
/// assert_eq!(center.lat, 67.5);
/// # Ok::<(), geocells::GeocellError>(())
/// ```
pub fn decode_with_error(hash: &str) -> Result<(Coordinate, f64, f64)> {
    let (lat_range, lon_range) = cell_ranges(hash)?;
    let center = Coordinate::new(
        (lat_range.0 + lat_range.1) / 2.0,
        (lon_range.0 + lon_range.1) / 2.0,
    );
    let lat_err = (lat_range.1 - lat_range.0) / 2.0;
    let lon_err = (lon_range.1 - lon_range.0) / 2.0;
    Ok((center, lat_err, lon_err))
}

/// Decode a geohash to the bounding box of its cell.
///
/// # Examples
///
/// ```rust
/// use geocells::{BoundingBox, geohash};
///
/// assert_eq!(geohash::decode_bbox("s")?, BoundingBox::new(0.0, 0.0, 45.0, 45.0));
/// # Ok::<(), geocells::GeocellError>(())
/// ```
pub fn decode_bbox(hash: &str) -> Result<BoundingBox> {
    let (lat_range, lon_range) = cell_ranges(hash)?;
    Ok(BoundingBox::new(
        lat_range.0,
        lon_range.0,
        lat_range.1,
        lon_range.1,
    ))
}

/// Check whether `hash` decodes without error.
pub fn is_valid_geohash(hash: &str) -> bool {
    cell_ranges(hash).is_ok()
}

/// The enclosing cell one level up, or `None` for a single-character hash.
pub fn parent(hash: &str) -> Result<Option<String>> {
    cell_ranges(hash)?;
    let mut chars: Vec<char> = hash.to_ascii_lowercase().chars().collect();
    chars.pop();
    if chars.is_empty() {
        Ok(None)
    } else {
        Ok(Some(chars.into_iter().collect()))
    }
}

/// The 32 cells one level down, in alphabet order.
///
/// # Errors
///
/// `InvalidGeohash` if `hash` is malformed or already at the maximum precision.
pub fn children(hash: &str) -> Result<Vec<String>> {
    cell_ranges(hash)?;
    if hash.chars().count() >= MAX_PRECISION {
        return Err(GeocellError::InvalidGeohash(format!(
            "Geohash '{}' is already at maximum precision",
            hash
        )));
    }
    let prefix = hash.to_ascii_lowercase();
    Ok(BASE32
        .iter()
        .map(|&b| {
            let mut child = prefix.clone();
            child.push(b as char);
            child
        })
        .collect())
}

/// One geohash or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeohashInput {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for GeohashInput {
    fn from(hash: &str) -> Self {
        GeohashInput::Single(hash.to_string())
    }
}

impl From<String> for GeohashInput {
    fn from(hash: String) -> Self {
        GeohashInput::Single(hash)
    }
}

impl From<Vec<String>> for GeohashInput {
    fn from(hashes: Vec<String>) -> Self {
        GeohashInput::Many(hashes)
    }
}

impl From<Vec<&str>> for GeohashInput {
    fn from(hashes: Vec<&str>) -> Self {
        GeohashInput::Many(hashes.into_iter().map(str::to_string).collect())
    }
}

/// Result of a batch decode, shaped like its [`GeohashInput`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Single(T),
    Many(Vec<T>),
}

impl<T> Decoded<T> {
    /// Flatten into a vector (one element for `Single`).
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Decoded::Single(value) => vec![value],
            Decoded::Many(values) => values,
        }
    }
}

fn apply_batch<T>(input: &GeohashInput, op: fn(&str) -> Result<T>) -> Result<Decoded<T>> {
    match input {
        GeohashInput::Single(hash) => op(hash).map(Decoded::Single),
        GeohashInput::Many(hashes) => hashes
            .iter()
            .map(|h| op(h))
            .collect::<Result<Vec<_>>>()
            .map(Decoded::Many),
    }
}

/// Decode one or many geohashes to cell centers, preserving order.
///
/// # Examples
///
/// ```rust
/// use geocells::geohash::{self, Decoded, GeohashInput};
///
/// let decoded = geohash::decode_batch(&GeohashInput::from(vec!["u4pruy", "s"]))?;
/// assert!(matches!(decoded, Decoded::Many(ref v) if v.len() == 2));
/// # Ok::<(), geocells::GeocellError>(())
/// ```
pub fn decode_batch(input: &GeohashInput) -> Result<Decoded<Coordinate>> {
    apply_batch(input, decode)
}

/// Decode one or many geohashes to bounding boxes, preserving order.
pub fn decode_bbox_batch(input: &GeohashInput) -> Result<Decoded<BoundingBox>> {
    apply_batch(input, decode_bbox)
}

/// Decode a slice of geohashes to cell centers. The first malformed hash aborts.
pub fn decode_many<S: AsRef<str>>(hashes: &[S]) -> Result<Vec<Coordinate>> {
    hashes.iter().map(|h| decode(h.as_ref())).collect()
}

/// Decode a slice of geohashes to bounding boxes. The first malformed hash aborts.
pub fn decode_bbox_many<S: AsRef<str>>(hashes: &[S]) -> Result<Vec<BoundingBox>> {
    hashes.iter().map(|h| decode_bbox(h.as_ref())).collect()
}
