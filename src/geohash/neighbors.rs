//! Adjacent cells on the geohash grid.
//!
//! A neighbor is found by stepping one full cell from the cell center and
//! re-encoding at the same precision. Longitude wraps at ±180°, so the
//! eastern neighbor of a cell on the antimeridian is on the far western edge.
//! Latitude is clamped to ±90° and never wraps: the northern neighbor of a
//! cell in the top row is the cell itself (likewise southward at the bottom).

use super::codec::{decode_with_error, encode};
use crate::error::Result;
use geocells_types::{Coordinate, Direction};
use serde::{Deserialize, Serialize};

/// The eight cells surrounding a geohash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    pub n: String,
    pub ne: String,
    pub e: String,
    pub se: String,
    pub s: String,
    pub sw: String,
    pub w: String,
    pub nw: String,
}

impl Neighbors {
    pub fn get(&self, direction: Direction) -> &str {
        match direction {
            Direction::N => &self.n,
            Direction::NE => &self.ne,
            Direction::E => &self.e,
            Direction::SE => &self.se,
            Direction::S => &self.s,
            Direction::SW => &self.sw,
            Direction::W => &self.w,
            Direction::NW => &self.nw,
        }
    }

    /// Iterate clockwise from north.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &str)> + '_ {
        Direction::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

fn step(
    center: Coordinate,
    lat_err: f64,
    lon_err: f64,
    direction: Direction,
    precision: usize,
) -> Result<String> {
    let (d_lat, d_lon) = direction.offset();
    let lat = (center.lat + f64::from(d_lat) * 2.0 * lat_err).clamp(-90.0, 90.0);
    let lon = wrap_longitude(center.lon + f64::from(d_lon) * 2.0 * lon_err);
    encode(Coordinate::new(lat, lon), precision)
}

/// The adjacent cell in one direction, at the same precision.
///
/// # Examples
///
/// ```rust
/// use geocells::{Direction, geohash};
///
/// assert_eq!(geohash::neighbor("u4pruy", Direction::N)?, "u4pruz");
/// # Ok::<(), geocells::GeocellError>(())
/// ```
pub fn neighbor(hash: &str, direction: Direction) -> Result<String> {
    let (center, lat_err, lon_err) = decode_with_error(hash)?;
    step(center, lat_err, lon_err, direction, hash.chars().count())
}

/// All eight adjacent cells.
pub fn neighbors(hash: &str) -> Result<Neighbors> {
    let (center, lat_err, lon_err) = decode_with_error(hash)?;
    let precision = hash.chars().count();
    let at = |direction| step(center, lat_err, lon_err, direction, precision);

    Ok(Neighbors {
        n: at(Direction::N)?,
        ne: at(Direction::NE)?,
        e: at(Direction::E)?,
        se: at(Direction::SE)?,
        s: at(Direction::S)?,
        sw: at(Direction::SW)?,
        w: at(Direction::W)?,
        nw: at(Direction::NW)?,
    })
}
