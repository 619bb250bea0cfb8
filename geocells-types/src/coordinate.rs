use serde::{Deserialize, Serialize};

/// A geographic position in WGS84 degrees.
///
/// Latitude comes first in the constructor, matching the usual `(lat, lon)`
/// reading order of geohash tooling. Conversions to `geo` types map
/// longitude to `x` and latitude to `y`.
///
/// # Examples
///
/// ```
/// use geocells_types::coordinate::Coordinate;
///
/// let c = Coordinate::new(57.64911, 10.40744);
/// assert_eq!(c.lat, 57.64911);
/// assert_eq!(c.lon, 10.40744);
///
/// let point: geo::Point = c.into();
/// assert_eq!(point.x(), 10.40744);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, [-180, 180]
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a coordinate from GeoJSON ordering (longitude first).
    #[inline]
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lon }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// True when latitude is within [-90, 90] and longitude within [-180, 180].
    #[inline]
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// `[lon, lat]`, the GeoJSON position layout.
    #[inline]
    pub fn to_position(&self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(coord: geo::Coord<f64>) -> Self {
        Self::from_lon_lat(coord.x, coord.y)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(point: geo::Point<f64>) -> Self {
        Self::from_lon_lat(point.x(), point.y())
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::coord! { x: c.lon, y: c.lat }
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lon, c.lat)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_conversions_swap_axes() {
        let c = Coordinate::new(40.7128, -74.0060);

        let coord: geo::Coord<f64> = c.into();
        assert_eq!(coord.x, -74.0060);
        assert_eq!(coord.y, 40.7128);

        let back = Coordinate::from(geo::Point::new(-74.0060, 40.7128));
        assert_eq!(back, c);
    }

    #[test]
    fn test_range_checks() {
        assert!(Coordinate::new(90.0, 180.0).is_in_range());
        assert!(Coordinate::new(-90.0, -180.0).is_in_range());
        assert!(!Coordinate::new(90.1, 0.0).is_in_range());
        assert!(!Coordinate::new(0.0, -180.5).is_in_range());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_position_is_lon_first() {
        assert_eq!(Coordinate::new(1.0, 2.0).to_position(), vec![2.0, 1.0]);
    }
}
