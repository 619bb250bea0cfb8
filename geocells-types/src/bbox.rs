use crate::coordinate::Coordinate;
use geo::Rect;
use serde::{Deserialize, Serialize};

/// An axis-aligned latitude/longitude rectangle.
///
/// The box never wraps across the antimeridian: `min_lon <= max_lon` and
/// `min_lat <= max_lat` are expected to hold. Constructors do not reorder
/// their arguments; validation lives with the operations that consume boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a bounding box from its southern, western, northern and eastern edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use geocells_types::bbox::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    /// assert_eq!(bbox.width(), 1.0);
    /// ```
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Create a bounding box from its south-west and north-east corners.
    pub fn from_corners(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self::new(
            south_west.lat,
            south_west.lon,
            north_east.lat,
            north_east.lon,
        )
    }

    /// The smallest box enclosing every coordinate, or `None` for an empty input.
    ///
    /// # Examples
    ///
    /// ```
    /// use geocells_types::bbox::BoundingBox;
    /// use geocells_types::coordinate::Coordinate;
    ///
    /// let bbox = BoundingBox::from_coordinates([
    ///     Coordinate::new(1.0, 5.0),
    ///     Coordinate::new(-2.0, 3.0),
    ///     Coordinate::new(0.5, 7.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(bbox, BoundingBox::new(-2.0, 3.0, 1.0, 7.0));
    /// ```
    pub fn from_coordinates<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = coordinates.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(first.lat, first.lon, first.lat, first.lon);
        for c in iter {
            bbox.min_lat = bbox.min_lat.min(c.lat);
            bbox.min_lon = bbox.min_lon.min(c.lon);
            bbox.max_lat = bbox.max_lat.max(c.lat);
            bbox.max_lon = bbox.max_lon.max(c.lon);
        }
        Some(bbox)
    }

    pub fn south_west(&self) -> Coordinate {
        Coordinate::new(self.min_lat, self.min_lon)
    }

    pub fn north_east(&self) -> Coordinate {
        Coordinate::new(self.max_lat, self.max_lon)
    }

    /// The four corners, counter-clockwise from the south-west.
    pub fn corners(&self) -> [Coordinate; 4] {
        [
            Coordinate::new(self.min_lat, self.min_lon),
            Coordinate::new(self.min_lat, self.max_lon),
            Coordinate::new(self.max_lat, self.max_lon),
            Coordinate::new(self.max_lat, self.min_lon),
        ]
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Longitude extent in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude extent in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a coordinate lies inside or on the edge of the box.
    pub fn contains(&self, c: &Coordinate) -> bool {
        c.lat >= self.min_lat
            && c.lat <= self.max_lat
            && c.lon >= self.min_lon
            && c.lon <= self.max_lon
    }

    /// Check if two boxes share any point. Boxes that only touch along an
    /// edge or at a corner intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.max_lon < other.min_lon
            || self.min_lon > other.max_lon
            || self.max_lat < other.min_lat
            || self.min_lat > other.max_lat)
    }

    pub fn is_finite(&self) -> bool {
        self.min_lat.is_finite()
            && self.min_lon.is_finite()
            && self.max_lat.is_finite()
            && self.max_lon.is_finite()
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            geo::coord! { x: self.min_lon, y: self.min_lat },
            geo::coord! { x: self.max_lon, y: self.max_lat },
        )
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        Self::new(rect.min().y, rect.min().x, rect.max().y, rect.max().x)
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] - [{}, {}]",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_boxes_intersect() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let edge = BoundingBox::new(1.0, 0.0, 2.0, 1.0);
        let corner = BoundingBox::new(1.0, 1.0, 2.0, 2.0);
        let apart = BoundingBox::new(1.5, 1.5, 2.0, 2.0);

        assert!(a.intersects(&edge));
        assert!(a.intersects(&corner));
        assert!(!a.intersects(&apart));
        assert!(!apart.intersects(&a));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
        assert!(bbox.contains(&Coordinate::new(1.0, -1.0)));
        assert!(bbox.contains(&Coordinate::new(0.0, 0.0)));
        assert!(!bbox.contains(&Coordinate::new(1.01, 0.0)));
    }

    #[test]
    fn test_rect_roundtrip_keeps_axes() {
        let bbox = BoundingBox::new(40.68, -74.05, 40.88, -73.91);
        let rect = bbox.to_rect();
        assert_eq!(rect.min().x, -74.05);
        assert_eq!(rect.max().y, 40.88);
        assert_eq!(BoundingBox::from(rect), bbox);
    }

    #[test]
    fn test_center_and_extent() {
        let bbox = BoundingBox::new(10.0, 20.0, 12.0, 26.0);
        assert_eq!(bbox.center(), Coordinate::new(11.0, 23.0));
        assert_eq!(bbox.width(), 6.0);
        assert_eq!(bbox.height(), 2.0);
    }

    #[test]
    fn test_from_coordinates_empty() {
        assert!(BoundingBox::from_coordinates(Vec::new()).is_none());
    }
}
