use crate::bbox::BoundingBox;
use crate::coordinate::Coordinate;
use geo::{LineString, Polygon as GeoPolygon};
use serde::{Deserialize, Serialize};

/// A simple polygon given as a single ring of coordinates.
///
/// The ring is implicitly closed; a trailing vertex equal to the first one is
/// dropped on construction so `vertices()` never repeats the start point.
/// Interior rings are not modelled. Serializes as a plain array of
/// coordinates; deserialized rings are normalized the same way as `new`.
///
/// # Examples
///
/// ```
/// use geocells_types::coordinate::Coordinate;
/// use geocells_types::polygon::Polygon;
///
/// let triangle = Polygon::new(vec![
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.0, 1.0),
///     Coordinate::new(1.0, 0.0),
///     Coordinate::new(0.0, 0.0),
/// ]);
/// assert_eq!(triangle.len(), 3);
/// assert_eq!(triangle.edges().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct Polygon {
    vertices: Vec<Coordinate>,
}

impl Polygon {
    pub fn new(mut vertices: Vec<Coordinate>) -> Self {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Self { vertices }
    }

    /// Build a polygon from GeoJSON-ordered `[lon, lat]` pairs.
    pub fn from_lon_lat_pairs(pairs: &[[f64; 2]]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|[lon, lat]| Coordinate::from_lon_lat(*lon, *lat))
                .collect(),
        )
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over ring edges, including the closing edge back to the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Number of distinct vertex positions.
    pub fn distinct_vertex_count(&self) -> usize {
        let mut distinct: Vec<Coordinate> = Vec::with_capacity(self.vertices.len());
        for v in &self.vertices {
            if !distinct.contains(v) {
                distinct.push(*v);
            }
        }
        distinct.len()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_coordinates(self.vertices.iter().copied())
    }

    /// Convert to a `geo::Polygon` with an explicitly closed exterior ring.
    pub fn to_geo_polygon(&self) -> GeoPolygon<f64> {
        let ring: Vec<geo::Coord<f64>> = self.vertices.iter().map(|&c| c.into()).collect();
        GeoPolygon::new(LineString::from(ring), vec![])
    }
}

impl From<LineString<f64>> for Polygon {
    fn from(ring: LineString<f64>) -> Self {
        Self::new(ring.coords().map(|&c| c.into()).collect())
    }
}

/// Uses the exterior ring; interior rings are discarded.
impl From<GeoPolygon<f64>> for Polygon {
    fn from(polygon: GeoPolygon<f64>) -> Self {
        let (exterior, _) = polygon.into_inner();
        Self::from(exterior)
    }
}

impl From<Vec<Coordinate>> for Polygon {
    fn from(vertices: Vec<Coordinate>) -> Self {
        Self::new(vertices)
    }
}

impl From<Polygon> for Vec<Coordinate> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}
