//! GeoJSON and `geo` geometry input and output for the cell indexers.

use crate::error::{GeocellError, Result};
use crate::geohash::decode_bbox;
use crate::index::{EnumerateOptions, GeohashSet, multi_polygon_hashes_with};
use geocells_types::{Coordinate, Polygon};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

/// Polygons to index from a GeoJSON geometry.
///
/// `Polygon` contributes its exterior ring; interior rings are ignored.
/// `MultiPolygon` contributes one polygon per member, and a
/// `GeometryCollection` contributes the polygons of its members.
///
/// # Errors
///
/// `InvalidArgument` for non-areal geometry, empty rings, or positions with
/// fewer than two ordinates.
pub fn polygons_from_geometry(geometry: &Geometry) -> Result<Vec<Polygon>> {
    let mut polygons = Vec::new();
    collect_polygons(&geometry.value, &mut polygons)?;
    Ok(polygons)
}

fn collect_polygons(value: &Value, polygons: &mut Vec<Polygon>) -> Result<()> {
    match value {
        Value::Polygon(rings) => polygons.push(exterior_ring(rings)?),
        Value::MultiPolygon(members) => {
            for rings in members {
                polygons.push(exterior_ring(rings)?);
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_polygons(&geometry.value, polygons)?;
            }
        }
        other => {
            return Err(GeocellError::InvalidArgument(format!(
                "Cannot index {} geometry, expected Polygon or MultiPolygon",
                kind(other)
            )));
        }
    }
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn exterior_ring(rings: &[Vec<Vec<f64>>]) -> Result<Polygon> {
    let exterior = rings.first().ok_or_else(|| {
        GeocellError::InvalidArgument("Polygon must have at least one ring".to_string())
    })?;

    let vertices = exterior
        .iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] => Ok(Coordinate::from_lon_lat(*lon, *lat)),
            _ => Err(GeocellError::InvalidArgument(
                "Coordinate must have at least 2 values".to_string(),
            )),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(vertices))
}

/// Polygons to index from a `geo` geometry, with the same rules as
/// [`polygons_from_geometry`].
pub fn polygons_from_geo(geometry: &geo::Geometry<f64>) -> Result<Vec<Polygon>> {
    let mut polygons = Vec::new();
    collect_geo_polygons(geometry, &mut polygons)?;
    Ok(polygons)
}

fn collect_geo_polygons(geometry: &geo::Geometry<f64>, polygons: &mut Vec<Polygon>) -> Result<()> {
    match geometry {
        geo::Geometry::Polygon(polygon) => polygons.push(Polygon::from(polygon.clone())),
        geo::Geometry::MultiPolygon(members) => {
            polygons.extend(members.iter().cloned().map(Polygon::from));
        }
        geo::Geometry::Rect(rect) => polygons.push(Polygon::from(rect.to_polygon())),
        geo::Geometry::Triangle(triangle) => polygons.push(Polygon::from(triangle.to_polygon())),
        geo::Geometry::GeometryCollection(collection) => {
            for member in collection.iter() {
                collect_geo_polygons(member, polygons)?;
            }
        }
        _ => {
            return Err(GeocellError::InvalidArgument(
                "Cannot index non-areal geometry, expected Polygon or MultiPolygon".to_string(),
            ));
        }
    }
    Ok(())
}

/// Cells covering every polygon in `geometry`.
///
/// # Examples
///
/// ```rust
/// use geocells::compute::geojson::geometry_hashes;
/// use geojson::Geometry;
///
/// let geometry: Geometry = serde_json::from_str(r#"{
///     "type": "Polygon",
///     "coordinates": [[[10.2, 56.6], [10.6, 56.6], [10.4, 57.2], [10.2, 56.6]]]
/// }"#).unwrap();
/// let cells = geometry_hashes(&geometry, 3)?;
/// assert!(cells.contains("u4p"));
/// # Ok::<(), geocells::GeocellError>(())
/// ```
pub fn geometry_hashes(geometry: &Geometry, precision: usize) -> Result<GeohashSet> {
    geometry_hashes_with(geometry, precision, &EnumerateOptions::default())
}

/// [`geometry_hashes`] with enumeration limits.
pub fn geometry_hashes_with(
    geometry: &Geometry,
    precision: usize,
    options: &EnumerateOptions,
) -> Result<GeohashSet> {
    let polygons = polygons_from_geometry(geometry)?;
    multi_polygon_hashes_with(&polygons, precision, options)
}

/// Render cells as a feature collection of rectangles.
///
/// Each feature is a closed `Polygon` ring (counter-clockwise from the
/// south-west corner) with a `geohash` property. Features keep the order of
/// `hashes`.
///
/// # Errors
///
/// `InvalidGeohash` if any input is not a valid geohash.
pub fn hashes_to_feature_collection<I, S>(hashes: I) -> Result<FeatureCollection>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let features = hashes
        .into_iter()
        .map(|hash| cell_feature(hash.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn cell_feature(hash: &str) -> Result<Feature> {
    let cell = decode_bbox(hash)?;
    let ring = vec![
        vec![cell.min_lon, cell.min_lat],
        vec![cell.max_lon, cell.min_lat],
        vec![cell.max_lon, cell.max_lat],
        vec![cell.min_lon, cell.max_lat],
        vec![cell.min_lon, cell.min_lat],
    ];

    let mut properties = JsonObject::new();
    properties.insert("geohash".to_string(), JsonValue::String(hash.to_string()));

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}
