//! Reprojection of GeoJSON trees into WGS84.
//!
//! The source CRS is read from the legacy GeoJSON `crs` member, either the
//! named form `{"type": "name", "properties": {"name": "EPSG:3857"}}` or the
//! older `{"type": "EPSG", "properties": {"code": 3857}}`. A successful
//! reprojection drops the `crs` member and any `bbox`, since RFC 7946 output
//! is always WGS84 and the old boxes no longer apply.

use super::lookup::{CrsLookup, WGS84_CODE, normalize_code};
use super::transform::Wgs84Transformer;
use crate::error::{GeocellError, Result};
use geojson::{Feature, GeoJson, Geometry, JsonObject, JsonValue, Value};

const CRS_MEMBER: &str = "crs";

/// Read the CRS code a GeoJSON object is tagged with, normalized.
///
/// Feature collections and features are checked first; a feature without its
/// own tag falls back to its geometry's.
///
/// # Examples
///
/// ```
/// use geocells::crs::crs_code;
/// use geojson::GeoJson;
///
/// let tagged: GeoJson = r#"{
///     "type": "Point",
///     "coordinates": [0.0, 0.0],
///     "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::3857"}}
/// }"#.parse().unwrap();
/// assert_eq!(crs_code(&tagged).as_deref(), Some("EPSG:3857"));
/// ```
pub fn crs_code(geojson: &GeoJson) -> Option<String> {
    match geojson {
        GeoJson::Geometry(geometry) => member_code(&geometry.foreign_members),
        GeoJson::Feature(feature) => feature_code(feature),
        GeoJson::FeatureCollection(collection) => member_code(&collection.foreign_members),
    }
}

fn feature_code(feature: &Feature) -> Option<String> {
    member_code(&feature.foreign_members).or_else(|| {
        feature
            .geometry
            .as_ref()
            .and_then(|geometry| member_code(&geometry.foreign_members))
    })
}

fn member_code(members: &Option<JsonObject>) -> Option<String> {
    let crs = members.as_ref()?.get(CRS_MEMBER)?;

    let raw = match crs {
        JsonValue::String(name) => name.clone(),
        JsonValue::Object(object) => {
            let properties = object.get("properties")?.as_object()?;
            match object.get("type").and_then(JsonValue::as_str) {
                Some(kind) if kind.eq_ignore_ascii_case("EPSG") => match properties.get("code")? {
                    JsonValue::Number(code) => format!("EPSG:{}", code),
                    JsonValue::String(code) => format!("EPSG:{}", code),
                    _ => return None,
                },
                _ => properties.get("name")?.as_str()?.to_string(),
            }
        }
        _ => return None,
    };

    Some(normalize_code(&raw))
}

/// Reproject `geojson` into WGS84, surfacing any failure.
///
/// Untagged input, and input already tagged as WGS84, come back unchanged.
///
/// # Errors
///
/// - `UnsupportedCrs` if `lookup` has no definition for the tagged code
/// - `TransformFailure` if the definition cannot be initialised or any
///   coordinate fails to transform
pub fn try_reproject<L>(geojson: &GeoJson, lookup: &L) -> Result<GeoJson>
where
    L: CrsLookup + ?Sized,
{
    let Some(code) = crs_code(geojson) else {
        return Ok(geojson.clone());
    };
    if code == WGS84_CODE {
        return Ok(geojson.clone());
    }

    let definition = lookup
        .lookup(&code)
        .ok_or_else(|| GeocellError::UnsupportedCrs(code.clone()))?;
    let transformer = Wgs84Transformer::new(&definition)?;
    log::debug!("Reprojecting GeoJSON from {} to {}", code, WGS84_CODE);

    let mut output = geojson.clone();
    match &mut output {
        GeoJson::Geometry(geometry) => transform_geometry(geometry, &transformer)?,
        GeoJson::Feature(feature) => transform_feature(feature, &transformer)?,
        GeoJson::FeatureCollection(collection) => {
            collection.bbox = None;
            strip_crs(&mut collection.foreign_members);
            for feature in &mut collection.features {
                transform_feature(feature, &transformer)?;
            }
        }
    }

    Ok(output)
}

/// Reproject `geojson` into WGS84, or hand it back untouched.
///
/// This never fails: if the CRS is not in `lookup`, or any step of the
/// transform errors, the input is returned as given and the cause is logged
/// at warn level. Use [`try_reproject`] to observe the error instead.
///
/// # Examples
///
/// ```
/// use geocells::crs::{CrsTable, reproject};
/// use geojson::GeoJson;
///
/// let input: GeoJson = r#"{
///     "type": "Point",
///     "coordinates": [1113194.9079327357, 0.0],
///     "crs": {"type": "name", "properties": {"name": "EPSG:3857"}}
/// }"#.parse().unwrap();
///
/// // No definitions: the input comes back as-is.
/// assert_eq!(reproject(input.clone(), &CrsTable::new()), input);
///
/// let output = reproject(input, &CrsTable::with_defaults());
/// let GeoJson::Geometry(point) = output else { panic!() };
/// let geojson::Value::Point(position) = point.value else { panic!() };
/// assert!((position[0] - 10.0).abs() < 1e-6);
/// ```
pub fn reproject<L>(geojson: GeoJson, lookup: &L) -> GeoJson
where
    L: CrsLookup + ?Sized,
{
    match try_reproject(&geojson, lookup) {
        Ok(reprojected) => reprojected,
        Err(e) => {
            log::warn!("Reprojection skipped, returning input unchanged: {}", e);
            geojson
        }
    }
}

fn strip_crs(members: &mut Option<JsonObject>) {
    if let Some(object) = members {
        object.remove(CRS_MEMBER);
        if object.is_empty() {
            *members = None;
        }
    }
}

fn transform_feature(feature: &mut Feature, transformer: &Wgs84Transformer) -> Result<()> {
    feature.bbox = None;
    strip_crs(&mut feature.foreign_members);
    if let Some(geometry) = &mut feature.geometry {
        transform_geometry(geometry, transformer)?;
    }
    Ok(())
}

fn transform_geometry(geometry: &mut Geometry, transformer: &Wgs84Transformer) -> Result<()> {
    geometry.bbox = None;
    strip_crs(&mut geometry.foreign_members);
    transform_value(&mut geometry.value, transformer)
}

fn transform_value(value: &mut Value, transformer: &Wgs84Transformer) -> Result<()> {
    match value {
        Value::Point(position) => transform_position(position, transformer),
        Value::MultiPoint(positions) | Value::LineString(positions) => {
            transform_positions(positions, transformer)
        }
        Value::MultiLineString(lines) | Value::Polygon(lines) => lines
            .iter_mut()
            .try_for_each(|line| transform_positions(line, transformer)),
        Value::MultiPolygon(polygons) => polygons.iter_mut().try_for_each(|rings| {
            rings
                .iter_mut()
                .try_for_each(|ring| transform_positions(ring, transformer))
        }),
        Value::GeometryCollection(geometries) => geometries
            .iter_mut()
            .try_for_each(|geometry| transform_geometry(geometry, transformer)),
    }
}

fn transform_positions(positions: &mut [Vec<f64>], transformer: &Wgs84Transformer) -> Result<()> {
    positions
        .iter_mut()
        .try_for_each(|position| transform_position(position, transformer))
}

// Ordinates past the second (altitude, measure) are left as they are.
fn transform_position(position: &mut [f64], transformer: &Wgs84Transformer) -> Result<()> {
    let (x, y) = match position {
        [x, y, ..] => (*x, *y),
        _ => {
            return Err(GeocellError::TransformFailure(format!(
                "Position {:?} has fewer than two ordinates",
                position
            )));
        }
    };
    let (lon, lat) = transformer.transform(x, y)?;
    position[0] = lon;
    position[1] = lat;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::CrsTable;
    use std::collections::HashMap;

    const TEN_DEGREES_EAST: f64 = 1_113_194.907_932_735_7;

    fn parse(json: &str) -> GeoJson {
        json.parse().unwrap()
    }

    fn mercator_point(x: f64, y: f64) -> GeoJson {
        parse(&format!(
            r#"{{"type":"Point","coordinates":[{},{}],"crs":{{"type":"name","properties":{{"name":"EPSG:3857"}}}}}}"#,
            x, y
        ))
    }

    fn point_position(geojson: &GeoJson) -> Vec<f64> {
        match geojson {
            GeoJson::Geometry(Geometry {
                value: Value::Point(position),
                ..
            }) => position.clone(),
            other => panic!("expected a point, got {:?}", other),
        }
    }

    #[test]
    fn test_crs_code_forms() {
        let named = mercator_point(0.0, 0.0);
        assert_eq!(crs_code(&named).as_deref(), Some("EPSG:3857"));

        let legacy = parse(
            r#"{"type":"Point","coordinates":[0,0],"crs":{"type":"EPSG","properties":{"code":32633}}}"#,
        );
        assert_eq!(crs_code(&legacy).as_deref(), Some("EPSG:32633"));

        let crs84 = parse(
            r#"{"type":"Point","coordinates":[0,0],"crs":{"type":"name","properties":{"name":"urn:ogc:def:crs:OGC:1.3:CRS84"}}}"#,
        );
        assert_eq!(crs_code(&crs84).as_deref(), Some(WGS84_CODE));

        let untagged = parse(r#"{"type":"Point","coordinates":[0,0]}"#);
        assert_eq!(crs_code(&untagged), None);
    }

    #[test]
    fn test_crs_code_falls_back_to_feature_geometry() {
        let feature = parse(
            r#"{"type":"Feature","properties":null,"geometry":{"type":"Point","coordinates":[0,0],"crs":{"type":"name","properties":{"name":"EPSG:3857"}}}}"#,
        );
        assert_eq!(crs_code(&feature).as_deref(), Some("EPSG:3857"));
    }

    #[test]
    fn test_empty_table_returns_input() {
        let input = mercator_point(TEN_DEGREES_EAST, 0.0);
        assert_eq!(reproject(input.clone(), &CrsTable::new()), input);
        assert!(matches!(
            try_reproject(&input, &CrsTable::new()),
            Err(GeocellError::UnsupportedCrs(code)) if code == "EPSG:3857"
        ));
    }

    #[test]
    fn test_untagged_and_wgs84_are_unchanged() {
        let table = CrsTable::with_defaults();
        let untagged = parse(r#"{"type":"Point","coordinates":[10.5,57.5]}"#);
        assert_eq!(try_reproject(&untagged, &table).unwrap(), untagged);

        let wgs84 = parse(
            r#"{"type":"Point","coordinates":[10.5,57.5],"crs":{"type":"name","properties":{"name":"EPSG:4326"}}}"#,
        );
        assert_eq!(try_reproject(&wgs84, &table).unwrap(), wgs84);
    }

    #[test]
    fn test_point_from_web_mercator() {
        let output = reproject(mercator_point(TEN_DEGREES_EAST, 0.0), &CrsTable::with_defaults());
        let position = point_position(&output);
        assert!((position[0] - 10.0).abs() < 1e-6);
        assert!(position[1].abs() < 1e-6);
        assert_eq!(crs_code(&output), None);
    }

    #[test]
    fn test_altitude_passes_through() {
        let input = parse(
            r#"{"type":"Point","coordinates":[0.0,0.0,123.5],"crs":{"type":"name","properties":{"name":"EPSG:3857"}}}"#,
        );
        let position = point_position(&try_reproject(&input, &CrsTable::with_defaults()).unwrap());
        assert_eq!(position.len(), 3);
        assert_eq!(position[2], 123.5);
    }

    #[test]
    fn test_feature_collection_shape_preserved() {
        let input = parse(
            r#"{
                "type": "FeatureCollection",
                "crs": {"type": "name", "properties": {"name": "EPSG:32633"}},
                "bbox": [400000, 5700000, 600000, 5800000],
                "features": [
                    {
                        "type": "Feature",
                        "properties": {"name": "a"},
                        "geometry": {
                            "type": "MultiPolygon",
                            "coordinates": [
                                [[[400000, 5700000], [600000, 5700000], [500000, 5800000], [400000, 5700000]]],
                                [[[450000, 5750000], [550000, 5750000], [500000, 5790000], [450000, 5750000]]]
                            ]
                        }
                    },
                    {
                        "type": "Feature",
                        "properties": null,
                        "geometry": {"type": "LineString", "coordinates": [[500000, 5761000], [510000, 5762000]]}
                    }
                ]
            }"#,
        );

        let output = try_reproject(&input, &CrsTable::with_defaults()).unwrap();
        let GeoJson::FeatureCollection(collection) = output else {
            panic!("expected a feature collection");
        };
        assert!(collection.bbox.is_none());
        assert!(collection.foreign_members.is_none());
        assert_eq!(collection.features.len(), 2);

        let Some(Geometry {
            value: Value::MultiPolygon(polygons),
            ..
        }) = &collection.features[0].geometry
        else {
            panic!("expected a multipolygon");
        };
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0][0].len(), 4);
        for position in polygons.iter().flatten().flatten() {
            assert!(position[0] > 13.0 && position[0] < 17.0, "lon {}", position[0]);
            assert!(position[1] > 51.0 && position[1] < 53.0, "lat {}", position[1]);
        }

        let Some(Geometry {
            value: Value::LineString(line),
            ..
        }) = &collection.features[1].geometry
        else {
            panic!("expected a linestring");
        };
        assert!((line[0][0] - 15.0).abs() < 1e-6);
        assert!(line[0][1] > 51.9 && line[0][1] < 52.1);
    }

    #[test]
    fn test_geometry_collection() {
        let input = parse(
            r#"{
                "type": "GeometryCollection",
                "crs": {"type": "name", "properties": {"name": "EPSG:3857"}},
                "geometries": [
                    {"type": "Point", "coordinates": [0, 0]},
                    {"type": "MultiPoint", "coordinates": [[0, 0], [1113194.9079327357, 0]]}
                ]
            }"#,
        );
        let output = try_reproject(&input, &CrsTable::with_defaults()).unwrap();
        let GeoJson::Geometry(Geometry {
            value: Value::GeometryCollection(geometries),
            foreign_members,
            ..
        }) = output
        else {
            panic!("expected a geometry collection");
        };
        assert!(foreign_members.is_none());
        let Value::MultiPoint(points) = &geometries[1].value else {
            panic!("expected a multipoint");
        };
        assert!((points[1][0] - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_unsupported_code_returns_input() {
        let input = parse(
            r#"{"type":"Point","coordinates":[1,2],"crs":{"type":"name","properties":{"name":"EPSG:99999"}}}"#,
        );
        assert_eq!(reproject(input.clone(), &CrsTable::with_defaults()), input);
    }

    #[test]
    fn test_broken_definition_returns_input() {
        let mut table = HashMap::new();
        table.insert("EPSG:3857".to_string(), "+proj=nonsense".to_string());

        let input = mercator_point(TEN_DEGREES_EAST, 0.0);
        assert!(matches!(
            try_reproject(&input, &table),
            Err(GeocellError::TransformFailure(_))
        ));
        assert_eq!(reproject(input.clone(), &table), input);
    }

    #[test]
    fn test_short_position_returns_input() {
        let mut input = mercator_point(0.0, 0.0);
        if let GeoJson::Geometry(geometry) = &mut input {
            geometry.value = Value::Point(vec![0.0]);
        }
        assert!(try_reproject(&input, &CrsTable::with_defaults()).is_err());
        assert_eq!(reproject(input.clone(), &CrsTable::with_defaults()), input);
    }
}
