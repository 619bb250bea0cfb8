use geocells::crs::{CrsTable, try_reproject};
use geocells::geohash as codec;
use geocells::index::{self, EnumerateOptions};
use geocells::{BoundingBox, Coordinate, Direction, GeocellError, Polygon};
use geojson::GeoJson;
use std::sync::atomic::{AtomicUsize, Ordering};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Test 1: Poles clamp instead of wrapping
#[test]
fn test_polar_cells() {
    let north = codec::encode(Coordinate::new(90.0, 0.0), 5).expect("Failed to encode north pole");
    assert_eq!(north, "gzzzz");
    let cell = codec::decode_bbox(&north).unwrap();
    assert_eq!(cell.max_lat, 90.0);
    assert_eq!(codec::neighbor(&north, Direction::N).unwrap(), north);

    let south = codec::encode(Coordinate::new(-90.0, 0.0), 5).expect("Failed to encode south pole");
    assert_eq!(south, "5bpbp");
    assert_eq!(codec::decode_bbox(&south).unwrap().min_lat, -90.0);
    assert_eq!(codec::neighbor(&south, Direction::S).unwrap(), south);

    // Diagonals still move east and west along the polar row
    let ne = codec::neighbor(&north, Direction::NE).unwrap();
    assert_eq!(ne, codec::neighbor(&north, Direction::E).unwrap());
}

/// Test 2: Longitude wraps at the antimeridian
#[test]
fn test_antimeridian_wrap() {
    let east_edge = codec::encode(Coordinate::new(0.0, 180.0), 4).unwrap();
    assert_eq!(east_edge, "rzzz");
    assert_eq!(codec::decode_bbox(&east_edge).unwrap().max_lon, 180.0);

    let across = codec::neighbor(&east_edge, Direction::E).unwrap();
    assert_eq!(across, "2pbp");
    assert_eq!(codec::decode_bbox(&across).unwrap().min_lon, -180.0);
    assert_eq!(codec::encode(Coordinate::new(0.0, -180.0), 4).unwrap(), across);
    assert_eq!(codec::neighbor(&across, Direction::W).unwrap(), east_edge);

    // Single-character cells wrap too
    assert_eq!(codec::neighbor("z", Direction::E).unwrap(), "b");
    assert_eq!(codec::neighbor("b", Direction::W).unwrap(), "z");
}

/// Test 3: Boxes touching the map edges stop instead of wrapping
#[test]
fn test_bbox_at_map_edges() {
    let east = BoundingBox::new(0.0, 170.0, 10.0, 180.0);
    let cells = index::bbox_hashes(&east, 2).expect("Edge box failed");
    let mut sorted: Vec<_> = cells.into_iter().collect();
    sorted.sort();
    assert_eq!(sorted, vec!["rz", "xb", "xc"]);

    let polar_cap = BoundingBox::new(80.0, -10.0, 90.0, 10.0);
    let cells = index::bbox_hashes(&polar_cap, 1).unwrap();
    assert_eq!(cells.len(), 2);
    assert!(cells.contains("g") && cells.contains("u"));

    let world = BoundingBox::new(-90.0, -180.0, 90.0, 180.0);
    assert_eq!(index::bbox_hashes(&world, 1).unwrap().len(), 32);
    assert_eq!(index::bbox_hashes(&world, 2).unwrap().len(), 1024);
}

/// Test 4: Degenerate but valid boxes
#[test]
fn test_point_and_line_boxes() {
    let point = BoundingBox::new(57.64911, 10.40744, 57.64911, 10.40744);
    let cells = index::bbox_hashes(&point, 6).unwrap();
    assert_eq!(cells.len(), 1);
    assert!(cells.contains("u4pruy"));

    let meridian = BoundingBox::new(10.0, 5.0, 20.0, 5.0);
    let cells = index::bbox_hashes(&meridian, 2).unwrap();
    assert!(!cells.is_empty());
    for hash in &cells {
        let cell = codec::decode_bbox(hash).unwrap();
        assert!(cell.min_lon <= 5.0 && cell.max_lon >= 5.0);
    }
}

/// Test 5: Polygons far smaller than a cell
#[test]
fn test_tiny_polygons() {
    let tiny = Polygon::from_lon_lat_pairs(&[
        [10.40744, 57.64911],
        [10.4074401, 57.64911],
        [10.40744, 57.6491101],
    ]);
    let cells = index::polygon_hashes(&tiny, 5).expect("Tiny polygon failed");
    assert_eq!(cells.len(), 1);
    assert!(cells.contains("u4pru"));

    // Straddling the origin touches one cell per quadrant
    let origin = Polygon::from_lon_lat_pairs(&[[-0.001, -0.001], [0.001, -0.001], [0.0, 0.001]]);
    let mut cells: Vec<_> = index::polygon_hashes(&origin, 3).unwrap().into_iter().collect();
    cells.sort();
    assert_eq!(cells, vec!["7zz", "ebp", "kpb", "s00"]);
}

/// Test 6: Malformed geohashes
#[test]
fn test_malformed_geohashes() {
    for bad in ["", "u4pruydqqvjbx", "u4pa", "i", "l0", "o", "u4 pr", "ü"] {
        let err = codec::decode(bad).expect_err(bad);
        assert!(
            matches!(err, GeocellError::InvalidGeohash(_)),
            "{:?} -> {:?}",
            bad,
            err
        );
        assert!(err.is_invalid_argument());
        assert!(!codec::is_valid_geohash(bad));
    }

    // Upper case is accepted
    assert_eq!(
        codec::decode_bbox("U4PRUY").unwrap(),
        codec::decode_bbox("u4pruy").unwrap()
    );
}

/// Test 7: Out-of-range arguments
#[test]
fn test_invalid_arguments() {
    let aalborg = Coordinate::new(57.64911, 10.40744);
    for precision in [0, 13, 100] {
        assert!(codec::encode(aalborg, precision).unwrap_err().is_invalid_argument());
    }

    for coord in [
        Coordinate::new(90.0001, 0.0),
        Coordinate::new(0.0, -180.0001),
        Coordinate::new(f64::NAN, 0.0),
        Coordinate::new(0.0, f64::INFINITY),
    ] {
        assert!(matches!(
            codec::encode(coord, 5),
            Err(GeocellError::InvalidArgument(_))
        ));
    }

    let inverted = BoundingBox::new(10.0, 0.0, 5.0, 1.0);
    assert!(index::bbox_hashes(&inverted, 3).unwrap_err().is_invalid_argument());

    let collinear = Polygon::from_lon_lat_pairs(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
    assert!(index::polygon_hashes(&collinear, 3).unwrap_err().is_invalid_argument());

    let repeated = Polygon::from_lon_lat_pairs(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0], [1.0, 1.0]]);
    assert!(index::polygon_hashes(&repeated, 3).unwrap_err().is_invalid_argument());

    let out_of_range = Polygon::from_lon_lat_pairs(&[[0.0, 0.0], [1.0, 95.0], [2.0, 0.0]]);
    assert!(index::polygon_hashes(&out_of_range, 3).unwrap_err().is_invalid_argument());
}

/// Test 8: Hierarchy at the precision bounds
#[test]
fn test_parent_and_children_bounds() {
    assert_eq!(codec::parent("u").unwrap(), None);
    assert_eq!(codec::parent("u4pruy").unwrap().as_deref(), Some("u4pru"));

    let children = codec::children("u4pru").unwrap();
    assert_eq!(children.len(), 32);
    assert!(children.contains(&"u4pruy".to_string()));

    assert!(codec::children("u4pruydqqvjb").is_err());
}

/// Test 9: Cancellation part way through a scan
#[test]
fn test_cancel_mid_scan() {
    let square = Polygon::from_lon_lat_pairs(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    let polls = AtomicUsize::new(0);

    let result = index::polygon_hashes_cancellable(
        &square,
        5,
        &EnumerateOptions::default(),
        || polls.fetch_add(1, Ordering::Relaxed) >= 50,
    );
    assert!(matches!(result, Err(GeocellError::Cancelled)));
}

/// Test 10: Reprojection failures fall back to the input
#[test]
fn test_reprojection_fallbacks() {
    init_logging();

    let unknown: GeoJson = r#"{"type":"Point","coordinates":[1,2],"crs":{"type":"name","properties":{"name":"EPSG:0"}}}"#
        .parse()
        .unwrap();
    assert_eq!(geocells::reproject(unknown.clone(), &CrsTable::with_defaults()), unknown);
    assert!(matches!(
        try_reproject(&unknown, &CrsTable::with_defaults()),
        Err(GeocellError::UnsupportedCrs(_))
    ));

    // A broken definition fails on construction
    let table = CrsTable::new().with_definition("EPSG:3857", "+proj=not-a-projection");
    let mercator: GeoJson = r#"{"type":"Point","coordinates":[0,0],"crs":{"type":"name","properties":{"name":"EPSG:3857"}}}"#
        .parse()
        .unwrap();
    assert_eq!(geocells::reproject(mercator.clone(), &table), mercator);
    assert!(matches!(
        try_reproject(&mercator, &table),
        Err(GeocellError::TransformFailure(_))
    ));

    // Legacy EPSG-typed crs members are understood
    let legacy: GeoJson = r#"{"type":"Point","coordinates":[0,0],"crs":{"type":"EPSG","properties":{"code":3857}}}"#
        .parse()
        .unwrap();
    assert_ne!(geocells::reproject(legacy.clone(), &CrsTable::with_defaults()), legacy);
}

/// Test 11: Neighbour sets are complete and distinct away from the poles
#[test]
fn test_neighbors_distinct() {
    let all = codec::neighbors("dqcjq").unwrap();
    let mut hashes: Vec<_> = all.iter().map(|(_, hash)| hash.to_string()).collect();
    hashes.sort();
    hashes.dedup();
    assert_eq!(hashes.len(), 8);
    assert!(!hashes.contains(&"dqcjq".to_string()));

    for direction in Direction::ALL {
        assert_eq!(all.get(direction), codec::neighbor("dqcjq", direction).unwrap());
    }
}
