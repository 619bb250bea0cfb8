//! Getting Started
//!
//! Encodes a point, walks its neighbours, covers a box and a polygon with
//! cells, and reprojects a Web Mercator GeoJSON feature into WGS84.

use geocells::{BoundingBox, Coordinate, Direction, Geocells, Polygon};
use geojson::GeoJson;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== geocells - Getting Started ===\n");

    let cells = Geocells::builder()
        .default_precision(6)
        .max_cells(100_000)
        .build()?;

    // ========================================
    // 1. Encoding and decoding
    // ========================================
    println!("1. Encode / decode");
    println!("------------------");

    let aalborg = Coordinate::new(57.64911, 10.40744);
    let hash = cells.encode(aalborg)?;
    let cell = cells.decode_bbox(&hash)?;
    println!("   {} -> {}", aalborg, hash);
    println!("   cell: {}", cell);
    println!("   center: {}\n", cells.decode(&hash)?);

    // ========================================
    // 2. Neighbours
    // ========================================
    println!("2. Neighbours of {}", hash);
    println!("------------------------");

    for (direction, neighbour) in cells.neighbors(&hash)?.iter() {
        println!("   {:>2}: {}", direction, neighbour);
    }
    println!(
        "   north then south returns to {}\n",
        cells.neighbor(&cells.neighbor(&hash, Direction::N)?, Direction::S)?
    );

    // ========================================
    // 3. Covering a bounding box
    // ========================================
    println!("3. Bounding box coverage");
    println!("------------------------");

    let manhattan = BoundingBox::new(40.6829, -74.0479, 40.8820, -73.9067);
    for precision in 3..=6 {
        let covering = cells.bbox_hashes_with_precision(&manhattan, precision)?;
        println!("   precision {}: {} cells", precision, covering.len());
    }
    println!();

    // ========================================
    // 4. Covering a polygon
    // ========================================
    println!("4. Polygon coverage");
    println!("-------------------");

    let central_park = Polygon::from_lon_lat_pairs(&[
        [-73.9819, 40.7681],
        [-73.9580, 40.8005],
        [-73.9498, 40.7968],
        [-73.9737, 40.7644],
    ]);
    let park_cells = cells.polygon_hashes(&central_park)?;
    let box_cells = cells.bbox_hashes(&central_park.bounding_box().ok_or("empty polygon")?)?;
    println!(
        "   Central Park: {} cells (bounding box needs {})",
        park_cells.len(),
        box_cells.len()
    );

    let mut sample: Vec<_> = park_cells.iter().cloned().collect();
    sample.sort();
    sample.truncate(5);
    println!("   first cells: {:?}\n", sample);

    // ========================================
    // 5. Reprojection to WGS84
    // ========================================
    println!("5. Reprojection");
    println!("---------------");

    let mercator: GeoJson = r#"{
        "type": "Feature",
        "properties": {"name": "Times Square"},
        "geometry": {
            "type": "Point",
            "coordinates": [-8235908.0, 4977075.0],
            "crs": {"type": "name", "properties": {"name": "EPSG:3857"}}
        }
    }"#
    .parse()?;
    println!("   input:  {}", mercator);
    println!("   output: {}", cells.reproject(mercator.clone()));

    // Unknown CRS codes leave the input untouched
    let unknown: GeoJson =
        r#"{"type":"Point","coordinates":[1,2],"crs":{"type":"name","properties":{"name":"EPSG:0"}}}"#
            .parse()?;
    println!("   unknown CRS kept as-is: {}", cells.reproject(unknown));

    Ok(())
}
