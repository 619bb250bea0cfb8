//! Configured entry point bundling every operation.

use crate::builder::GeocellsBuilder;
use crate::compute::geojson::{geometry_hashes_with, polygons_from_geo};
use crate::config::Config;
use crate::crs::{CrsTable, reproject, try_reproject};
use crate::error::Result;
use crate::geohash::{self, Neighbors};
use crate::index::{GeohashSet, bbox_hashes_with, multi_polygon_hashes_with, polygon_hashes_with};
use geocells_types::{BoundingBox, Coordinate, Direction, Polygon};
use geojson::{GeoJson, Geometry};

#[cfg(feature = "async")]
use crate::index::{PolygonHashTask, spawn_polygon_hashes};
#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

/// Geohash operations with a configured default precision, cell limit and
/// CRS table.
///
/// The free functions in [`geohash`](crate::geohash), [`index`](crate::index)
/// and [`crs`](crate::crs) remain available for one-off calls.
///
/// # Examples
///
/// ```rust
/// use geocells::{Coordinate, Geocells};
///
/// let cells = Geocells::new();
/// let hash = cells.encode(Coordinate::new(57.64911, 10.40744))?;
/// assert_eq!(hash, "u4pruy");
///
/// let around = cells.neighbors(&hash)?;
/// assert_eq!(around.iter().count(), 8);
/// # Ok::<(), geocells::GeocellError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Geocells {
    config: Config,
    crs: CrsTable,
}

impl Geocells {
    /// A facade with the default configuration.
    pub fn new() -> Self {
        let config = Config::default();
        let crs = config.crs_table();
        Self { config, crs }
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let crs = config.crs_table();
        log::debug!(
            "Geocells configured: precision {}, max_cells {:?}, {} CRS definitions",
            config.default_precision,
            config.max_cells,
            crs.len()
        );
        Ok(Self { config, crs })
    }

    pub fn builder() -> GeocellsBuilder {
        GeocellsBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn crs_table(&self) -> &CrsTable {
        &self.crs
    }

    /// Encode at the default precision.
    pub fn encode(&self, coord: Coordinate) -> Result<String> {
        geohash::encode(coord, self.config.default_precision)
    }

    pub fn encode_with_precision(&self, coord: Coordinate, precision: usize) -> Result<String> {
        geohash::encode(coord, precision)
    }

    pub fn decode(&self, hash: &str) -> Result<Coordinate> {
        geohash::decode(hash)
    }

    pub fn decode_bbox(&self, hash: &str) -> Result<BoundingBox> {
        geohash::decode_bbox(hash)
    }

    pub fn neighbor(&self, hash: &str, direction: Direction) -> Result<String> {
        geohash::neighbor(hash, direction)
    }

    pub fn neighbors(&self, hash: &str) -> Result<Neighbors> {
        geohash::neighbors(hash)
    }

    /// Cells covering `bbox` at the default precision.
    pub fn bbox_hashes(&self, bbox: &BoundingBox) -> Result<GeohashSet> {
        self.bbox_hashes_with_precision(bbox, self.config.default_precision)
    }

    pub fn bbox_hashes_with_precision(
        &self,
        bbox: &BoundingBox,
        precision: usize,
    ) -> Result<GeohashSet> {
        bbox_hashes_with(bbox, precision, &self.config.enumerate_options())
    }

    /// Cells covering `polygon` at the default precision.
    pub fn polygon_hashes(&self, polygon: &Polygon) -> Result<GeohashSet> {
        self.polygon_hashes_with_precision(polygon, self.config.default_precision)
    }

    pub fn polygon_hashes_with_precision(
        &self,
        polygon: &Polygon,
        precision: usize,
    ) -> Result<GeohashSet> {
        polygon_hashes_with(polygon, precision, &self.config.enumerate_options())
    }

    /// Cells covering a GeoJSON `Polygon`/`MultiPolygon` at the default precision.
    pub fn geometry_hashes(&self, geometry: &Geometry) -> Result<GeohashSet> {
        geometry_hashes_with(
            geometry,
            self.config.default_precision,
            &self.config.enumerate_options(),
        )
    }

    /// Cells covering an areal `geo` geometry at the default precision.
    pub fn geo_hashes(&self, geometry: &geo::Geometry<f64>) -> Result<GeohashSet> {
        let polygons = polygons_from_geo(geometry)?;
        multi_polygon_hashes_with(
            &polygons,
            self.config.default_precision,
            &self.config.enumerate_options(),
        )
    }

    /// Start a cancellable polygon scan at the default precision on the
    /// tokio blocking pool. Must be called from within a runtime.
    #[cfg(feature = "async")]
    pub fn spawn_polygon_hashes(
        &self,
        polygon: Polygon,
        token: Option<CancellationToken>,
    ) -> PolygonHashTask {
        spawn_polygon_hashes(
            polygon,
            self.config.default_precision,
            self.config.enumerate_options(),
            token,
        )
    }

    /// Best-effort reprojection to WGS84 using the configured CRS table.
    /// Returns the input unchanged on any failure.
    pub fn reproject(&self, geojson: GeoJson) -> GeoJson {
        reproject(geojson, &self.crs)
    }

    pub fn try_reproject(&self, geojson: &GeoJson) -> Result<GeoJson> {
        try_reproject(geojson, &self.crs)
    }
}

impl Default for Geocells {
    fn default() -> Self {
        Self::new()
    }
}
