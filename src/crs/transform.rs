//! Forward transforms into WGS84 lon/lat, backed by proj4rs.

use super::lookup::CrsDefinition;
use crate::error::{GeocellError, Result};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;

/// Reusable transform from one source CRS into WGS84 degrees.
///
/// # Examples
///
/// ```rust
/// use geocells::crs::{CrsLookup, CrsTable, Wgs84Transformer};
///
/// let table = CrsTable::with_defaults();
/// let mercator = table.lookup("EPSG:3857").unwrap();
/// let transformer = Wgs84Transformer::new(&mercator)?;
/// let (lon, lat) = transformer.transform(0.0, 0.0)?;
/// assert!(lon.abs() < 1e-9 && lat.abs() < 1e-9);
/// # Ok::<(), geocells::GeocellError>(())
/// ```
pub struct Wgs84Transformer {
    source: Proj,
    target: Proj,
    code: String,
    source_is_geographic: bool,
}

impl std::fmt::Debug for Wgs84Transformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wgs84Transformer")
            .field("code", &self.code)
            .field("source_is_geographic", &self.source_is_geographic)
            .finish_non_exhaustive()
    }
}

impl Wgs84Transformer {
    /// Build a transformer for `definition`.
    ///
    /// # Errors
    ///
    /// `TransformFailure` if either proj4 string cannot be parsed.
    pub fn new(definition: &CrsDefinition) -> Result<Self> {
        let source = Proj::from_proj_string(&definition.proj4).map_err(|e| {
            GeocellError::TransformFailure(format!(
                "Invalid projection for {}: {:?}",
                definition.code, e
            ))
        })?;
        let target = Proj::from_proj_string(&CrsDefinition::wgs84().proj4).map_err(|e| {
            GeocellError::TransformFailure(format!("Invalid WGS84 projection: {:?}", e))
        })?;

        let source_is_geographic = source.is_latlong();

        Ok(Self {
            source,
            target,
            code: definition.code.clone(),
            source_is_geographic,
        })
    }

    /// Source CRS code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// True when the source is lon/lat, so input is taken in degrees.
    pub fn is_source_geographic(&self) -> bool {
        self.source_is_geographic
    }

    /// Transform one `(x, y)` pair in source units into `(lon, lat)` degrees.
    ///
    /// # Errors
    ///
    /// `TransformFailure` if proj4rs reports an error or the result is not a
    /// finite, in-range geographic position.
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return Err(GeocellError::TransformFailure(format!(
                "Non-finite input ({}, {}) in {}",
                x, y, self.code
            )));
        }

        let (in_x, in_y) = if self.source_is_geographic {
            (x.to_radians(), y.to_radians())
        } else {
            (x, y)
        };
        let mut point = (in_x, in_y, 0.0);

        transform(&self.source, &self.target, &mut point).map_err(|e| {
            GeocellError::TransformFailure(format!(
                "Transform of ({}, {}) from {} failed: {:?}",
                x, y, self.code, e
            ))
        })?;

        let (lon, lat) = (point.0.to_degrees(), point.1.to_degrees());
        if !lon.is_finite() || !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeocellError::TransformFailure(format!(
                "Transform of ({}, {}) from {} produced invalid position ({}, {})",
                x, y, self.code, lon, lat
            )));
        }

        Ok((lon, lat))
    }
}
