//! Configuration for the [`Geocells`](crate::Geocells) facade.

use crate::compute::validation::validate_precision;
use crate::crs::{CrsTable, normalize_code};
use crate::error::{GeocellError, Result};
use crate::index::EnumerateOptions;
use std::collections::BTreeMap;

/// Facade settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Precision used when a call does not name one.
    #[serde(default = "Config::default_precision")]
    pub default_precision: usize,

    /// Cap on the number of cells a single enumeration may produce.
    #[serde(default)]
    pub max_cells: Option<usize>,

    /// Start from the built-in CRS table rather than an empty one.
    #[serde(default = "Config::default_builtin_crs")]
    pub builtin_crs: bool,

    /// Extra `code -> proj4` definitions, layered over the built-in table.
    #[serde(default)]
    pub crs_definitions: BTreeMap<String, String>,
}

impl Config {
    const fn default_precision() -> usize {
        6
    }

    const fn default_builtin_crs() -> bool {
        true
    }

    pub fn with_default_precision(mut self, precision: usize) -> Self {
        self.default_precision = precision;
        self
    }

    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        if max_cells > 10_000_000 {
            log::warn!(
                "Cell limit of {} is very large; a single enumeration may hold \
                that many strings in memory",
                max_cells
            );
        }

        self.max_cells = Some(max_cells);
        self
    }

    pub fn with_crs_definition(mut self, code: &str, proj4: impl Into<String>) -> Self {
        self.crs_definitions
            .insert(normalize_code(code), proj4.into());
        self
    }

    pub fn with_builtin_crs(mut self, enabled: bool) -> Self {
        self.builtin_crs = enabled;
        self
    }

    pub fn enumerate_options(&self) -> EnumerateOptions {
        EnumerateOptions {
            max_cells: self.max_cells,
        }
    }

    /// CRS lookup table described by this configuration.
    pub fn crs_table(&self) -> CrsTable {
        let mut table = if self.builtin_crs {
            CrsTable::with_defaults()
        } else {
            CrsTable::new()
        };
        for (code, proj4) in &self.crs_definitions {
            table.insert(code, proj4.clone());
        }
        table
    }

    pub fn validate(&self) -> Result<()> {
        validate_precision(self.default_precision)
            .map_err(|e| GeocellError::Config(format!("default_precision: {}", e)))?;

        if self.max_cells == Some(0) {
            return Err(GeocellError::Config(
                "max_cells must be greater than zero".to_string(),
            ));
        }

        for (code, proj4) in &self.crs_definitions {
            if code.trim().is_empty() {
                return Err(GeocellError::Config(
                    "CRS definition with an empty code".to_string(),
                ));
            }
            if proj4.trim().is_empty() {
                return Err(GeocellError::Config(format!(
                    "CRS definition for {} is empty",
                    code
                )));
            }
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(toml_str).map_err(|e| GeocellError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GeocellError::Config(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_precision: Self::default_precision(),
            max_cells: None,
            builtin_crs: Self::default_builtin_crs(),
            crs_definitions: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::CrsLookup;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_precision, 6);
        assert!(config.max_cells.is_none());
        assert!(config.crs_definitions.is_empty());
        assert!(config.builtin_crs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default()
            .with_default_precision(8)
            .with_max_cells(5000)
            .with_crs_definition("epsg:31467", "+proj=tmerc +lat_0=0 +lon_0=9 +k=1 +x_0=3500000 +y_0=0 +ellps=bessel +units=m +no_defs");

        let json = config.to_json().unwrap();
        let deserialized = Config::from_json(&json).unwrap();

        assert_eq!(deserialized, config);
        assert!(deserialized.crs_definitions.contains_key("EPSG:31467"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{"max_cells": 100}"#).unwrap();
        assert_eq!(config.default_precision, 6);
        assert_eq!(config.max_cells, Some(100));
        assert!(config.builtin_crs);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Config::from_json(r#"{"precision": 5}"#).unwrap_err();
        assert!(matches!(err, GeocellError::Serialization(_)));
    }

    #[test]
    fn test_config_validation() {
        let err = Config::default()
            .with_default_precision(13)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GeocellError::Config(_)));

        let err = Config::from_json(r#"{"max_cells": 0}"#).unwrap_err();
        assert!(matches!(err, GeocellError::Config(_)));

        let err = Config::default()
            .with_crs_definition("EPSG:1", " ")
            .validate()
            .unwrap_err();
        assert!(matches!(err, GeocellError::Config(_)));
    }

    #[test]
    fn test_crs_table_layers_definitions() {
        let config = Config::default().with_crs_definition("LOCAL:GRID", "+proj=merc +units=m");
        let table = config.crs_table();
        assert!(table.lookup("EPSG:3857").is_some());
        assert!(table.lookup("LOCAL:GRID").is_some());

        let bare = config.with_builtin_crs(false).crs_table();
        assert_eq!(bare.len(), 1);
        assert!(bare.lookup("EPSG:3857").is_none());
    }

    #[test]
    fn test_enumerate_options() {
        let options = Config::default().with_max_cells(42).enumerate_options();
        assert_eq!(options.max_cells, Some(42));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml() {
        let config = Config::from_toml(
            r#"
            default_precision = 7
            builtin_crs = false

            [crs_definitions]
            "EPSG:3857" = "+proj=merc +a=6378137 +b=6378137 +units=m +no_defs"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_precision, 7);
        assert!(!config.builtin_crs);
        assert_eq!(config.crs_table().len(), 1);

        let round_trip = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(round_trip, config);
    }
}
