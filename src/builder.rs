//! Builder for the [`Geocells`] facade.

use crate::config::Config;
use crate::error::Result;
use crate::geocells::Geocells;

/// Builder for a [`Geocells`] with custom precision, limits and CRS table.
///
/// # Examples
///
/// ```rust
/// use geocells::GeocellsBuilder;
///
/// let cells = GeocellsBuilder::new()
///     .default_precision(7)
///     .max_cells(50_000)
///     .build()?;
/// assert_eq!(cells.config().default_precision, 7);
/// # Ok::<(), geocells::GeocellError>(())
/// ```
#[derive(Debug, Default)]
pub struct GeocellsBuilder {
    config: Config,
}

impl GeocellsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn default_precision(mut self, precision: usize) -> Self {
        self.config = self.config.with_default_precision(precision);
        self
    }

    pub fn max_cells(mut self, max_cells: usize) -> Self {
        self.config = self.config.with_max_cells(max_cells);
        self
    }

    /// Register a proj4 definition for `code`, overriding any built-in one.
    pub fn crs_definition(mut self, code: &str, proj4: impl Into<String>) -> Self {
        self.config = self.config.with_crs_definition(code, proj4);
        self
    }

    /// Start from an empty CRS table instead of the built-in one.
    pub fn without_builtin_crs(mut self) -> Self {
        self.config = self.config.with_builtin_crs(false);
        self
    }

    /// Validate the configuration and build the facade.
    pub fn build(self) -> Result<Geocells> {
        Geocells::with_config(self.config)
    }
}
