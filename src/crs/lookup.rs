//! CRS definition tables.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Canonical code of the WGS84 geographic CRS.
pub const WGS84_CODE: &str = "EPSG:4326";

const WGS84_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs";
const WEB_MERCATOR_PROJ4: &str =
    "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs";

/// A CRS code with the proj4 definition of its forward transform source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrsDefinition {
    pub code: String,
    pub proj4: String,
}

impl CrsDefinition {
    pub fn new(code: impl Into<String>, proj4: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            proj4: proj4.into(),
        }
    }

    pub fn wgs84() -> Self {
        Self::new(WGS84_CODE, WGS84_PROJ4)
    }
}

/// Source of CRS definitions, looked up by code.
pub trait CrsLookup {
    fn lookup(&self, code: &str) -> Option<CrsDefinition>;
}

impl<T: CrsLookup + ?Sized> CrsLookup for &T {
    fn lookup(&self, code: &str) -> Option<CrsDefinition> {
        (**self).lookup(code)
    }
}

/// Plain `code -> proj4` maps. Keys are matched as given, then normalized.
impl CrsLookup for HashMap<String, String> {
    fn lookup(&self, code: &str) -> Option<CrsDefinition> {
        self.get(code)
            .or_else(|| self.get(&normalize_code(code)))
            .map(|proj4| CrsDefinition::new(normalize_code(code), proj4.clone()))
    }
}

impl CrsLookup for BTreeMap<String, String> {
    fn lookup(&self, code: &str) -> Option<CrsDefinition> {
        self.get(code)
            .or_else(|| self.get(&normalize_code(code)))
            .map(|proj4| CrsDefinition::new(normalize_code(code), proj4.clone()))
    }
}

/// Normalize the spellings of a CRS code.
///
/// `EPSG:3857`, `epsg:3857`, `3857` and `urn:ogc:def:crs:EPSG::3857` all
/// become `EPSG:3857`; `CRS84` and `urn:ogc:def:crs:OGC:1.3:CRS84` become
/// `EPSG:4326`. Anything else is trimmed and upper-cased.
///
/// # Examples
///
/// ```
/// use geocells::crs::normalize_code;
///
/// assert_eq!(normalize_code("urn:ogc:def:crs:EPSG::3857"), "EPSG:3857");
/// assert_eq!(normalize_code(" epsg:32633 "), "EPSG:32633");
/// assert_eq!(normalize_code("urn:ogc:def:crs:OGC:1.3:CRS84"), "EPSG:4326");
/// ```
pub fn normalize_code(code: &str) -> String {
    let upper = code.trim().to_ascii_uppercase();

    if upper.ends_with("CRS84") {
        return WGS84_CODE.to_string();
    }
    if upper.chars().all(|c| c.is_ascii_digit()) && !upper.is_empty() {
        return format!("EPSG:{}", upper);
    }
    if (upper.starts_with("URN:OGC:DEF:CRS:EPSG:") || upper.starts_with("EPSG:"))
        && let Some(number) = upper.rsplit(':').next()
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
    {
        return format!("EPSG:{}", number);
    }

    upper
}

/// In-memory `code -> proj4` table with normalized keys.
#[derive(Debug, Clone, Default)]
pub struct CrsTable {
    definitions: FxHashMap<String, String>,
}

impl CrsTable {
    /// An empty table. Every lookup misses, so reprojection is a no-op.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with common geographic and projected systems:
    /// WGS84, NAD83, Web Mercator, UTM (WGS84 and ETRS89 zones),
    /// British National Grid and Lambert-93.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();

        table.insert(WGS84_CODE, WGS84_PROJ4);
        table.insert(
            "EPSG:4269",
            "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs",
        );
        table.insert("EPSG:4258", "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs");
        table.insert("EPSG:3857", WEB_MERCATOR_PROJ4);
        table.insert("EPSG:900913", WEB_MERCATOR_PROJ4);

        for zone in 1..=60u32 {
            table.insert(
                format!("EPSG:{}", 32600 + zone),
                format!("+proj=utm +zone={} +datum=WGS84 +units=m +no_defs", zone),
            );
            table.insert(
                format!("EPSG:{}", 32700 + zone),
                format!("+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs", zone),
            );
        }

        for zone in 28..=38u32 {
            table.insert(
                format!("EPSG:{}", 25800 + zone),
                format!(
                    "+proj=utm +zone={} +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
                    zone
                ),
            );
        }

        table.insert(
            "EPSG:27700",
            "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 +x_0=400000 +y_0=-100000 \
             +ellps=airy +towgs84=446.448,-125.157,542.06,0.15,0.247,0.842,-20.489 +units=m +no_defs",
        );
        table.insert(
            "EPSG:2154",
            "+proj=lcc +lat_0=46.5 +lon_0=3 +lat_1=49 +lat_2=44 +x_0=700000 +y_0=6600000 \
             +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
        );

        table
    }

    /// Add or replace a definition. The code is normalized first.
    pub fn insert(&mut self, code: impl AsRef<str>, proj4: impl Into<String>) {
        self.definitions
            .insert(normalize_code(code.as_ref()), proj4.into());
    }

    pub fn with_definition(mut self, code: impl AsRef<str>, proj4: impl Into<String>) -> Self {
        self.insert(code, proj4);
        self
    }

    pub fn remove(&mut self, code: &str) -> Option<String> {
        self.definitions.remove(&normalize_code(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.definitions.contains_key(&normalize_code(code))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl CrsLookup for CrsTable {
    fn lookup(&self, code: &str) -> Option<CrsDefinition> {
        let code = normalize_code(code);
        self.definitions
            .get(&code)
            .map(|proj4| CrsDefinition::new(code, proj4.clone()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for CrsTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (code, proj4) in iter {
            table.insert(code, proj4);
        }
        table
    }
}
