//! The demography dataset: column layouts, fixed-choice keys, the embedded
//! query catalogs and the steps that load the source files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::db::{CatalogSource, ColumnSelector, DatabaseConfig, QueryArgs, StoreError, Symbolic};

pub const MIN_YEAR: i64 = 1950;
pub const MAX_YEAR: i64 = 2023;

/// Columns of the normalized demography table, in load order.
pub const DEM_COLS: [&str; 8] = [
    "code",
    "year",
    "type",
    "years_0_4",
    "years_5_14",
    "years_15_24",
    "years_25_64",
    "years_65_plus",
];

/// Age-group columns with their display labels, youngest first.
pub const DEM_AGE_GROUPS: [(&str, &str); 5] = [
    ("years_0_4", "0-4"),
    ("years_5_14", "5-14"),
    ("years_15_24", "15-24"),
    ("years_25_64", "25-64"),
    ("years_65_plus", "65+"),
];

pub const COUNTRY_COLS: [&str; 8] = [
    "name",
    "alpha_2",
    "alpha_3",
    "code",
    "region",
    "sub_region",
    "region_code",
    "sub_region_code",
];

/// Country columns with their display labels.
pub const COUNTRY_COL_LABELS: [(&str, &str); 8] = [
    ("name", "Name"),
    ("alpha_2", "ISO Code 2"),
    ("alpha_3", "ISO Code 3"),
    ("code", "Code"),
    ("region", "Region"),
    ("sub_region", "Sub Region"),
    ("region_code", "Region Code"),
    ("sub_region_code", "Sub Region Code"),
];

pub const FERT_COLS: [&str; 3] = ["country", "year", "fertility"];

/// CozoScript definitions for the embedded engine.
pub const COZO_CATALOG: &str = include_str!("../queries/demography.cozo");

/// SQL definitions for PostgreSQL. Read queries only.
pub const SQL_CATALOG: &str = include_str!("../queries/demography.sql");

/// The embedded catalog matching the configured engine.
pub fn default_catalog(config: &DatabaseConfig) -> CatalogSource {
    if config.is_cozo() {
        CatalogSource::text("demography.cozo", COZO_CATALOG)
    } else {
        CatalogSource::text("demography.sql", SQL_CATALOG)
    }
}

/// Demography series: both sexes, male or female.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemType {
    Total,
    Male,
    Female,
}

impl Symbolic for DemType {
    fn symbol(&self) -> &str {
        match self {
            DemType::Total => "t",
            DemType::Male => "m",
            DemType::Female => "f",
        }
    }
}

impl FromStr for DemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "t" | "total" => Ok(DemType::Total),
            "m" | "male" => Ok(DemType::Male),
            "f" | "female" => Ok(DemType::Female),
            other => Err(format!("unknown demography type '{}' (expected t, m or f)", other)),
        }
    }
}

/// A country, identified by its ISO-3166 alpha-3 code or, for fuzzy lookups,
/// by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryKey(String);

impl CountryKey {
    /// Three-letter codes are upper-cased; anything else is kept as given.
    pub fn new(key: &str) -> Self {
        let key = key.trim();
        if key.len() == 3 && key.chars().all(|c| c.is_ascii_alphabetic()) {
            CountryKey(key.to_ascii_uppercase())
        } else {
            CountryKey(key.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Symbolic for CountryKey {
    fn symbol(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CountryKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("country key must not be empty".to_string());
        }
        Ok(CountryKey::new(s))
    }
}

/// Source files loaded into the embedded engine after setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub demography: PathBuf,
    pub countries: PathBuf,
    pub fertility: PathBuf,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            demography: PathBuf::from("demography.csv"),
            countries: PathBuf::from("countries.csv"),
            fertility: PathBuf::from("fertility-rate.csv"),
        }
    }
}

impl DataFiles {
    /// The `create_table_*` queries that load these files, in load order.
    ///
    /// Relative paths are resolved against the current directory, since the
    /// engine reads them through `file://` URLs.
    pub fn load_steps(&self) -> Result<Vec<(&'static str, QueryArgs)>, StoreError> {
        let step = |query: &'static str, path: &Path| -> Result<_, StoreError> {
            let path = std::path::absolute(path)?;
            Ok((query, QueryArgs::new().with("file_path", path.display().to_string())))
        };
        Ok(vec![
            step("create_table_country", &self.countries)?,
            step("create_table_demography", &self.demography)?,
            step("create_table_fertility", &self.fertility)?,
        ])
    }
}

/// Selector over the fertility columns.
pub fn fert_col_selector(cols: &[&str]) -> Result<ColumnSelector, StoreError> {
    ColumnSelector::new(&FERT_COLS, cols)
}

/// Selector over the country columns.
pub fn country_col_selector(cols: &[&str]) -> Result<ColumnSelector, StoreError> {
    ColumnSelector::new(&COUNTRY_COLS, cols)
}
