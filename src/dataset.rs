//! Dataset loading
//!
//! Loads the order/product fact table and the customer geolocation table once
//! per session into a read-only [`Dataset`] handle that every view borrows.

use crate::error::{DashboardError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Column names of the fact table
pub mod fact_columns {
    pub const PRODUCT_ID: &str = "product_id";
    pub const CATEGORY: &str = "product_category_name_english";
    pub const ORDER_ID: &str = "order_id";
    pub const APPROVED_AT: &str = "order_approved_at";
    pub const CUSTOMER_ID: &str = "customer_id";
    pub const CUSTOMER_STATE: &str = "customer_state";

    pub const REQUIRED: [&str; 6] = [
        PRODUCT_ID,
        CATEGORY,
        ORDER_ID,
        APPROVED_AT,
        CUSTOMER_ID,
        CUSTOMER_STATE,
    ];
}

/// Column names of the geolocation table
pub mod geo_columns {
    pub const LATITUDE: &str = "geolocation_lat";
    pub const LONGITUDE: &str = "geolocation_lng";

    pub const REQUIRED: [&str; 2] = [LATITUDE, LONGITUDE];
}

/// Cell values read as missing, matching the markers pandas treats as NA
pub const NULL_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>", "N/A",
    "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub const FACT_TABLE: &str = "fact";
pub const GEO_TABLE: &str = "geolocation";

/// Immutable pair of input tables
#[derive(Debug, Clone)]
pub struct Dataset {
    facts: DataFrame,
    geo: DataFrame,
}

impl Dataset {
    /// Load both CSV files, failing on the first missing file or column
    pub fn load(fact_path: &Path, geo_path: &Path) -> Result<Self> {
        let facts = read_csv(fact_path)?;
        let geo = read_csv(geo_path)?;
        let dataset = Self::from_frames(facts, geo)?;

        info!(
            "Loaded dataset: {} fact rows from {}, {} geolocation rows from {}",
            dataset.facts.height(),
            fact_path.display(),
            dataset.geo.height(),
            geo_path.display()
        );

        Ok(dataset)
    }

    /// Wrap already-loaded frames after validating their columns
    pub fn from_frames(facts: DataFrame, geo: DataFrame) -> Result<Self> {
        require_columns(&facts, FACT_TABLE, &fact_columns::REQUIRED)?;
        require_columns(&geo, GEO_TABLE, &geo_columns::REQUIRED)?;
        Ok(Self { facts, geo })
    }

    pub fn facts(&self) -> &DataFrame {
        &self.facts
    }

    pub fn geo(&self) -> &DataFrame {
        &self.geo
    }
}

/// Read a delimited file into a DataFrame
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    // Opening up front separates "absent/unreadable" from parse failures
    File::open(path).map_err(|_| DashboardError::MissingFile {
        path: path.display().to_string(),
    })?;

    debug!("Reading CSV {}", path.display());

    // Scan the whole file for schema inference; ids can look numeric for many rows
    let null_values = NullValues::AllColumns(NULL_MARKERS.iter().map(|m| m.to_string()).collect());
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(None)
        .with_null_values(Some(null_values))
        .finish()?
        .collect()?;

    Ok(df)
}

/// Ensure every named column is present
pub fn require_columns(df: &DataFrame, table: &str, required: &[&str]) -> Result<()> {
    let available = df.get_column_names();
    for column in required {
        if !available.contains(column) {
            return Err(DashboardError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
                available: available.iter().map(|c| c.to_string()).collect(),
            });
        }
    }
    Ok(())
}
