//! Write a report's derived tables to CSV files

use crate::aggregate::{CategoryCount, Coordinate, MonthlyOrderCount, StateCustomerCount};
use crate::dataset::fact_columns::{CATEGORY, CUSTOMER_STATE};
use crate::error::Result;
use crate::view::Report;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn categories_frame(rows: &[CategoryCount]) -> Result<DataFrame> {
    let names: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
    let counts: Vec<u64> = rows.iter().map(|r| r.products).collect();
    Ok(DataFrame::new(vec![
        Series::new(CATEGORY, names),
        Series::new("products", counts),
    ])?)
}

pub fn monthly_frame(rows: &[MonthlyOrderCount]) -> Result<DataFrame> {
    let months: Vec<&str> = rows.iter().map(|r| r.month.as_str()).collect();
    let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    let counts: Vec<u64> = rows.iter().map(|r| r.order_count).collect();
    Ok(DataFrame::new(vec![
        Series::new("month", months),
        Series::new("year", years),
        Series::new("order_count", counts),
    ])?)
}

pub fn states_frame(rows: &[StateCustomerCount]) -> Result<DataFrame> {
    let states: Vec<&str> = rows.iter().map(|r| r.state.as_str()).collect();
    let counts: Vec<u64> = rows.iter().map(|r| r.customer_count).collect();
    let flags: Vec<bool> = rows.iter().map(|r| r.is_max).collect();
    Ok(DataFrame::new(vec![
        Series::new(CUSTOMER_STATE, states),
        Series::new("customer_count", counts),
        Series::new("is_max", flags),
    ])?)
}

pub fn coordinates_frame(rows: &[Coordinate]) -> Result<DataFrame> {
    let lats: Vec<f64> = rows.iter().map(|r| r.lat).collect();
    let lons: Vec<f64> = rows.iter().map(|r| r.lon).collect();
    Ok(DataFrame::new(vec![Series::new("lat", lats), Series::new("lon", lons)])?)
}

/// Write every table of `report` into `dir`, returning the files written
pub fn export_report(report: &Report, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let tables: Vec<(&str, DataFrame)> = match report {
        Report::TopProducts { top, bottom } => vec![
            ("top_categories.csv", categories_frame(top)?),
            ("bottom_categories.csv", categories_frame(bottom)?),
        ],
        Report::MonthlyOrders { months } => vec![("monthly_orders.csv", monthly_frame(months)?)],
        Report::GeographicalAnalysis {
            states, coordinates, ..
        } => vec![
            ("state_customers.csv", states_frame(states)?),
            ("coordinates.csv", coordinates_frame(coordinates)?),
        ],
    };

    let mut written = Vec::with_capacity(tables.len());
    for (file_name, mut df) in tables {
        let path = dir.join(file_name);
        let mut file = fs::File::create(&path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)?;
        info!("✅ Exported {} rows → {}", df.height(), path.display());
        written.push(path);
    }

    Ok(written)
}
