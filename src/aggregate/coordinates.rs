use crate::dataset::geo_columns::{LATITUDE, LONGITUDE};
use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

pub const LAT_COLUMN: &str = "lat";
pub const LON_COLUMN: &str = "lon";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// `lat`/`lon` frame with every row missing either value dropped.
/// NaN counts as missing. Input order is preserved.
pub fn valid_coordinates_frame(geo: &DataFrame) -> Result<DataFrame> {
    let df = geo
        .clone()
        .lazy()
        .select([
            col(LATITUDE).strict_cast(DataType::Float64).alias(LAT_COLUMN),
            col(LONGITUDE).strict_cast(DataType::Float64).alias(LON_COLUMN),
        ])
        .filter(
            col(LAT_COLUMN)
                .is_not_null()
                .and(col(LON_COLUMN).is_not_null())
                .and(col(LAT_COLUMN).is_not_nan())
                .and(col(LON_COLUMN).is_not_nan()),
        )
        .collect()?;
    Ok(df)
}

pub fn valid_coordinates(geo: &DataFrame) -> Result<Vec<Coordinate>> {
    let df = valid_coordinates_frame(geo)?;
    let lats = df.column(LAT_COLUMN)?.f64()?;
    let lons = df.column(LON_COLUMN)?.f64()?;

    Ok(lats
        .into_iter()
        .zip(lons.into_iter())
        .filter_map(|(lat, lon)| Some(Coordinate { lat: lat?, lon: lon? }))
        .collect())
}

pub fn coordinate_bounds(points: &[Coordinate]) -> Option<CoordinateBounds> {
    let first = points.first()?;
    let init = CoordinateBounds {
        min_lat: first.lat,
        max_lat: first.lat,
        min_lon: first.lon,
        max_lon: first.lon,
    };
    Some(points.iter().skip(1).fold(init, |b, p| CoordinateBounds {
        min_lat: b.min_lat.min(p.lat),
        max_lat: b.max_lat.max(p.lat),
        min_lon: b.min_lon.min(p.lon),
        max_lon: b.max_lon.max(p.lon),
    }))
}
