use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Input file not found or unreadable: {path}")]
    MissingFile { path: String },

    #[error("Column '{column}' missing from {table} table. Available columns: {available:?}")]
    MissingColumn {
        table: String,
        column: String,
        available: Vec<String>,
    },

    #[error("Malformed value in column '{column}': {value:?}")]
    MalformedValue { column: String, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(String),
}

impl From<polars::error::PolarsError> for DashboardError {
    fn from(err: polars::error::PolarsError) -> Self {
        DashboardError::Polars(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
