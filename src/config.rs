//! Dashboard configuration
//!
//! Paths and ranking size come from CLI flags, then `DASHBOARD_*` environment
//! variables (a `.env` file is honoured by the binary), then defaults.

use crate::error::{DashboardError, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_FACT_PATH: &str = "datasets/combined_dat.csv";
pub const DEFAULT_GEO_PATH: &str = "datasets/customers_geo.csv";
pub const DEFAULT_TOP_N: usize = 10;

pub const FACT_PATH_VAR: &str = "DASHBOARD_FACT_PATH";
pub const GEO_PATH_VAR: &str = "DASHBOARD_GEO_PATH";
pub const TOP_N_VAR: &str = "DASHBOARD_TOP_N";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub fact_path: PathBuf,
    pub geo_path: PathBuf,
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fact_path: PathBuf::from(DEFAULT_FACT_PATH),
            geo_path: PathBuf::from(DEFAULT_GEO_PATH),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl DashboardConfig {
    /// Build from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(FACT_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            config.fact_path = PathBuf::from(path.trim());
        }
        if let Some(path) = lookup(GEO_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            config.geo_path = PathBuf::from(path.trim());
        }
        if let Some(raw) = lookup(TOP_N_VAR).filter(|v| !v.trim().is_empty()) {
            let top_n = raw.trim().parse::<usize>().map_err(|_| {
                DashboardError::Config(format!("{} must be a positive integer, got {:?}", TOP_N_VAR, raw))
            })?;
            config.top_n = top_n;
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply explicit overrides (CLI flags win over everything else)
    pub fn with_overrides(
        mut self,
        fact_path: Option<PathBuf>,
        geo_path: Option<PathBuf>,
        top_n: Option<usize>,
    ) -> Result<Self> {
        if let Some(path) = fact_path {
            self.fact_path = path;
        }
        if let Some(path) = geo_path {
            self.geo_path = path;
        }
        if let Some(n) = top_n {
            self.top_n = n;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(DashboardError::Config("top_n must be at least 1".to_string()));
        }
        Ok(())
    }
}
