//! View selection and dispatch
//!
//! Each [`View`] maps to exactly one arm of [`build_report`], so adding a view
//! is an exhaustive-match change.

use crate::aggregate::{
    coordinate_bounds, monthly_order_counts, state_customer_counts, top_bottom_categories, valid_coordinates,
    CategoryCount, Coordinate, CoordinateBounds, MonthlyOrderCount, StateCustomerCount,
};
use crate::config::DEFAULT_TOP_N;
use crate::dataset::Dataset;
use crate::error::{DashboardError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    TopProducts,
    MonthlyOrders,
    GeographicalAnalysis,
}

impl View {
    pub const ALL: [View; 3] = [View::TopProducts, View::MonthlyOrders, View::GeographicalAnalysis];

    /// Label shown in the navigation menu
    pub fn label(&self) -> &'static str {
        match self {
            View::TopProducts => "Top Products",
            View::MonthlyOrders => "Monthly Orders",
            View::GeographicalAnalysis => "Geographical Analysis",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            View::TopProducts => "Top and Bottom Products by Sales",
            View::MonthlyOrders => "Monthly Orders Analysis",
            View::GeographicalAnalysis => "Customer Distribution by State",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for View {
    type Err = DashboardError;

    /// Accepts menu labels ("Top Products") and CLI spellings ("top-products")
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
            .collect();

        View::ALL
            .into_iter()
            .find(|view| view.label().to_ascii_lowercase() == normalized)
            .ok_or_else(|| DashboardError::UnknownView(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub top_n: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { top_n: DEFAULT_TOP_N }
    }
}

/// Derived tables for one rendered view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum Report {
    TopProducts {
        top: Vec<CategoryCount>,
        bottom: Vec<CategoryCount>,
    },
    MonthlyOrders {
        months: Vec<MonthlyOrderCount>,
    },
    GeographicalAnalysis {
        states: Vec<StateCustomerCount>,
        coordinates: Vec<Coordinate>,
        bounds: Option<CoordinateBounds>,
    },
}

impl Report {
    pub fn view(&self) -> View {
        match self {
            Report::TopProducts { .. } => View::TopProducts,
            Report::MonthlyOrders { .. } => View::MonthlyOrders,
            Report::GeographicalAnalysis { .. } => View::GeographicalAnalysis,
        }
    }
}

/// Recompute the derived tables for `view` from scratch
pub fn build_report(dataset: &Dataset, view: View, options: &ReportOptions) -> Result<Report> {
    info!("Rendering view: {}", view);

    let report = match view {
        View::TopProducts => {
            let ranking = top_bottom_categories(dataset.facts(), options.top_n)?;
            Report::TopProducts {
                top: ranking.top,
                bottom: ranking.bottom,
            }
        }
        View::MonthlyOrders => Report::MonthlyOrders {
            months: monthly_order_counts(dataset.facts())?,
        },
        View::GeographicalAnalysis => {
            let coordinates = valid_coordinates(dataset.geo())?;
            Report::GeographicalAnalysis {
                states: state_customer_counts(dataset.facts())?,
                bounds: coordinate_bounds(&coordinates),
                coordinates,
            }
        }
    };

    Ok(report)
}
