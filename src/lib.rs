pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod render;
pub mod session;
pub mod time;
pub mod view;

pub use config::DashboardConfig;
pub use dataset::Dataset;
pub use error::{DashboardError, Result};
pub use render::OutputFormat;
pub use session::Session;
pub use view::{build_report, Report, ReportOptions, View};
