use ecommerce_dashboard::export::export_report;
use ecommerce_dashboard::render::render;
use ecommerce_dashboard::{build_report, DashboardConfig, Dataset, OutputFormat, ReportOptions, Session, View};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "E-Commerce Data Dashboard")]
#[command(version)]
struct Args {
    /// Fact table CSV (or set DASHBOARD_FACT_PATH)
    #[arg(long, global = true)]
    fact_path: Option<PathBuf>,

    /// Geolocation CSV (or set DASHBOARD_GEO_PATH)
    #[arg(long, global = true)]
    geo_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single dashboard section
    Show {
        #[arg(value_enum)]
        view: View,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Number of categories in the top/bottom rankings (or set DASHBOARD_TOP_N)
        #[arg(long)]
        top_n: Option<usize>,

        /// Also write the derived tables as CSV files into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Choose sections from a menu; each choice is recomputed
    Interactive {
        #[arg(long)]
        top_n: Option<usize>,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Show { view, format, top_n, export_dir } => {
            let config = resolve_config(args.fact_path, args.geo_path, top_n)?;
            run_show(&config, view, format, export_dir)
        }
        Commands::Interactive { top_n } => {
            let config = resolve_config(args.fact_path, args.geo_path, top_n)?;
            run_interactive(&config)
        }
    }
}

fn resolve_config(
    fact_path: Option<PathBuf>,
    geo_path: Option<PathBuf>,
    top_n: Option<usize>,
) -> Result<DashboardConfig> {
    let config = DashboardConfig::from_env()
        .context("Invalid dashboard environment")?
        .with_overrides(fact_path, geo_path, top_n)?;
    Ok(config)
}

fn load_dataset(config: &DashboardConfig) -> Result<Dataset> {
    Dataset::load(&config.fact_path, &config.geo_path).context("Failed to load dashboard datasets")
}

fn run_show(config: &DashboardConfig, view: View, format: OutputFormat, export_dir: Option<PathBuf>) -> Result<()> {
    let dataset = load_dataset(config)?;
    let options = ReportOptions { top_n: config.top_n };

    let report = build_report(&dataset, view, &options)?;
    println!("{}", render(&report, format)?);

    if let Some(dir) = export_dir {
        let written = export_report(&report, &dir)?;
        info!("Wrote {} table(s) to {}", written.len(), dir.display());
    }

    Ok(())
}

fn run_interactive(config: &DashboardConfig) -> Result<()> {
    let dataset = load_dataset(config)?;
    info!("E-Commerce Data Dashboard ready");

    let session = Session::new(dataset, ReportOptions { top_n: config.top_n });
    let stdin = io::stdin();
    session.run_interactive(stdin.lock(), io::stdout())?;
    Ok(())
}
