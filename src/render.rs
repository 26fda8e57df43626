//! Terminal presentation of reports

use crate::aggregate::{CategoryCount, Coordinate, CoordinateBounds, MonthlyOrderCount, StateCustomerCount};
use crate::error::Result;
use crate::view::Report;
use clap::ValueEnum;
use std::fmt::{self, Write};

const BAR_WIDTH: usize = 40;
const BAR_CHAR: char = '█';
const MAX_MARKER: &str = " ◀ most customers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_text(report: &Report) -> Result<String> {
    let mut out = String::new();
    write_report(&mut out, report)?;
    Ok(out)
}

fn write_report(out: &mut String, report: &Report) -> fmt::Result {
    let view = report.view();
    writeln!(out, "{}", view.header())?;
    writeln!(out, "{}", "=".repeat(view.header().chars().count()))?;

    match report {
        Report::TopProducts { top, bottom } => {
            write_category_chart(out, &format!("Top {} Products Sold", top.len()), top)?;
            writeln!(out)?;
            write_category_chart(out, &format!("Bottom {} Products Sold", bottom.len()), bottom)
        }
        Report::MonthlyOrders { months } => write_monthly_trend(out, months),
        Report::GeographicalAnalysis {
            states,
            coordinates,
            bounds,
        } => {
            write_state_chart(out, states)?;
            writeln!(out)?;
            write_coordinate_summary(out, coordinates, bounds.as_ref())
        }
    }
}

fn bar(value: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let len = ((value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    // Non-zero values always get at least one cell
    let len = if value > 0 { len.max(1) } else { 0 };
    std::iter::repeat(BAR_CHAR).take(len).collect()
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

fn write_category_chart(out: &mut String, title: &str, rows: &[CategoryCount]) -> fmt::Result {
    writeln!(out, "{}", title)?;
    if rows.is_empty() {
        return writeln!(out, "  (no data)");
    }

    let width = label_width(rows.iter().map(|r| r.category.as_str()));
    let max = rows.iter().map(|r| r.products).max().unwrap_or(0);
    for row in rows {
        writeln!(
            out,
            "  {:<width$}  {} {}",
            row.category,
            bar(row.products, max),
            row.products,
            width = width
        )?;
    }
    Ok(())
}

fn write_monthly_trend(out: &mut String, months: &[MonthlyOrderCount]) -> fmt::Result {
    writeln!(out, "Number of Orders per Month")?;
    if months.is_empty() {
        return writeln!(out, "  (no data)");
    }

    let width = label_width(months.iter().map(|m| m.month.as_str()));
    let max = months.iter().map(|m| m.order_count).max().unwrap_or(0);
    for row in months {
        writeln!(
            out,
            "  {:<width$} {}  {}● {}",
            row.month,
            row.year,
            bar(row.order_count, max),
            row.order_count,
            width = width
        )?;
    }
    Ok(())
}

fn write_state_chart(out: &mut String, states: &[StateCustomerCount]) -> fmt::Result {
    writeln!(out, "Customer Count by State")?;
    if states.is_empty() {
        return writeln!(out, "  (no data)");
    }

    let width = label_width(states.iter().map(|s| s.state.as_str()));
    let max = states.iter().map(|s| s.customer_count).max().unwrap_or(0);
    for row in states {
        let marker = if row.is_max { MAX_MARKER } else { "" };
        writeln!(
            out,
            "  {:<width$}  {} {}{}",
            row.state,
            bar(row.customer_count, max),
            row.customer_count,
            marker,
            width = width
        )?;
    }
    Ok(())
}

fn write_coordinate_summary(
    out: &mut String,
    coordinates: &[Coordinate],
    bounds: Option<&CoordinateBounds>,
) -> fmt::Result {
    writeln!(out, "Maps Geographical Customer Distribution")?;
    writeln!(out, "  {} customer locations with valid coordinates", coordinates.len())?;
    match bounds {
        Some(b) => {
            writeln!(out, "  latitude:  {:.4} .. {:.4}", b.min_lat, b.max_lat)?;
            writeln!(out, "  longitude: {:.4} .. {:.4}", b.min_lon, b.max_lon)
        }
        None => writeln!(out, "  (no data)"),
    }
}
