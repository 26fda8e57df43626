//! End-to-end tests: CSV fixtures on disk, loaded and rendered per view.

use ecommerce_dashboard::aggregate::{category_totals, state_customer_counts, valid_coordinates};
use ecommerce_dashboard::export::export_report;
use ecommerce_dashboard::render::render_text;
use ecommerce_dashboard::time::month_number;
use ecommerce_dashboard::{build_report, DashboardError, Dataset, Report, ReportOptions, View};
use std::fs;
use std::path::{Path, PathBuf};

const FACT_HEADER: &str =
    "order_id,customer_id,order_approved_at,product_id,product_category_name_english,customer_state";

/// Write the fact and geolocation fixtures, returning their paths
fn write_fixtures(dir: &Path, fact_rows: &[&str], geo_rows: &[&str]) -> (PathBuf, PathBuf) {
    let fact_path = dir.join("combined_dat.csv");
    let mut facts = String::from(FACT_HEADER);
    for row in fact_rows {
        facts.push('\n');
        facts.push_str(row);
    }
    facts.push('\n');
    fs::write(&fact_path, facts).unwrap();

    let geo_path = dir.join("customers_geo.csv");
    let mut geo = String::from("geolocation_zip_code_prefix,geolocation_lat,geolocation_lng,geolocation_state");
    for row in geo_rows {
        geo.push('\n');
        geo.push_str(row);
    }
    geo.push('\n');
    fs::write(&geo_path, geo).unwrap();

    (fact_path, geo_path)
}

fn sample_dataset(dir: &Path) -> Dataset {
    let (fact_path, geo_path) = write_fixtures(
        dir,
        &[
            "o1,c1,2017-11-24 10:00:00,p1,bed_bath_table,SP",
            "o1,c1,2017-11-24 10:00:00,p2,bed_bath_table,SP",
            "o2,c2,2017-11-25 11:00:00,p3,health_beauty,SP",
            "o3,c3,2018-01-05 09:00:00,p4,health_beauty,RJ",
            "o4,c4,2018-01-20 09:00:00,p5,bed_bath_table,MG",
            "o5,c5,2018-02-02 09:00:00,p6,,MG",
            "o6,c6,,p7,toys,SP",
            "o7,c7,2018-11-02 09:00:00,p8,toys,RJ",
        ],
        &[
            "01037,-23.5456,-46.6393,SP",
            "20010,,-43.1729,RJ",
            "30110,-19.9208,-43.9378,MG",
            "40010,-12.9714,,BA",
        ],
    );
    Dataset::load(&fact_path, &geo_path).unwrap()
}

#[test]
fn test_top_products_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = sample_dataset(dir.path());

    let report = build_report(&dataset, View::TopProducts, &ReportOptions { top_n: 2 }).unwrap();
    let Report::TopProducts { top, bottom } = report else {
        panic!("expected top products report");
    };

    let top: Vec<(&str, u64)> = top.iter().map(|c| (c.category.as_str(), c.products)).collect();
    assert_eq!(top, vec![("bed_bath_table", 3), ("health_beauty", 2)]);

    let bottom: Vec<(&str, u64)> = bottom.iter().map(|c| (c.category.as_str(), c.products)).collect();
    assert_eq!(bottom, vec![("health_beauty", 2), ("toys", 2)]);

    // Every row with a category is counted exactly once
    let totals = category_totals(dataset.facts()).unwrap();
    assert_eq!(totals.iter().map(|c| c.products).sum::<u64>(), 7);
}

#[test]
fn test_monthly_orders_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = sample_dataset(dir.path());

    let report = build_report(&dataset, View::MonthlyOrders, &ReportOptions::default()).unwrap();
    let Report::MonthlyOrders { months } = report else {
        panic!("expected monthly report");
    };

    let summary: Vec<(&str, i32, u64)> = months
        .iter()
        .map(|m| (m.month.as_str(), m.year, m.order_count))
        .collect();
    // November appears in 2017 (2 orders) and 2018 (1 order); the larger wins
    assert_eq!(
        summary,
        vec![("January", 2018, 2), ("February", 2018, 1), ("November", 2017, 2)]
    );

    let numbers: Vec<u32> = months.iter().map(|m| month_number(&m.month).unwrap()).collect();
    assert!(numbers.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_geographical_analysis_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = sample_dataset(dir.path());

    let states = state_customer_counts(dataset.facts()).unwrap();
    let summary: Vec<(&str, u64, bool)> = states
        .iter()
        .map(|s| (s.state.as_str(), s.customer_count, s.is_max))
        .collect();
    assert_eq!(summary, vec![("SP", 3, true), ("MG", 2, false), ("RJ", 2, false)]);

    let points = valid_coordinates(dataset.geo()).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].lat, -23.5456);
    assert_eq!(points[1].lon, -43.9378);

    let report = build_report(&dataset, View::GeographicalAnalysis, &ReportOptions::default()).unwrap();
    let text = render_text(&report).unwrap();
    assert!(text.contains("2 customer locations with valid coordinates"));
}

#[test]
fn test_export_monthly_orders() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = sample_dataset(dir.path());
    let out_dir = dir.path().join("out");

    let report = build_report(&dataset, View::MonthlyOrders, &ReportOptions::default()).unwrap();
    let written = export_report(&report, &out_dir).unwrap();
    assert_eq!(written, vec![out_dir.join("monthly_orders.csv")]);

    let csv = fs::read_to_string(&written[0]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "month,year,order_count");
    assert_eq!(lines[1], "January,2018,2");
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let (fact_path, _) = write_fixtures(dir.path(), &["o1,c1,2018-01-05 09:00:00,p1,toys,SP"], &[]);
    let err = Dataset::load(&fact_path, &dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, DashboardError::MissingFile { ref path } if path.ends_with("absent.csv")));
}

#[test]
fn test_missing_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let fact_path = dir.path().join("facts.csv");
    fs::write(&fact_path, "order_id,customer_id,product_id\no1,c1,p1\n").unwrap();
    let (_, geo_path) = write_fixtures(dir.path(), &[], &["1,1.0,2.0,SP"]);

    let err = Dataset::load(&fact_path, &geo_path).unwrap_err();
    match err {
        DashboardError::MissingColumn { table, column, .. } => {
            assert_eq!(table, "fact");
            assert_eq!(column, "product_category_name_english");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_all_null_categories_render_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (fact_path, geo_path) = write_fixtures(
        dir.path(),
        &["o1,c1,2018-01-05 09:00:00,p1,,SP", "o2,c2,2018-01-06 09:00:00,p2,,SP"],
        &["1,,,SP"],
    );
    let dataset = Dataset::load(&fact_path, &geo_path).unwrap();

    let report = build_report(&dataset, View::TopProducts, &ReportOptions::default()).unwrap();
    assert_eq!(
        report,
        Report::TopProducts {
            top: vec![],
            bottom: vec![],
        }
    );
    assert!(render_text(&report).unwrap().contains("(no data)"));

    let report = build_report(&dataset, View::GeographicalAnalysis, &ReportOptions::default()).unwrap();
    let Report::GeographicalAnalysis { coordinates, bounds, .. } = report else {
        panic!("expected geographical report");
    };
    assert!(coordinates.is_empty());
    assert!(bounds.is_none());
}

#[test]
fn test_na_markers_treated_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    let (fact_path, geo_path) = write_fixtures(
        dir.path(),
        &[
            "o1,c1,2018-01-05 09:00:00,p1,toys,SP",
            "o2,c2,2018-01-06 09:00:00,p2,NA,SP",
            "o3,c3,2018-01-07 09:00:00,p3,N/A,RJ",
            "o4,c4,2018-01-08 09:00:00,p4,books,RJ",
        ],
        &["1,1.0,2.0,SP", "2,NA,5.0,RJ", "3,7.5,null,MG"],
    );
    let dataset = Dataset::load(&fact_path, &geo_path).unwrap();

    let totals = category_totals(dataset.facts()).unwrap();
    let names: Vec<&str> = totals.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["books", "toys"]);

    let report = build_report(&dataset, View::GeographicalAnalysis, &ReportOptions::default()).unwrap();
    let Report::GeographicalAnalysis { coordinates, .. } = report else {
        panic!("expected geographical report");
    };
    assert_eq!(coordinates.len(), 1);
    assert_eq!((coordinates[0].lat, coordinates[0].lon), (1.0, 2.0));
}

#[test]
fn test_nan_coordinates_dropped_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let (fact_path, _) = write_fixtures(dir.path(), &["o1,c1,2018-01-05 09:00:00,p1,toys,SP"], &[]);
    let geo_path = dir.path().join("nan_geo.csv");
    fs::write(&geo_path, "geolocation_lat,geolocation_lng\n1.0,2.0\nNaN,5.0\n3.0,nan\n").unwrap();
    let dataset = Dataset::load(&fact_path, &geo_path).unwrap();

    let points = valid_coordinates(dataset.geo()).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!((points[0].lat, points[0].lon), (1.0, 2.0));
    assert!(points.iter().all(|p| !p.lat.is_nan() && !p.lon.is_nan()));
}
