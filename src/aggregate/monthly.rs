//! Monthly order volume for the "Monthly Orders" view

use crate::dataset::fact_columns::{APPROVED_AT, ORDER_ID};
use crate::error::{DashboardError, Result};
use crate::time::{parse_timestamp, MonthBucket};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOrderCount {
    pub month: String,
    /// Year of the bucket that survived month-label deduplication
    pub year: i32,
    pub order_count: u64,
}

/// Distinct orders per (year, month) bucket, in chronological order
pub fn orders_per_bucket(facts: &DataFrame) -> Result<BTreeMap<MonthBucket, u64>> {
    let orders = facts.column(ORDER_ID)?.cast(&DataType::String)?;
    let approved = facts.column(APPROVED_AT)?.cast(&DataType::String)?;
    let orders = orders.str()?;
    let approved = approved.str()?;

    let mut buckets: BTreeMap<MonthBucket, HashSet<&str>> = BTreeMap::new();
    for (order, raw_ts) in orders.into_iter().zip(approved.into_iter()) {
        let raw_ts = match raw_ts.map(str::trim) {
            Some(ts) if !ts.is_empty() => ts,
            _ => continue,
        };
        let ts = parse_timestamp(raw_ts).ok_or_else(|| DashboardError::MalformedValue {
            column: APPROVED_AT.to_string(),
            value: raw_ts.to_string(),
        })?;

        // A bucket exists once any approval lands in it, even with no order id
        let distinct = buckets.entry(MonthBucket::of(&ts)).or_default();
        if let Some(order) = order {
            distinct.insert(order);
        }
    }

    Ok(buckets
        .into_iter()
        .map(|(bucket, ids)| (bucket, ids.len() as u64))
        .collect())
}

/// One row per month label in calendar order.
///
/// When a label spans several years the bucket with the highest count wins;
/// equal counts keep the later year.
pub fn monthly_order_counts(facts: &DataFrame) -> Result<Vec<MonthlyOrderCount>> {
    let buckets = orders_per_bucket(facts)?;
    debug!("Resampled approvals into {} monthly buckets", buckets.len());

    let mut best: HashMap<u32, (MonthBucket, u64)> = HashMap::new();
    for (bucket, count) in buckets {
        let keep = best
            .get(&bucket.month)
            .map_or(true, |(_, current)| count >= *current);
        if keep {
            best.insert(bucket.month, (bucket, count));
        }
    }

    let mut months: Vec<(MonthBucket, u64)> = best.into_values().collect();
    months.sort_by_key(|(bucket, _)| bucket.month);

    Ok(months
        .into_iter()
        .map(|(bucket, order_count)| MonthlyOrderCount {
            month: bucket.name().to_string(),
            year: bucket.year,
            order_count,
        })
        .collect())
}
