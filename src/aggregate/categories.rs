//! Product category ranking for the "Top Products" view

use crate::dataset::fact_columns::{CATEGORY, PRODUCT_ID};
use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const PRODUCTS_COLUMN: &str = "products";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub products: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    Descending,
    Ascending,
}

/// Top and bottom slices of the category grouping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRanking {
    pub top: Vec<CategoryCount>,
    pub bottom: Vec<CategoryCount>,
}

/// Count product rows per category.
///
/// Rows with a null category are dropped before grouping. Groups come back in
/// category key order, which is the tie-break order used by [`rank_categories`].
pub fn category_totals(facts: &DataFrame) -> Result<Vec<CategoryCount>> {
    let grouped = facts
        .clone()
        .lazy()
        .select([
            col(CATEGORY).cast(DataType::String),
            col(PRODUCT_ID),
        ])
        .filter(col(CATEGORY).is_not_null())
        .group_by([col(CATEGORY)])
        .agg([col(PRODUCT_ID)
            .is_not_null()
            .sum()
            .cast(DataType::UInt64)
            .alias(PRODUCTS_COLUMN)])
        .collect()?;

    // Collect first, then order in Rust
    let categories = grouped.column(CATEGORY)?.str()?;
    let counts = grouped.column(PRODUCTS_COLUMN)?.u64()?;

    let mut totals: Vec<CategoryCount> = categories
        .into_iter()
        .zip(counts.into_iter())
        .filter_map(|(category, count)| {
            category.map(|c| CategoryCount {
                category: c.to_string(),
                products: count.unwrap_or(0),
            })
        })
        .collect();
    totals.sort_by(|a, b| a.category.cmp(&b.category));

    debug!("Grouped {} product categories", totals.len());
    Ok(totals)
}

/// Stable sort by count, then keep the first `n`
pub fn rank_categories(totals: &[CategoryCount], n: usize, order: RankOrder) -> Vec<CategoryCount> {
    let mut ranked = totals.to_vec();
    match order {
        RankOrder::Descending => ranked.sort_by(|a, b| b.products.cmp(&a.products)),
        RankOrder::Ascending => ranked.sort_by(|a, b| a.products.cmp(&b.products)),
    }
    ranked.truncate(n);
    ranked
}

pub fn top_bottom_categories(facts: &DataFrame, n: usize) -> Result<CategoryRanking> {
    let totals = category_totals(facts)?;
    Ok(CategoryRanking {
        top: rank_categories(&totals, n, RankOrder::Descending),
        bottom: rank_categories(&totals, n, RankOrder::Ascending),
    })
}
