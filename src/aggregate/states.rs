//! Customer distribution by state for the "Geographical Analysis" view

use crate::dataset::fact_columns::{CUSTOMER_ID, CUSTOMER_STATE};
use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

pub const CUSTOMER_COUNT_COLUMN: &str = "customer_count";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCustomerCount {
    pub state: String,
    pub customer_count: u64,
    /// Set on exactly one row: the first state (in key order) at the maximum
    pub is_max: bool,
}

/// Distinct customers per state, sorted descending by count
pub fn state_customer_counts(facts: &DataFrame) -> Result<Vec<StateCustomerCount>> {
    let grouped = facts
        .clone()
        .lazy()
        .select([
            col(CUSTOMER_STATE).cast(DataType::String),
            col(CUSTOMER_ID).cast(DataType::String),
        ])
        .filter(col(CUSTOMER_STATE).is_not_null())
        .group_by([col(CUSTOMER_STATE)])
        .agg([col(CUSTOMER_ID)
            .drop_nulls()
            .n_unique()
            .cast(DataType::UInt64)
            .alias(CUSTOMER_COUNT_COLUMN)])
        .collect()?;

    let states = grouped.column(CUSTOMER_STATE)?.str()?;
    let counts = grouped.column(CUSTOMER_COUNT_COLUMN)?.u64()?;

    let mut rows: Vec<StateCustomerCount> = states
        .into_iter()
        .zip(counts.into_iter())
        .filter_map(|(state, count)| {
            state.map(|s| StateCustomerCount {
                state: s.to_string(),
                customer_count: count.unwrap_or(0),
                is_max: false,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.state.cmp(&b.state));

    flag_first_maximum(&mut rows);
    rows.sort_by(|a, b| b.customer_count.cmp(&a.customer_count));

    Ok(rows)
}

/// Index-of-maximum selection: ties resolve to the earliest row
fn flag_first_maximum(rows: &mut [StateCustomerCount]) {
    let mut best: Option<usize> = None;
    for (idx, row) in rows.iter().enumerate() {
        match best {
            Some(b) if rows[b].customer_count >= row.customer_count => {}
            _ => best = Some(idx),
        }
    }
    if let Some(idx) = best {
        rows[idx].is_max = true;
    }
}
