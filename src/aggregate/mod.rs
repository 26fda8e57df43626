//! Aggregation engine
//!
//! Pure functions from the read-only input tables to the small derived tables
//! each view displays. Nothing here is cached; every call recomputes.

pub mod categories;
pub mod coordinates;
pub mod monthly;
pub mod states;

pub use categories::{
    category_totals, rank_categories, top_bottom_categories, CategoryCount, CategoryRanking, RankOrder,
};
pub use coordinates::{coordinate_bounds, valid_coordinates, valid_coordinates_frame, Coordinate, CoordinateBounds};
pub use monthly::{monthly_order_counts, orders_per_bucket, MonthlyOrderCount};
pub use states::{state_customer_counts, StateCustomerCount};
