//! Dashboard Aggregation
//!
//! The derived numbers behind the dashboard: overall totals, per-category
//! rollups, chart-ready slices and the display formatting rules. Everything
//! here is a pure, total function over the fetched transaction list,
//! recomputed on every render; the empty list yields zero totals and no
//! slices.

pub mod charts;
pub mod format;
pub mod summary;

pub use charts::{category_slices, income_expense_slices, percent, CategorySlice, ChartSlice, PALETTE};
pub use format::{format_currency, relative_date};
pub use summary::{category_rollup, totals, CategoryRollup, Totals};
