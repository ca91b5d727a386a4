//! FILENAME: analytics-engine/src/lib.rs
//! Analytics aggregation for the user dashboard.
//!
//! Every aggregator is a pure function of (records, parameters): no hidden
//! state and no recomputation triggers, so a render layer, a test, or a batch
//! job can call them directly. It depends on `records` for the record model,
//! field accessors, and errors.
//!
//! Layers:
//! - `definition`: Serializable parameters (buckets, top-N policy, KPI fields)
//! - `tally`: First-seen value interning and counting (HOW we group)
//! - `view`: Result shapes for charts and cards (WHAT we display)
//! - `buckets`, `categorical`, `crosstab`, `kpi`: The aggregators
//! - `config`, `dashboard`: Whole-dashboard composition and memoization

pub mod definition;
pub mod tally;
pub mod view;
pub mod buckets;
pub mod categorical;
pub mod crosstab;
pub mod kpi;
pub mod config;
pub mod dashboard;

pub use definition::*;
pub use view::*;
pub use buckets::{bucket_counts, bucket_counts_by};
pub use categorical::{rank_categories, top_categories, top_n_with_others, OTHERS_LABEL};
pub use crosstab::cross_tabulate;
pub use kpi::{average, binary_share, compute_kpis, dominant_category, percent_of};
pub use config::{CategoryChart, CrossTabSpec, DashboardConfig};
pub use dashboard::{compute_dashboard, DashboardMemo, DashboardView};
