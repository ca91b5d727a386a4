//! FILENAME: analytics-engine/src/view.rs
//! Aggregation View - The computed shapes handed to charts and KPI cards.
//!
//! Everything here is a derived value: recomputed from a record snapshot and
//! parameters, never mutated afterwards, and serializable so presentation can
//! consume it directly.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Per-column counts. Most secondary dimensions (gender) have two values.
pub type ColumnCounts = SmallVec<[usize; 4]>;

// ============================================================================
// CATEGORIES
// ============================================================================

/// A named group and its record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
    /// True only for the synthetic "Others" entry produced by top-N collapsing,
    /// so a real group that happens to be called "Others" stays distinguishable.
    #[serde(default)]
    pub is_others: bool,
}

impl CategoryCount {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        CategoryCount {
            name: name.into(),
            count,
            is_others: false,
        }
    }
}

// ============================================================================
// HISTOGRAMS
// ============================================================================

/// Count of records inside one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketCount {
    pub label: String,
    pub min: i64,
    pub max: Option<i64>,
    pub count: usize,
}

/// Bucket counts in bucket declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    pub buckets: Vec<BucketCount>,
    /// Records whose value fell outside every bucket or was missing.
    pub excluded: usize,
}

impl Histogram {
    /// Sum of all bucket counts.
    pub fn counted(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// One bucket of a histogram split by a secondary field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitBucketCount {
    pub label: String,
    pub min: i64,
    pub max: Option<i64>,
    /// Every in-range record, including those with an empty secondary value.
    pub total: usize,
    /// Counts aligned with `SplitHistogram::series`.
    pub counts: ColumnCounts,
}

/// Bucket counts broken down by the values of a secondary field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitHistogram {
    /// Secondary values in first-seen order; the same for every bucket.
    pub series: Vec<String>,
    pub buckets: Vec<SplitBucketCount>,
    pub excluded: usize,
}

impl SplitHistogram {
    /// Count of `series_value` in bucket `bucket_index`; zero when either is unknown.
    pub fn count(&self, bucket_index: usize, series_value: &str) -> usize {
        let Some(col) = self.series.iter().position(|s| s == series_value) else {
            return 0;
        };
        self.buckets
            .get(bucket_index)
            .and_then(|b| b.counts.get(col).copied())
            .unwrap_or(0)
    }
}

// ============================================================================
// CROSS-TABULATION
// ============================================================================

/// One primary group with its counts along every secondary column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTabRow {
    pub group_name: String,
    /// Counts aligned with `CrossTab::columns`; zero where a pair never occurs.
    pub counts: ColumnCounts,
    /// Sum of `counts`.
    pub total: usize,
}

/// Rows sorted by total descending, over a column set shared by every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTab {
    pub columns: Vec<String>,
    pub rows: Vec<CrossTabRow>,
}

impl CrossTab {
    pub fn row(&self, group_name: &str) -> Option<&CrossTabRow> {
        self.rows.iter().find(|r| r.group_name == group_name)
    }

    /// Count for a `(group, column)` pair; `None` when either is unknown.
    pub fn count(&self, group_name: &str, column: &str) -> Option<usize> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.row(group_name).and_then(|r| r.counts.get(col).copied())
    }
}

// ============================================================================
// KPI
// ============================================================================

/// Complementary percentages of a binary field. Always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareSplit {
    pub primary_count: usize,
    pub primary_percent: u32,
    pub secondary_percent: u32,
}

/// The largest group of a categorical field and its share of the sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DominantCategory {
    pub name: String,
    pub count: usize,
    pub percent: u32,
}

/// Summary scalars for the KPI cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    /// Caller-supplied authoritative total; not derived from the sample.
    pub total_count: usize,
    /// Number of records the sample statistics below were computed over.
    pub sample_size: usize,
    pub average_value: f64,
    pub primary_share_percent: u32,
    pub secondary_share_percent: u32,
    pub dominant_category_name: String,
    pub dominant_category_percent: u32,
}
