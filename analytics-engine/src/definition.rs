//! FILENAME: analytics-engine/src/definition.rs
//! Aggregation Definition - The serializable parameters.
//!
//! This module contains the types needed to DESCRIBE an aggregation:
//! bucket layouts, top-N policies, and the fields a KPI summary reads.
//! These structures are designed to be:
//! - Serializable (for dashboard configuration files)
//! - Validated once, at construction or deserialization
//! - Immutable snapshots of caller intent

use serde::{Deserialize, Serialize};
use records::{AnalyticsError, RecordField, Result};

// ============================================================================
// BUCKETS
// ============================================================================

/// A labelled inclusive numeric range `[min, max]`.
/// `max == None` leaves the range open at the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Display label (e.g., "25–29").
    pub label: String,
    pub min: i64,
    #[serde(default)]
    pub max: Option<i64>,
}

impl Bucket {
    pub fn new(label: &str, min: i64, max: i64) -> Self {
        Bucket {
            label: label.to_string(),
            min,
            max: Some(max),
        }
    }

    /// A bucket with no upper bound (e.g., "50+").
    pub fn open(label: &str, min: i64) -> Self {
        Bucket {
            label: label.to_string(),
            min,
            max: None,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

/// An ordered, non-overlapping list of buckets.
///
/// Gaps between buckets are allowed; a value that falls into a gap, below
/// the first bucket, or above a closed last bucket belongs to no bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bucket>", into = "Vec<Bucket>")]
pub struct BucketSet {
    buckets: Vec<Bucket>,
}

impl BucketSet {
    /// Validates ordering and overlap. An empty list is rejected because the
    /// bucket list defines the output shape.
    pub fn new(buckets: Vec<Bucket>) -> Result<Self> {
        if buckets.is_empty() {
            return Err(AnalyticsError::invalid("bucket list must not be empty"));
        }
        for bucket in &buckets {
            if let Some(max) = bucket.max {
                if max < bucket.min {
                    return Err(AnalyticsError::invalid(format!(
                        "bucket '{}' has max {} below min {}",
                        bucket.label, max, bucket.min
                    )));
                }
            }
        }
        for pair in buckets.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            match prev.max {
                None => {
                    return Err(AnalyticsError::invalid(format!(
                        "open bucket '{}' must be the last bucket",
                        prev.label
                    )))
                }
                Some(max) if max >= next.min => {
                    return Err(AnalyticsError::invalid(format!(
                        "bucket '{}' overlaps or precedes '{}'",
                        next.label, prev.label
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(BucketSet { buckets })
    }

    /// The age layout of the dashboard histograms.
    pub fn default_age_buckets() -> Self {
        BucketSet {
            buckets: vec![
                Bucket::new("<25", 0, 24),
                Bucket::new("25–29", 25, 29),
                Bucket::new("30–34", 30, 34),
                Bucket::new("35–39", 35, 39),
                Bucket::new("40–44", 40, 44),
                Bucket::new("45–49", 45, 49),
                Bucket::open("50+", 50),
            ],
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Index of the bucket holding `value`, if any.
    pub fn find(&self, value: i64) -> Option<usize> {
        // Buckets are sorted by `min` and disjoint: only the last bucket
        // starting at or below `value` can contain it.
        let idx = self.buckets.partition_point(|b| b.min <= value);
        if idx == 0 {
            return None;
        }
        let candidate = idx - 1;
        if self.buckets[candidate].contains(value) {
            Some(candidate)
        } else {
            None
        }
    }
}

impl Default for BucketSet {
    fn default() -> Self {
        BucketSet::default_age_buckets()
    }
}

impl TryFrom<Vec<Bucket>> for BucketSet {
    type Error = AnalyticsError;

    fn try_from(buckets: Vec<Bucket>) -> Result<Self> {
        BucketSet::new(buckets)
    }
}

impl From<BucketSet> for Vec<Bucket> {
    fn from(set: BucketSet) -> Self {
        set.buckets
    }
}

// ============================================================================
// TOP-N
// ============================================================================

/// What happens to the groups ranked below the top N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OthersPolicy {
    /// Sum the tail into one trailing "Others" entry (omitted when zero).
    Collapse,
    /// Drop the tail.
    Truncate,
}

impl Default for OthersPolicy {
    fn default() -> Self {
        OthersPolicy::Collapse
    }
}

// ============================================================================
// KPI FIELDS
// ============================================================================

/// Which fields the KPI summary reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KpiFields {
    /// Field averaged into `average_value`.
    pub numeric: RecordField,
    /// Binary categorical field split into two percentages.
    pub binary: RecordField,
    /// Value of `binary` counted as the primary share.
    pub primary_value: String,
    /// Field whose largest group is reported as dominant.
    pub dominant: RecordField,
}

impl Default for KpiFields {
    fn default() -> Self {
        KpiFields {
            numeric: RecordField::Age,
            binary: RecordField::Gender,
            primary_value: "male".to_string(),
            dominant: RecordField::Country,
        }
    }
}

impl KpiFields {
    pub fn validate(&self) -> Result<()> {
        self.numeric.require_numeric()?;
        if self.primary_value.is_empty() {
            return Err(AnalyticsError::invalid("KPI primary value must not be empty"));
        }
        Ok(())
    }
}
