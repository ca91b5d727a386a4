//! FILENAME: analytics-engine/src/config.rs
//! Dashboard configuration.
//!
//! Every field has a default matching the stock dashboard, so an empty JSON
//! object is a complete configuration. `validate` is run on load and again
//! by `compute_dashboard`; invalid values are programmer errors and are
//! reported, never corrected.

use serde::{Deserialize, Serialize};
use records::{log_info, AnalyticsError, RecordField, Result};

use crate::definition::{BucketSet, KpiFields, OthersPolicy};

/// A ranked category chart. `top_n == None` keeps the full ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChart {
    pub field: RecordField,
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub others: OthersPolicy,
}

impl CategoryChart {
    pub fn full(field: RecordField) -> Self {
        CategoryChart {
            field,
            top_n: None,
            others: OthersPolicy::Collapse,
        }
    }

    pub fn top(field: RecordField, top_n: usize, others: OthersPolicy) -> Self {
        CategoryChart {
            field,
            top_n: Some(top_n),
            others,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == Some(0) {
            return Err(AnalyticsError::invalid(format!(
                "chart over '{}' has top_n 0",
                self.field
            )));
        }
        Ok(())
    }
}

/// A two-field cross-tabulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTabSpec {
    pub primary: RecordField,
    pub secondary: RecordField,
}

/// Everything the dashboard computes and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    /// Numeric field histogrammed by `buckets`.
    pub bucket_field: RecordField,
    pub buckets: BucketSet,
    /// Secondary field of the split histogram.
    pub bucket_split: RecordField,
    /// Pie of the state distribution.
    pub state_distribution: CategoryChart,
    /// Bar chart of the largest countries.
    pub country_ranking: CategoryChart,
    pub department_headcount: CategoryChart,
    /// Gender ratio pie.
    pub binary_ratio: CategoryChart,
    pub cross_tab: CrossTabSpec,
    pub kpi: KpiFields,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            bucket_field: RecordField::Age,
            buckets: BucketSet::default_age_buckets(),
            bucket_split: RecordField::Gender,
            state_distribution: CategoryChart::top(RecordField::State, 6, OthersPolicy::Collapse),
            country_ranking: CategoryChart::top(RecordField::Country, 8, OthersPolicy::Truncate),
            department_headcount: CategoryChart::full(RecordField::Department),
            binary_ratio: CategoryChart::full(RecordField::Gender),
            cross_tab: CrossTabSpec {
                primary: RecordField::Department,
                secondary: RecordField::Gender,
            },
            kpi: KpiFields::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        log_info!(
            "DASH",
            "loaded dashboard config buckets={} state_top={:?} country_top={:?}",
            config.buckets.len(),
            config.state_distribution.top_n,
            config.country_ranking.top_n
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.bucket_field.require_numeric()?;
        self.state_distribution.validate()?;
        self.country_ranking.validate()?;
        self.department_headcount.validate()?;
        self.binary_ratio.validate()?;
        self.kpi.validate()?;
        Ok(())
    }
}
