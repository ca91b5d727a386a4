//! FILENAME: analytics-engine/src/dashboard.rs
//! Dashboard composition - every chart and card computed from one snapshot.
//!
//! Aggregation errors are local: a KPI failure (empty sample) leaves
//! `kpis` empty and is logged, while the charts are still produced.
//! Configuration errors are not local and fail the whole computation.

use serde::{Deserialize, Serialize};
use records::{log_enter, log_exit, log_warn, RecordSnapshot, Result};

use crate::buckets::{bucket_counts, bucket_counts_by};
use crate::categorical::{collapse_ranked, rank_categories};
use crate::config::{CategoryChart, DashboardConfig};
use crate::crosstab::cross_tabulate;
use crate::kpi::compute_kpis;
use crate::view::{CategoryCount, CrossTab, Histogram, KpiSummary, SplitHistogram};

/// All derived data for one render of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Generation of the snapshot this view was computed from.
    pub generation: u64,
    pub total_count: usize,
    pub sample_size: usize,
    pub histogram: Histogram,
    pub split_histogram: SplitHistogram,
    pub state_distribution: Vec<CategoryCount>,
    pub country_ranking: Vec<CategoryCount>,
    pub department_headcount: Vec<CategoryCount>,
    pub binary_ratio: Vec<CategoryCount>,
    pub cross_tab: CrossTab,
    /// `None` when the sample is empty.
    pub kpis: Option<KpiSummary>,
}

fn category_chart(snapshot: &RecordSnapshot, chart: &CategoryChart) -> Vec<CategoryCount> {
    let ranked = rank_categories(snapshot.records(), chart.field);
    match chart.top_n {
        Some(top_n) => collapse_ranked(ranked, top_n, chart.others),
        None => ranked,
    }
}

/// Computes the full dashboard for `snapshot`.
pub fn compute_dashboard(snapshot: &RecordSnapshot, config: &DashboardConfig) -> Result<DashboardView> {
    log_enter!(
        "DASH",
        "compute_dashboard",
        "generation={} sample={} total={}",
        snapshot.generation(),
        snapshot.sample_size(),
        snapshot.total()
    );
    config.validate()?;

    let records = snapshot.records();
    let histogram = bucket_counts(records, &config.buckets, config.bucket_field)?;
    let split_histogram =
        bucket_counts_by(records, &config.buckets, config.bucket_field, config.bucket_split)?;

    let kpis = match compute_kpis(records, snapshot.total(), &config.kpi) {
        Ok(summary) => Some(summary),
        Err(e) => {
            log_warn!("DASH", "KPI summary unavailable: {}", e);
            None
        }
    };

    let view = DashboardView {
        generation: snapshot.generation(),
        total_count: snapshot.total(),
        sample_size: snapshot.sample_size(),
        histogram,
        split_histogram,
        state_distribution: category_chart(snapshot, &config.state_distribution),
        country_ranking: category_chart(snapshot, &config.country_ranking),
        department_headcount: category_chart(snapshot, &config.department_headcount),
        binary_ratio: category_chart(snapshot, &config.binary_ratio),
        cross_tab: cross_tabulate(records, config.cross_tab.primary, config.cross_tab.secondary),
        kpis,
    };

    log_exit!(
        "DASH",
        "compute_dashboard",
        "kpis={} cross_tab_rows={}",
        view.kpis.is_some(),
        view.cross_tab.rows.len()
    );
    Ok(view)
}

// ============================================================================
// MEMOIZATION
// ============================================================================

/// Caches the last dashboard keyed by (snapshot generation, configuration).
#[derive(Debug, Default)]
pub struct DashboardMemo {
    entry: Option<(u64, DashboardConfig, DashboardView)>,
    hits: u64,
    misses: u64,
}

impl DashboardMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached view when the key matches, else recomputes.
    pub fn get_or_compute(
        &mut self,
        snapshot: &RecordSnapshot,
        config: &DashboardConfig,
    ) -> Result<&DashboardView> {
        let entry = match self.entry.take() {
            Some(entry) if entry.0 == snapshot.generation() && entry.1 == *config => {
                self.hits += 1;
                entry
            }
            _ => {
                self.misses += 1;
                let view = compute_dashboard(snapshot, config)?;
                (snapshot.generation(), config.clone(), view)
            }
        };
        let (_, _, view) = self.entry.insert(entry);
        Ok(view)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
