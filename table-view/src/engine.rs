//! FILENAME: table-view/src/engine.rs
//! Table View Engine - Filter, sort, and paginate records for display.
//!
//! `compute_view` is a pure function of (records, state, config):
//! 1. Filter: search text over the configured fields AND every exact filter
//! 2. Sort: stable, case-insensitive for text keys
//! 3. Paginate: clamped slice, empty past the last page
//!
//! `TableViewEngine` owns one `ViewState` and applies the transitions of a
//! directory page. Every transition that changes the result set returns to
//! the first page.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use records::{log_debug, log_warn, AnalyticsError, RecordField, Result, UserRecord};

use crate::definition::{
    FilterCriteria, SortDirection, SortKey, SortSpec, TableConfig, ViewState,
};
use crate::view::ViewResult;

// ============================================================================
// PURE COMPUTATION
// ============================================================================

/// Comparable sort value of one record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Number(i64),
    Text(String),
}

fn sort_value(record: &UserRecord, key: SortKey) -> SortValue {
    let field = key.field();
    match field.integer(record) {
        Some(n) => SortValue::Number(n),
        None => SortValue::Text(field.text(record).to_lowercase()),
    }
}

/// Whether `record` passes every predicate of `filter`.
/// `needle` is the search text already lowercased.
fn matches(record: &UserRecord, needle: &str, filter: &FilterCriteria, config: &TableConfig) -> bool {
    let search_ok = needle.is_empty()
        || config
            .search_fields
            .iter()
            .any(|field| field.text(record).to_lowercase().contains(needle));
    if !search_ok {
        return false;
    }
    filter
        .exact_filters
        .iter()
        .all(|(field, required)| required.is_empty() || field.text(record) == required.as_str())
}

fn filter_records<'a>(
    records: &'a [UserRecord],
    filter: &FilterCriteria,
    config: &TableConfig,
) -> Vec<&'a UserRecord> {
    let needle = filter.search_text.to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, &needle, filter, config))
        .collect()
}

fn sort_records(rows: &mut [&UserRecord], sort: SortSpec) {
    // sort_by_cached_key keeps equal keys in input order
    match sort.direction {
        SortDirection::Ascending => rows.sort_by_cached_key(|r| sort_value(r, sort.key)),
        SortDirection::Descending => rows.sort_by_cached_key(|r| Reverse(sort_value(r, sort.key))),
    }
}

/// Computes the visible page for `state` over `records`.
///
/// Fails only for a zero page size; an out-of-range page index yields an
/// empty page with the correct match count.
pub fn compute_view<'a>(
    records: &'a [UserRecord],
    state: &ViewState,
    config: &TableConfig,
) -> Result<ViewResult<'a>> {
    state.validate()?;

    let mut rows = filter_records(records, &state.filter, config);
    sort_records(&mut rows, state.sort);

    let total_match_count = rows.len();
    let page_size = state.pagination.page_size;
    let page_index = state.pagination.page_index;
    let page_count = total_match_count.div_ceil(page_size);

    let start = page_index.saturating_mul(page_size).min(total_match_count);
    let end = start.saturating_add(page_size).min(total_match_count);
    let visible_records = rows[start..end].to_vec();

    log_debug!(
        "VIEW",
        "compute_view records={} matched={} page={}/{} visible={}",
        records.len(),
        total_match_count,
        page_index,
        page_count,
        visible_records.len()
    );

    Ok(ViewResult {
        visible_records,
        total_match_count,
        page_index,
        page_size,
        page_count,
    })
}

/// Distinct non-empty values of `field`, sorted. Feeds filter drop-downs.
pub fn filter_options(records: &[UserRecord], field: RecordField) -> Vec<String> {
    let values: BTreeSet<String> = records
        .iter()
        .map(|record| field.text(record))
        .filter(|value| !value.is_empty())
        .map(|value| value.into_owned())
        .collect();
    values.into_iter().collect()
}

// ============================================================================
// STATEFUL ENGINE
// ============================================================================

/// A table's view-state plus the transitions that drive it.
#[derive(Debug, Clone)]
pub struct TableViewEngine {
    config: TableConfig,
    state: ViewState,
}

impl Default for TableViewEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TableViewEngine {
    /// An engine with the default configuration in its initial state.
    pub fn new() -> Self {
        let config = TableConfig::default();
        let state = ViewState::initial(&config);
        TableViewEngine { config, state }
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        let state = ViewState::initial(&config);
        Ok(TableViewEngine { config, state })
    }

    /// Resumes from a previously saved state.
    pub fn with_state(config: TableConfig, state: ViewState) -> Result<Self> {
        config.validate()?;
        state.validate()?;
        Ok(TableViewEngine { config, state })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.filter.search_text = text.into();
        self.state.pagination.page_index = 0;
    }

    /// Sets or, with `None` or an empty value, removes the exact filter on `field`.
    pub fn set_exact_filter(&mut self, field: RecordField, value: Option<String>) {
        match value {
            Some(value) if !value.is_empty() => {
                self.state.filter.exact_filters.insert(field, value);
            }
            _ => {
                self.state.filter.exact_filters.remove(&field);
            }
        }
        self.state.pagination.page_index = 0;
    }

    /// Reselecting the active key flips its direction; a new key sorts ascending.
    pub fn set_sort(&mut self, key: SortKey) {
        let sort = &mut self.state.sort;
        if sort.key == key {
            sort.direction = sort.direction.toggled();
        } else {
            *sort = SortSpec::ascending(key);
        }
        self.state.pagination.page_index = 0;
    }

    /// Any index is accepted; pages past the end render empty.
    pub fn set_page(&mut self, page_index: usize) {
        self.state.pagination.page_index = page_index;
    }

    /// Any positive size, unless the config restricts the choice. Returns to
    /// the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if !self.config.allows_page_size(page_size) {
            log_warn!(
                "VIEW",
                "rejected page size {} (allowed {:?})",
                page_size,
                self.config.allowed_page_sizes
            );
            return Err(AnalyticsError::invalid(format!(
                "page size {} is not one of {:?}",
                page_size, self.config.allowed_page_sizes
            )));
        }
        self.state.pagination.page_size = page_size;
        self.state.pagination.page_index = 0;
        Ok(())
    }

    /// Drops the search text and every exact filter. Sort is kept.
    pub fn clear_filters(&mut self) {
        self.state.filter = FilterCriteria::default();
        self.state.pagination.page_index = 0;
    }

    pub fn has_filters(&self) -> bool {
        !self.state.filter.is_empty()
    }

    /// Computes the visible page over `records` for the current state.
    pub fn view<'a>(&self, records: &'a [UserRecord]) -> Result<ViewResult<'a>> {
        compute_view(records, &self.state, &self.config)
    }
}
