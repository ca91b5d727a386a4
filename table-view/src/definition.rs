//! FILENAME: table-view/src/definition.rs
//! Table View Definition - Serializable view-state and configuration.
//!
//! This is the "source of truth" for what the table shows: the filter
//! criteria, the active sort, and the current page. It is persisted as JSON
//! and handed unchanged to `compute_view`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use records::{AnalyticsError, RecordField, Result};

// ============================================================================
// SORTING
// ============================================================================

/// The columns the table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Full name. Also read as "firstName", the key the directory page sorts on.
    #[serde(alias = "firstName", alias = "fullName")]
    Name,
    Email,
    Age,
    #[serde(alias = "address.country")]
    Country,
}

impl SortKey {
    /// The record field this key extracts.
    pub fn field(self) -> RecordField {
        match self {
            SortKey::Name => RecordField::FullName,
            SortKey::Email => RecordField::Email,
            SortKey::Age => RecordField::Age,
            SortKey::Country => RecordField::Country,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Email => "email",
            SortKey::Age => "age",
            SortKey::Country => "country",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = AnalyticsError;

    /// Accepts exactly the names serde accepts.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" | "firstName" | "fullName" => Ok(SortKey::Name),
            "email" => Ok(SortKey::Email),
            "age" => Ok(SortKey::Age),
            "country" | "address.country" => Ok(SortKey::Country),
            other => Err(AnalyticsError::invalid(format!("unknown sort key '{}'", other))),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The single active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        SortSpec {
            key,
            direction: SortDirection::Ascending,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec::ascending(SortKey::Name)
    }
}

// ============================================================================
// FILTERING
// ============================================================================

/// Search text plus exact-match constraints, all ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of any searchable field. Empty matches all.
    pub search_text: String,
    /// Field -> required value. An absent field is unconstrained.
    pub exact_filters: BTreeMap<RecordField, String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.exact_filters.is_empty()
    }
}

// ============================================================================
// PAGINATION AND STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page_index: usize,
    /// Always greater than zero.
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        PaginationState {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Everything that decides which records are visible, in what order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    pub filter: FilterCriteria,
    pub sort: SortSpec,
    pub pagination: PaginationState,
}

impl ViewState {
    /// The initial state for a table with the given configuration.
    pub fn initial(config: &TableConfig) -> Self {
        ViewState {
            filter: FilterCriteria::default(),
            sort: config.default_sort,
            pagination: PaginationState {
                page_index: 0,
                page_size: config.default_page_size,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pagination.page_size == 0 {
            return Err(AnalyticsError::invalid("page size must be greater than zero"));
        }
        Ok(())
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes a rows-per-page selector offers.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 50];

/// Static table settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    /// Fields the search text is matched against.
    pub search_fields: Vec<RecordField>,
    pub default_sort: SortSpec,
    pub default_page_size: usize,
    /// When non-empty, the only page sizes `set_page_size` accepts.
    /// Empty accepts any positive size.
    pub allowed_page_sizes: Vec<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            search_fields: vec![RecordField::FullName, RecordField::Email],
            default_sort: SortSpec::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
            allowed_page_sizes: Vec::new(),
        }
    }
}

impl TableConfig {
    /// Default settings restricted to the selector's page sizes.
    pub fn with_page_size_options() -> Self {
        TableConfig {
            allowed_page_sizes: PAGE_SIZE_OPTIONS.to_vec(),
            ..TableConfig::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.allowed_page_sizes.iter().any(|&size| size == 0) {
            return Err(AnalyticsError::invalid("page sizes must be greater than zero"));
        }
        if self.default_page_size == 0 {
            return Err(AnalyticsError::invalid("default page size must be greater than zero"));
        }
        if !self.allowed_page_sizes.is_empty()
            && !self.allowed_page_sizes.contains(&self.default_page_size)
        {
            return Err(AnalyticsError::invalid(format!(
                "default page size {} is not one of {:?}",
                self.default_page_size, self.allowed_page_sizes
            )));
        }
        Ok(())
    }

    /// Whether `size` may be selected. An empty list allows any positive size.
    pub fn allows_page_size(&self, size: usize) -> bool {
        size > 0 && (self.allowed_page_sizes.is_empty() || self.allowed_page_sizes.contains(&size))
    }
}
