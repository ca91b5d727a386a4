//! FILENAME: table-view/src/view.rs
//! Table View - The visible page handed to presentation.
//!
//! Derived on every query and never cached across input changes; it borrows
//! the records it shows from the caller's snapshot.

use serde::Serialize;
use records::UserRecord;

/// One page of the filtered and sorted records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResult<'a> {
    /// Records on the requested page, in sorted order. Empty past the last page.
    pub visible_records: Vec<&'a UserRecord>,
    /// Matches before pagination.
    pub total_match_count: usize,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
}

impl<'a> ViewResult<'a> {
    pub fn is_empty(&self) -> bool {
        self.visible_records.is_empty()
    }

    /// 1-based position of the first visible record, or 0 for an empty page.
    pub fn first_row_number(&self) -> usize {
        if self.visible_records.is_empty() {
            0
        } else {
            self.page_index * self.page_size + 1
        }
    }

    /// 1-based position of the last visible record, or 0 for an empty page.
    pub fn last_row_number(&self) -> usize {
        if self.visible_records.is_empty() {
            0
        } else {
            self.page_index * self.page_size + self.visible_records.len()
        }
    }
}
