//! FILENAME: analytics-engine/src/crosstab.rs
//! Cross-tabulation of two categorical fields.
//!
//! Algorithm:
//! 1. Intern primary and secondary values in first-seen order
//! 2. Tally each (primary, secondary) pair into a per-row count vector
//! 3. Pad every row to the full column set so all rows share one shape
//! 4. Sort rows by total descending (stable: ties keep first-seen order)

use records::{log_debug, RecordField, UserRecord};

use crate::tally::ValueInterner;
use crate::view::{ColumnCounts, CrossTab, CrossTabRow};

/// Counts records jointly by `primary` and `secondary`.
///
/// Records with an empty value in either field are left out.
pub fn cross_tabulate(
    records: &[UserRecord],
    primary: RecordField,
    secondary: RecordField,
) -> CrossTab {
    let mut groups = ValueInterner::new();
    let mut columns = ValueInterner::new();
    let mut counts: Vec<ColumnCounts> = Vec::new();
    let mut skipped = 0usize;

    for record in records {
        let group = primary.text(record);
        let column = secondary.text(record);
        if group.is_empty() || column.is_empty() {
            skipped += 1;
            continue;
        }

        let row = groups.intern(&group) as usize;
        let col = columns.intern(&column) as usize;
        if row == counts.len() {
            counts.push(ColumnCounts::new());
        }
        let row_counts = &mut counts[row];
        if row_counts.len() <= col {
            row_counts.resize(col + 1, 0);
        }
        row_counts[col] += 1;
    }

    let width = columns.len();
    let mut rows: Vec<CrossTabRow> = groups
        .into_values()
        .into_iter()
        .zip(counts)
        .map(|(group_name, mut counts)| {
            counts.resize(width, 0);
            let total = counts.iter().sum();
            CrossTabRow {
                group_name,
                counts,
                total,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total));

    log_debug!(
        "AGG",
        "cross_tabulate primary={} secondary={} records={} rows={} columns={} skipped={}",
        primary,
        secondary,
        records.len(),
        rows.len(),
        width,
        skipped
    );

    CrossTab {
        columns: columns.into_values(),
        rows,
    }
}
