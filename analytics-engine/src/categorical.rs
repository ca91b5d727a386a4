//! FILENAME: analytics-engine/src/categorical.rs
//! Categorical aggregation: group by a field, rank by count, collapse the tail.

use records::{log_debug, log_warn, AnalyticsError, RecordField, Result, UserRecord};

use crate::definition::OthersPolicy;
use crate::tally::CategoryTally;
use crate::view::CategoryCount;

/// Name of the synthetic group holding everything ranked below the top N.
pub const OTHERS_LABEL: &str = "Others";

/// Every non-empty group of `field`, by count descending, ties in first-seen order.
pub fn rank_categories(records: &[UserRecord], field: RecordField) -> Vec<CategoryCount> {
    let tally = CategoryTally::from_records(records, field);
    log_debug!(
        "AGG",
        "rank_categories field={} records={} groups={} skipped_empty={}",
        field,
        records.len(),
        tally.len(),
        tally.skipped_empty()
    );
    ranked_counts(&tally)
}

/// The top `top_n` groups of `field`, with the tail handled per `policy`.
///
/// Under `OthersPolicy::Collapse` the counts of the result sum to the number
/// of records with a non-empty key, and an "Others" entry is present exactly
/// when more than `top_n` groups exist.
pub fn top_categories(
    records: &[UserRecord],
    field: RecordField,
    top_n: usize,
    policy: OthersPolicy,
) -> Result<Vec<CategoryCount>> {
    if top_n == 0 {
        log_warn!("AGG", "top_categories rejected top_n=0 field={}", field);
        return Err(AnalyticsError::invalid("top_n must be at least 1"));
    }
    let ranked = rank_categories(records, field);
    Ok(collapse_ranked(ranked, top_n, policy))
}

/// Top-N with the tail summed into "Others".
pub fn top_n_with_others(
    records: &[UserRecord],
    field: RecordField,
    top_n: usize,
) -> Result<Vec<CategoryCount>> {
    top_categories(records, field, top_n, OthersPolicy::Collapse)
}

fn ranked_counts(tally: &CategoryTally) -> Vec<CategoryCount> {
    tally
        .ranked_ids()
        .into_iter()
        .filter_map(|id| tally.value(id).map(|name| CategoryCount::new(name, tally.count(id))))
        .collect()
}

/// Keeps the first `top_n` entries of an already ranked list.
pub(crate) fn collapse_ranked(
    mut ranked: Vec<CategoryCount>,
    top_n: usize,
    policy: OthersPolicy,
) -> Vec<CategoryCount> {
    if ranked.len() <= top_n {
        return ranked;
    }
    let tail = ranked.split_off(top_n);
    if policy == OthersPolicy::Collapse {
        let remainder: usize = tail.iter().map(|c| c.count).sum();
        if remainder > 0 {
            ranked.push(CategoryCount {
                name: OTHERS_LABEL.to_string(),
                count: remainder,
                is_others: true,
            });
        }
    }
    ranked
}
