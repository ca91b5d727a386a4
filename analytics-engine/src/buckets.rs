//! FILENAME: analytics-engine/src/buckets.rs
//! Bucket aggregation: histogram of a numeric field over a fixed bucket list.
//!
//! Output always has one entry per declared bucket, in declaration order,
//! even when every count is zero. Records whose value is missing or falls
//! outside every bucket are tallied in `excluded` rather than rejected.

use records::{log_debug, RecordField, Result, UserRecord};

use crate::definition::BucketSet;
use crate::tally::ValueInterner;
use crate::view::{BucketCount, ColumnCounts, Histogram, SplitBucketCount, SplitHistogram};

/// Counts records per bucket of the numeric `field`.
pub fn bucket_counts(
    records: &[UserRecord],
    buckets: &BucketSet,
    field: RecordField,
) -> Result<Histogram> {
    field.require_numeric()?;

    let mut counts = vec![0usize; buckets.len()];
    let mut excluded = 0usize;

    for record in records {
        match field.integer(record).and_then(|v| buckets.find(v)) {
            Some(idx) => counts[idx] += 1,
            None => excluded += 1,
        }
    }

    log_debug!(
        "AGG",
        "bucket_counts field={} records={} buckets={} excluded={}",
        field,
        records.len(),
        buckets.len(),
        excluded
    );

    let buckets = buckets
        .buckets()
        .iter()
        .zip(counts)
        .map(|(bucket, count)| BucketCount {
            label: bucket.label.clone(),
            min: bucket.min,
            max: bucket.max,
            count,
        })
        .collect();

    Ok(Histogram { buckets, excluded })
}

/// Counts records per bucket of `field`, split by the values of `secondary`.
///
/// The series set is the union of non-empty `secondary` values over in-range
/// records, in first-seen order, applied to every bucket. A record with an
/// empty secondary value still counts toward its bucket's `total`.
pub fn bucket_counts_by(
    records: &[UserRecord],
    buckets: &BucketSet,
    field: RecordField,
    secondary: RecordField,
) -> Result<SplitHistogram> {
    field.require_numeric()?;

    let mut series = ValueInterner::new();
    let mut totals = vec![0usize; buckets.len()];
    let mut counts: Vec<ColumnCounts> = vec![ColumnCounts::new(); buckets.len()];
    let mut excluded = 0usize;

    for record in records {
        let Some(idx) = field.integer(record).and_then(|v| buckets.find(v)) else {
            excluded += 1;
            continue;
        };
        totals[idx] += 1;

        let value = secondary.text(record);
        if value.is_empty() {
            continue;
        }
        let col = series.intern(&value) as usize;
        let row = &mut counts[idx];
        if row.len() <= col {
            row.resize(col + 1, 0);
        }
        row[col] += 1;
    }

    // Pad every bucket to the full series width
    for row in &mut counts {
        row.resize(series.len(), 0);
    }

    log_debug!(
        "AGG",
        "bucket_counts_by field={} secondary={} records={} series={} excluded={}",
        field,
        secondary,
        records.len(),
        series.len(),
        excluded
    );

    let split = buckets
        .buckets()
        .iter()
        .zip(totals.into_iter().zip(counts))
        .map(|(bucket, (total, counts))| SplitBucketCount {
            label: bucket.label.clone(),
            min: bucket.min,
            max: bucket.max,
            total,
            counts,
        })
        .collect();

    Ok(SplitHistogram {
        series: series.into_values(),
        buckets: split,
        excluded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Bucket;
    use records::AnalyticsError;

    fn person(id: u64, age: u32, gender: &str) -> UserRecord {
        UserRecord::new(id, "A", "B", "a@b", age, gender)
    }

    #[test]
    fn empty_input_keeps_bucket_shape() {
        let hist = bucket_counts(&[], &BucketSet::default_age_buckets(), RecordField::Age).unwrap();
        assert_eq!(hist.buckets.len(), 7);
        assert!(hist.buckets.iter().all(|b| b.count == 0));
        assert_eq!(hist.buckets[0].label, "<25");
        assert_eq!(hist.buckets[6].label, "50+");
    }

    #[test]
    fn counts_inclusive_bounds() {
        let data = vec![person(1, 24, "male"), person(2, 25, "male"), person(3, 29, "female"), person(4, 80, "male")];
        let hist = bucket_counts(&data, &BucketSet::default_age_buckets(), RecordField::Age).unwrap();
        let counts: Vec<usize> = hist.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 2, 0, 0, 0, 0, 1]);
        assert_eq!(hist.excluded, 0);
    }

    #[test]
    fn out_of_range_values_are_excluded() {
        let buckets = BucketSet::new(vec![Bucket::new("20s", 20, 29), Bucket::new("30s", 30, 39)]).unwrap();
        let data = vec![person(1, 19, "male"), person(2, 20, "male"), person(3, 40, "male")];
        let hist = bucket_counts(&data, &buckets, RecordField::Age).unwrap();
        assert_eq!(hist.counted(), 1);
        assert_eq!(hist.excluded, 2);
        assert_eq!(hist.counted() + hist.excluded, data.len());
    }

    #[test]
    fn text_field_is_invalid_parameter() {
        let err = bucket_counts(&[], &BucketSet::default(), RecordField::Email).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidParameter(_)));
    }

    #[test]
    fn split_pads_every_bucket_to_all_series() {
        let data = vec![person(1, 22, "male"), person(2, 31, "female"), person(3, 33, "female"), person(4, 55, "")];
        let split = bucket_counts_by(&data, &BucketSet::default_age_buckets(), RecordField::Age, RecordField::Gender).unwrap();
        assert_eq!(split.series, vec!["male".to_string(), "female".to_string()]);
        assert!(split.buckets.iter().all(|b| b.counts.len() == 2));
        assert_eq!(split.count(0, "male"), 1);
        assert_eq!(split.count(0, "female"), 0);
        assert_eq!(split.count(2, "female"), 2);
        assert_eq!(split.buckets[6].total, 1);
        assert_eq!(split.buckets[6].counts.iter().sum::<usize>(), 0);
    }
}
