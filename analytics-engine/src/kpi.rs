//! FILENAME: analytics-engine/src/kpi.rs
//! KPI computation: summary scalars for the dashboard cards.
//!
//! `total_count` is supplied by the caller (the remote dataset size) while
//! every other figure is computed over the local sample. The two are kept
//! apart on purpose; a truncated sample is not rescaled to the total.

use records::{log_debug, log_warn, AnalyticsError, RecordField, Result, UserRecord};

use crate::definition::KpiFields;
use crate::tally::CategoryTally;
use crate::view::{DominantCategory, KpiSummary, ShareSplit};

/// `round(count / size * 100)`, halves rounding up.
pub fn percent_of(count: usize, size: usize) -> u32 {
    if size == 0 {
        return 0;
    }
    ((count as f64 / size as f64) * 100.0).round() as u32
}

/// Arithmetic mean of the numeric `field` over `records`.
pub fn average(records: &[UserRecord], field: RecordField) -> Result<f64> {
    field.require_numeric()?;
    if records.is_empty() {
        log_warn!("KPI", "average requested over empty sample field={}", field);
        return Err(AnalyticsError::empty_input("average"));
    }
    let sum: f64 = records.iter().filter_map(|r| field.number(r)).sum();
    Ok(sum / records.len() as f64)
}

/// Share of records whose `field` equals `primary_value`, and its complement.
///
/// The secondary percentage is `100 - primary`, so the pair always sums to
/// exactly 100 regardless of rounding.
pub fn binary_share(
    records: &[UserRecord],
    field: RecordField,
    primary_value: &str,
) -> Result<ShareSplit> {
    if records.is_empty() {
        log_warn!("KPI", "binary_share requested over empty sample field={}", field);
        return Err(AnalyticsError::empty_input("binary share"));
    }
    let primary_count = records
        .iter()
        .filter(|r| field.text(r) == primary_value)
        .count();
    let primary_percent = percent_of(primary_count, records.len());
    Ok(ShareSplit {
        primary_count,
        primary_percent,
        secondary_percent: 100 - primary_percent,
    })
}

/// The largest non-empty group of `field`; ties go to the first seen.
/// The percentage is taken over the whole sample.
pub fn dominant_category(records: &[UserRecord], field: RecordField) -> Result<DominantCategory> {
    let tally = CategoryTally::from_records(records, field);
    let Some((name, count)) = tally.top() else {
        log_warn!("KPI", "dominant_category has no groups field={} records={}", field, records.len());
        return Err(AnalyticsError::empty_input("dominant category"));
    };
    Ok(DominantCategory {
        name: name.to_string(),
        count,
        percent: percent_of(count, records.len()),
    })
}

/// Computes every KPI card value. Fails on an empty sample.
pub fn compute_kpis(
    records: &[UserRecord],
    total_count: usize,
    fields: &KpiFields,
) -> Result<KpiSummary> {
    fields.validate()?;

    let average_value = average(records, fields.numeric)?;
    let share = binary_share(records, fields.binary, &fields.primary_value)?;
    let dominant = dominant_category(records, fields.dominant)?;

    log_debug!(
        "KPI",
        "compute_kpis total={} sample={} avg={:.2} primary={}% dominant={} ({}%)",
        total_count,
        records.len(),
        average_value,
        share.primary_percent,
        dominant.name,
        dominant.percent
    );

    Ok(KpiSummary {
        total_count,
        sample_size: records.len(),
        average_value,
        primary_share_percent: share.primary_percent,
        secondary_share_percent: share.secondary_percent,
        dominant_category_name: dominant.name,
        dominant_category_percent: dominant.percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: u64, age: u32, gender: &str, country: &str) -> UserRecord {
        UserRecord::new(id, "A", "B", "a@b", age, gender).with_address(country, "")
    }

    #[test]
    fn average_over_sample() {
        let data = vec![person(1, 20, "male", "US"), person(2, 31, "female", "US")];
        assert_eq!(average(&data, RecordField::Age).unwrap(), 25.5);
    }

    #[test]
    fn average_of_empty_sample_is_an_error() {
        let err = average(&[], RecordField::Age).unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyInput { .. }));
    }

    #[test]
    fn shares_sum_to_one_hundred_despite_rounding() {
        // 1/3 = 33.3% and 2/3 = 66.7% would round to 33 + 67 independently,
        // but 2 of 3 male rounds to 67 and the complement is 33.
        let data = vec![person(1, 20, "male", "US"), person(2, 20, "male", "US"), person(3, 20, "female", "US")];
        let split = binary_share(&data, RecordField::Gender, "male").unwrap();
        assert_eq!(split.primary_percent, 67);
        assert_eq!(split.secondary_percent, 33);

        // 1 of 8 = 12.5 rounds up to 13, complement 87
        let mut data: Vec<UserRecord> = (0..7).map(|i| person(i, 20, "female", "US")).collect();
        data.push(person(7, 20, "male", "US"));
        let split = binary_share(&data, RecordField::Gender, "male").unwrap();
        assert_eq!(split.primary_percent + split.secondary_percent, 100);
        assert_eq!(split.primary_percent, 13);
    }

    #[test]
    fn dominant_category_ties_go_to_first_seen() {
        let data = vec![
            person(1, 20, "male", "Canada"),
            person(2, 20, "male", "Brazil"),
            person(3, 20, "male", "Brazil"),
            person(4, 20, "male", "Canada"),
        ];
        let top = dominant_category(&data, RecordField::Country).unwrap();
        assert_eq!(top.name, "Canada");
        assert_eq!(top.percent, 50);
    }

    #[test]
    fn dominant_category_of_empty_sample_is_an_error() {
        let err = dominant_category(&[], RecordField::Country).unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyInput { .. }));
    }

    #[test]
    fn dominant_category_with_only_empty_keys_is_an_error() {
        let data = vec![person(1, 20, "male", ""), person(2, 30, "female", "")];
        let err = dominant_category(&data, RecordField::Country).unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyInput { computation: "dominant category" }));

        // the KPI summary fails the same way although the sample is non-empty
        let err = compute_kpis(&data, 2, &KpiFields::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyInput { .. }));
    }

    #[test]
    fn dominant_percent_counts_empty_keys_in_the_sample() {
        let data = vec![person(1, 20, "male", "Peru"), person(2, 20, "male", ""), person(3, 20, "male", ""), person(4, 20, "male", "")];
        let top = dominant_category(&data, RecordField::Country).unwrap();
        assert_eq!(top.name, "Peru");
        assert_eq!(top.count, 1);
        assert_eq!(top.percent, 25);
    }

    #[test]
    fn total_count_is_taken_from_the_caller() {
        let data = vec![person(1, 40, "female", "US"), person(2, 30, "male", "US")];
        let kpis = compute_kpis(&data, 208, &KpiFields::default()).unwrap();
        assert_eq!(kpis.total_count, 208);
        assert_eq!(kpis.sample_size, 2);
        assert_eq!(kpis.average_value, 35.0);
        assert_eq!(kpis.primary_share_percent, 50);
        assert_eq!(kpis.dominant_category_name, "US");
        assert_eq!(kpis.dominant_category_percent, 100);
    }

    #[test]
    fn kpis_over_empty_sample_fail() {
        let err = compute_kpis(&[], 208, &KpiFields::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyInput { .. }));
    }
}
