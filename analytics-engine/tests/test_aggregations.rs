//! FILENAME: tests/test_aggregations.rs
//! Integration tests for the aggregators over the 100-user sample.

mod common;

use analytics_engine::{
    bucket_counts, bucket_counts_by, compute_kpis, cross_tabulate, rank_categories,
    top_categories, top_n_with_others, Bucket, BucketSet, KpiFields, OthersPolicy,
};
use common::{sample_users, user, DEPARTMENTS};
use records::{AnalyticsError, RecordField, UserRecord};

// ============================================================================
// BUCKETS
// ============================================================================

#[test]
fn test_age_histogram_accounts_for_every_record() {
    let users = sample_users();
    let hist = bucket_counts(&users, &BucketSet::default_age_buckets(), RecordField::Age).unwrap();

    let counts: Vec<usize> = hist.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![15, 15, 15, 15, 10, 10, 20]);
    assert_eq!(hist.counted(), 100);
    assert_eq!(hist.excluded, 0);
}

#[test]
fn test_partial_buckets_sum_with_exclusions_to_input_size() {
    let users = sample_users();
    let buckets = BucketSet::new(vec![
        Bucket::new("early 20s", 20, 24),
        Bucket::new("late 30s", 35, 39),
        Bucket::new("40s", 40, 49),
    ])
    .unwrap();
    let hist = bucket_counts(&users, &buckets, RecordField::Age).unwrap();
    assert_eq!(hist.counted() + hist.excluded, users.len());
    assert_eq!(hist.excluded, 15 + 15 + 20);
}

#[test]
fn test_histogram_preserves_declaration_order() {
    let users: Vec<UserRecord> = (0..100).map(user).filter(|u| u.age >= 50).collect();
    let hist = bucket_counts(&users, &BucketSet::default_age_buckets(), RecordField::Age).unwrap();
    let labels: Vec<&str> = hist.buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["<25", "25–29", "30–34", "35–39", "40–44", "45–49", "50+"]);
    assert_eq!(hist.buckets[6].count, 20);
}

#[test]
fn test_age_by_gender_split() {
    let users = sample_users();
    let split = bucket_counts_by(
        &users,
        &BucketSet::default_age_buckets(),
        RecordField::Age,
        RecordField::Gender,
    )
    .unwrap();

    assert_eq!(split.series, vec!["male".to_string(), "female".to_string()]);
    for bucket in &split.buckets {
        assert_eq!(bucket.counts.len(), 2);
        assert_eq!(bucket.counts.iter().sum::<usize>(), bucket.total);
    }
    let male: usize = (0..split.buckets.len()).map(|i| split.count(i, "male")).sum();
    assert_eq!(male, 60);
}

// ============================================================================
// CATEGORIES
// ============================================================================

#[test]
fn test_twelve_departments_top_six_plus_others() {
    let users = sample_users();
    let top = top_n_with_others(&users, RecordField::Department, 6).unwrap();

    assert_eq!(top.len(), 7);
    assert!(top[6].is_others);
    assert_eq!(top[6].name, "Others");

    let top_six: usize = top[..6].iter().map(|c| c.count).sum();
    assert_eq!(top[6].count, 100 - top_six);
    assert_eq!(top.iter().map(|c| c.count).sum::<usize>(), 100);
}

#[test]
fn test_department_ties_follow_input_order() {
    let users = sample_users();
    let ranked = rank_categories(&users, RecordField::Department);
    assert_eq!(ranked.len(), 12);
    // 100 = 4 * 9 + 8 * 8: the first four departments seen have nine members
    let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, DEPARTMENTS.to_vec());
    assert_eq!(ranked[3].count, 9);
    assert_eq!(ranked[4].count, 8);
}

#[test]
fn test_others_present_iff_more_groups_than_top_n() {
    let users = sample_users();
    for top_n in 1..=14 {
        let top = top_n_with_others(&users, RecordField::Department, top_n).unwrap();
        let has_others = top.iter().any(|c| c.is_others);
        assert_eq!(has_others, 12 > top_n, "top_n={}", top_n);
        assert_eq!(top.iter().map(|c| c.count).sum::<usize>(), 100);
    }
}

#[test]
fn test_country_ranking_truncates_without_others() {
    let users = sample_users();
    let top = top_categories(&users, RecordField::Country, 2, OthersPolicy::Truncate).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "United States");
    assert_eq!(top[0].count, 34);
    assert!(top.iter().all(|c| !c.is_others));
}

#[test]
fn test_zero_top_n_is_invalid_parameter() {
    let err = top_n_with_others(&sample_users(), RecordField::State, 0).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidParameter(_)));
}

// ============================================================================
// CROSS-TAB
// ============================================================================

#[test]
fn test_department_by_gender_crosstab() {
    let users = sample_users();
    let tab = cross_tabulate(&users, RecordField::Department, RecordField::Gender);

    assert_eq!(tab.rows.len(), 12);
    assert_eq!(tab.columns.len(), 2);
    for row in &tab.rows {
        assert_eq!(row.counts.len(), tab.columns.len());
        assert_eq!(row.total, row.counts.iter().sum::<usize>());
    }
    for pair in tab.rows.windows(2) {
        assert!(pair[0].total >= pair[1].total);
    }
    assert_eq!(tab.rows.iter().map(|r| r.total).sum::<usize>(), 100);
}

// ============================================================================
// KPI
// ============================================================================

#[test]
fn test_kpis_over_sample() {
    let users = sample_users();
    let kpis = compute_kpis(&users, 208, &KpiFields::default()).unwrap();

    assert_eq!(kpis.total_count, 208);
    assert_eq!(kpis.sample_size, 100);
    // ages: 20..=39 three times each, 40..=59 twice each
    let expected = ((20..=39).sum::<u32>() * 3 + (40..=59).sum::<u32>() * 2) as f64 / 100.0;
    assert!((kpis.average_value - expected).abs() < 1e-9);
    assert_eq!(kpis.primary_share_percent, 60);
    assert_eq!(kpis.secondary_share_percent, 40);
    assert_eq!(kpis.dominant_category_name, "United States");
    assert_eq!(kpis.dominant_category_percent, 34);
}

#[test]
fn test_binary_shares_always_sum_to_one_hundred() {
    for size in 1..=60 {
        let users: Vec<UserRecord> = (0..size).map(user).collect();
        let kpis = compute_kpis(&users, size, &KpiFields::default()).unwrap();
        assert_eq!(
            kpis.primary_share_percent + kpis.secondary_share_percent,
            100,
            "size={}",
            size
        );
    }
}
