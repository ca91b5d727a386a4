//! FILENAME: tests/common/mod.rs
//! Fixtures for analytics-engine integration tests.

#![allow(dead_code)]

use records::{RecordSnapshot, UserRecord};

pub const DEPARTMENTS: [&str; 12] = [
    "Engineering",
    "Support",
    "Sales",
    "Marketing",
    "Legal",
    "Accounting",
    "Human Resources",
    "Product Management",
    "Research and Development",
    "Services",
    "Training",
    "Business Development",
];

pub const STATES: [&str; 10] = [
    "Alabama", "Ohio", "Texas", "Utah", "Iowa", "Maine", "Nevada", "Oregon", "Idaho", "Kansas",
];

const FIRST_NAMES: [&str; 10] = [
    "Emily", "Michael", "Sophia", "James", "Emma", "Olivia", "Alexander", "Ava", "Ethan", "Isabella",
];

const LAST_NAMES: [&str; 7] = ["Johnson", "Williams", "Brown", "Doe", "Garcia", "Miller", "Davis"];

/// One deterministic user. Ages step through 20..=59, 60% male,
/// departments cycle through all twelve, countries split 34/33/33.
pub fn user(i: usize) -> UserRecord {
    let first = FIRST_NAMES[i % FIRST_NAMES.len()];
    let last = LAST_NAMES[i % LAST_NAMES.len()];
    let email = format!("{}.{}{}@example.com", first.to_lowercase(), last.to_lowercase(), i + 1);
    let gender = if i % 5 < 3 { "male" } else { "female" };
    let country = match i % 3 {
        0 => "United States",
        1 => "Canada",
        _ => "India",
    };
    UserRecord::new((i + 1) as u64, first, last, &email, 20 + (i % 40) as u32, gender)
        .with_address(country, STATES[i % STATES.len()])
        .with_department(DEPARTMENTS[i % DEPARTMENTS.len()])
}

/// The standard 100-user sample.
pub fn sample_users() -> Vec<UserRecord> {
    (0..100).map(user).collect()
}

/// A ready snapshot over the sample with a larger remote total.
pub fn sample_snapshot() -> RecordSnapshot {
    RecordSnapshot::ready(sample_users(), 208)
}
