//! FILENAME: analytics-engine/src/tally.rs
//! Value interning and first-seen-ordered tallies.
//!
//! Each distinct key is stored once and referenced by a `ValueId` assigned in
//! order of first appearance. Ranking by count with a stable sort over ids
//! therefore breaks ties by first appearance, never alphabetically.

use rustc_hash::FxHashMap;
use records::{RecordField, UserRecord};

/// A reference to an interned value. Ids are dense and start at 0.
pub type ValueId = u32;

// ============================================================================
// VALUE INTERNER
// ============================================================================

/// Maps distinct strings to dense ids in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ValueInterner {
    /// Map from value to its id (for deduplication during build).
    value_to_id: FxHashMap<String, ValueId>,
    /// Values indexed by id.
    id_to_value: Vec<String>,
}

impl ValueInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `value`, assigning the next id on first sight.
    pub fn intern(&mut self, value: &str) -> ValueId {
        if let Some(&id) = self.value_to_id.get(value) {
            return id;
        }
        let id = self.id_to_value.len() as ValueId;
        self.id_to_value.push(value.to_string());
        self.value_to_id.insert(value.to_string(), id);
        id
    }

    pub fn get(&self, id: ValueId) -> Option<&str> {
        self.id_to_value.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.id_to_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_value.is_empty()
    }

    /// Consumes the interner, yielding values in id order.
    pub fn into_values(self) -> Vec<String> {
        self.id_to_value
    }
}

// ============================================================================
// CATEGORY TALLY
// ============================================================================

/// Occurrence counts per distinct non-empty key.
#[derive(Debug, Clone, Default)]
pub struct CategoryTally {
    interner: ValueInterner,
    /// Counts indexed by ValueId.
    counts: Vec<usize>,
    /// Records skipped because their key was empty.
    skipped_empty: usize,
}

impl CategoryTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies `field` across `records` in input order.
    pub fn from_records(records: &[UserRecord], field: RecordField) -> Self {
        let mut tally = CategoryTally::new();
        for record in records {
            tally.add(&field.text(record));
        }
        tally
    }

    /// Counts one occurrence of `key`. Empty keys are skipped.
    pub fn add(&mut self, key: &str) -> Option<ValueId> {
        if key.is_empty() {
            self.skipped_empty += 1;
            return None;
        }
        let id = self.interner.intern(key);
        if id as usize == self.counts.len() {
            self.counts.push(0);
        }
        self.counts[id as usize] += 1;
        Some(id)
    }

    pub fn count(&self, id: ValueId) -> usize {
        self.counts.get(id as usize).copied().unwrap_or(0)
    }

    pub fn value(&self, id: ValueId) -> Option<&str> {
        self.interner.get(id)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts (records with a non-empty key).
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn skipped_empty(&self) -> usize {
        self.skipped_empty
    }

    /// Ids sorted by count descending, ties in first-seen order.
    pub fn ranked_ids(&self) -> Vec<ValueId> {
        let mut ids: Vec<ValueId> = (0..self.counts.len() as ValueId).collect();
        // sort_by is stable and ids start in first-seen order
        ids.sort_by(|&a, &b| self.count(b).cmp(&self.count(a)));
        ids
    }

    /// The highest-count key, ties going to the first seen.
    pub fn top(&self) -> Option<(&str, usize)> {
        let mut best: Option<ValueId> = None;
        for id in 0..self.counts.len() as ValueId {
            match best {
                Some(b) if self.count(b) >= self.count(id) => {}
                _ => best = Some(id),
            }
        }
        best.and_then(|id| self.value(id).map(|v| (v, self.count(id))))
    }
}
