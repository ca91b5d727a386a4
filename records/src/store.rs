//! FILENAME: records/src/store.rs
//! PURPOSE: Boundary types between the record store and the analytics core.
//! CONTEXT: The store fetches and caches elsewhere; the core only ever sees a
//! `RecordSnapshot`. The snapshot keeps the remote-reported `total` apart from
//! the locally available sample, since a page of 100 may stand for thousands.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::UserRecord;
use crate::log_debug;

/// Source of snapshot generations. Each built snapshot gets a fresh one.
static SNAPSHOT_GENERATION: AtomicU64 = AtomicU64::new(0);

fn next_generation() -> u64 {
    SNAPSHOT_GENERATION.fetch_add(1, Ordering::SeqCst) + 1
}

/// Response body of the user listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub users: Vec<UserRecord>,
    /// Size of the full remote dataset.
    pub total: usize,
    #[serde(default)]
    pub skip: usize,
    #[serde(default)]
    pub limit: usize,
}

/// Loading state reported alongside the data, consumed by presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

impl Default for LoadStatus {
    fn default() -> Self {
        LoadStatus::Loading
    }
}

/// An immutable view of the record store at one point in time.
///
/// Fields are read-only so a generation always names one record set. The
/// generation is never read from or written to JSON: every snapshot built,
/// including a deserialized one, draws a fresh generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// Records in the order the upstream source delivered them.
    records: Vec<UserRecord>,
    /// Authoritative remote count; may exceed `records.len()`.
    total: usize,
    status: LoadStatus,
    /// Identity of this snapshot, used as a memoization key.
    #[serde(skip, default = "next_generation")]
    generation: u64,
}

impl RecordSnapshot {
    /// A snapshot that is still waiting for data.
    pub fn loading() -> Self {
        RecordSnapshot {
            records: Vec::new(),
            total: 0,
            status: LoadStatus::Loading,
            generation: next_generation(),
        }
    }

    /// A snapshot for a failed load. Carries no records.
    pub fn failed(message: impl Into<String>) -> Self {
        RecordSnapshot {
            records: Vec::new(),
            total: 0,
            status: LoadStatus::Failed(message.into()),
            generation: next_generation(),
        }
    }

    /// A ready snapshot over the given sample and remote total.
    pub fn ready(records: Vec<UserRecord>, total: usize) -> Self {
        RecordSnapshot {
            records,
            total,
            status: LoadStatus::Ready,
            generation: next_generation(),
        }
    }

    pub fn from_response(response: UsersResponse) -> Self {
        log_debug!(
            "STORE",
            "snapshot from response users={} total={} skip={} limit={}",
            response.users.len(),
            response.total,
            response.skip,
            response.limit
        );
        Self::ready(response.users, response.total)
    }

    /// Parse a response body of the listing endpoint into a ready snapshot.
    pub fn from_json_str(body: &str) -> Result<Self> {
        let response: UsersResponse = serde_json::from_str(body)?;
        Ok(Self::from_response(response))
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn into_records(self) -> Vec<UserRecord> {
        self.records
    }

    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    pub fn sample_size(&self) -> usize {
        self.records.len()
    }

    /// True when only a page of the remote dataset is held locally.
    pub fn is_truncated(&self) -> bool {
        self.total > self.records.len()
    }
}
