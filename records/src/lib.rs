//! FILENAME: records/src/lib.rs
//! PURPOSE: Shared types for the analytics crates.
//! CONTEXT: Holds the user record model, field accessors, the snapshot handed
//! over by the record store, the error taxonomy, and the logging macros.
//! `analytics-engine` and `table-view` depend on this crate only for types.

pub mod error;
pub mod field;
pub mod logging;
pub mod record;
pub mod store;

pub use error::{AnalyticsError, Result};
pub use field::RecordField;
pub use record::{Address, Company, UserId, UserRecord};
pub use store::{LoadStatus, RecordSnapshot, UsersResponse};
