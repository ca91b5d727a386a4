//! FILENAME: table-view/src/lib.rs
//! Filterable, sortable, paginated table over user records.
//!
//! The whole view-state (search, exact filters, sort, page) is one
//! serializable `ViewState`; `compute_view` is a pure function of
//! (records, state, config). `TableViewEngine` wraps a state and applies the
//! transitions a directory page needs. It depends on `records` for the
//! record model, field accessors, and errors.
//!
//! Layers:
//! - `definition`: Serializable view-state and table configuration (what the table IS)
//! - `view`: The visible page handed to presentation (WHAT we display)
//! - `engine`: Filtering, sorting, pagination, and state transitions (HOW we compute)

pub mod definition;
pub mod view;
pub mod engine;

pub use definition::*;
pub use view::ViewResult;
pub use engine::{compute_view, filter_options, TableViewEngine};
