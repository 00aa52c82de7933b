//! careboard-core: query interpretation and aggregation pipeline
//!
//! Pure logic shared by the careboard server: the filter vocabulary,
//! extraction of filters from interpreter output, structured boolean
//! query construction, and summary statistics over patient records.
//! Everything here is synchronous and free of shared mutable state.

pub mod error;
pub mod filter;
pub mod query;
pub mod report;

pub use error::UnknownFilterKey;
pub use filter::{FilterKey, FilterSet, extract_filters};
pub use query::{Clause, RangeOp, StructuredQuery};
pub use report::{AggregateReport, CRITICAL_STATUSES};
