//! Reporting utilities: price display and run summaries.

pub mod format;

pub use format::*;
