//! Input/output helpers.
//!
//! - batch CSV ingest + parallel scoring (`batch`)
//! - result exports (CSV) (`export`)

pub mod batch;
pub mod export;

pub use batch::*;
pub use export::*;
