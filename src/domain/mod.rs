//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - historical observations (`Record`) and their feature encoding
//! - caller-facing property descriptions (`PropertyInput`)
//! - the categorical location encoding (`LocationTable`)
//! - run configuration (`TrainConfig`)

pub mod location;
pub mod types;

pub use location::*;
pub use types::*;
