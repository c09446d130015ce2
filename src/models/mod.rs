//! Regression engine.
//!
//! Models are small immutable values so that the fitted state can be shared
//! across threads without synchronization.

pub mod linear;

pub use linear::*;
