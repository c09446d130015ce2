//! Training pipeline.
//!
//! Responsibilities:
//!
//! - deterministic shuffle + train/test split (`split`)
//! - fit quality metrics (`evaluate`)
//! - the one-shot training run producing a publishable model (`trainer`)

pub mod evaluate;
pub mod split;
pub mod trainer;

pub use evaluate::*;
pub use split::*;
pub use trainer::*;
