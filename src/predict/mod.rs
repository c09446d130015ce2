//! Prediction façade over the published model.

pub mod service;

pub use service::*;
