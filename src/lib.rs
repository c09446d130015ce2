//! `home-price` library crate.
//!
//! The binary (`homeprice`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the predictor can be embedded behind another front-end (HTTP, batch jobs)

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod predict;
pub mod report;
