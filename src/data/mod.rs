//! Dataset input.
//!
//! - `loader`: parse the historical sales CSV into records + location table
//! - `sample`: seeded synthetic datasets in the same layout

pub mod loader;
pub mod sample;

pub use loader::{Dataset, load_dataset, load_from_reader};
pub use sample::{SampleConfig, SampleData, generate_sample};
