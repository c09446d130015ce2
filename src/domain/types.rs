//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built by the dataset loader and consumed by the trainer
//! - handed to the prediction façade by the outer surfaces (CLI, batch scoring)
//! - printed as JSON

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Length of every feature vector: `[1, area, rooms, bathrooms, location_code]`.
pub const FEATURE_LEN: usize = 5;

/// Accepted range for the built-up area (square feet).
pub const AREA_RANGE: (f64, f64) = (100.0, 10_000.0);
/// Accepted range for both room and bathroom counts.
pub const COUNT_RANGE: (u32, u32) = (1, 10);

/// One historical observation from the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub area: f64,
    pub rooms: u32,
    pub bathrooms: u32,
    /// Dense index into the `LocationTable` the record was loaded with.
    pub location_code: usize,
    pub price: f64,
}

impl Record {
    /// Regression row for this record. The intercept term always comes first.
    pub fn feature_vector(&self) -> [f64; FEATURE_LEN] {
        feature_vector(self.area, self.rooms, self.bathrooms, self.location_code)
    }
}

/// Build the engine's feature encoding for raw property attributes.
pub fn feature_vector(area: f64, rooms: u32, bathrooms: u32, location_code: usize) -> [f64; FEATURE_LEN] {
    [
        1.0,
        area,
        f64::from(rooms),
        f64::from(bathrooms),
        location_code as f64,
    ]
}

/// A property description as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    pub area: f64,
    pub rooms: u32,
    pub bathrooms: u32,
    pub location: String,
}

impl PropertyInput {
    pub fn new(area: f64, rooms: u32, bathrooms: u32, location: impl Into<String>) -> Self {
        Self {
            area,
            rooms,
            bathrooms,
            location: location.into().trim().to_string(),
        }
    }

    /// Validate the user-facing ranges.
    ///
    /// The prediction façade trusts its callers; surfaces that accept raw
    /// user input (CLI, batch files) call this first.
    pub fn validate(&self) -> Result<(), String> {
        let (area_min, area_max) = AREA_RANGE;
        if !self.area.is_finite() || self.area < area_min {
            return Err(format!("Square feet must be at least {area_min}"));
        }
        if self.area > area_max {
            return Err("Square feet must not exceed 10,000".to_string());
        }

        let (count_min, count_max) = COUNT_RANGE;
        if self.rooms < count_min {
            return Err(format!("BHK must be at least {count_min}"));
        }
        if self.rooms > count_max {
            return Err(format!("BHK must not exceed {count_max}"));
        }
        if self.bathrooms < count_min {
            return Err(format!("Bathrooms must be at least {count_min}"));
        }
        if self.bathrooms > count_max {
            return Err(format!("Bathrooms must not exceed {count_max}"));
        }

        if self.location.trim().is_empty() {
            return Err("Location is required".to_string());
        }
        Ok(())
    }
}

/// Training run configuration.
///
/// This is derived from CLI flags, environment and defaults (see `app`).
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub dataset_path: PathBuf,
    pub delimiter: u8,
    /// Seed for the train/test shuffle.
    pub seed: u64,
    /// Share of (shuffled) records used for fitting.
    pub train_ratio: f64,
    /// Below this many records the run is flagged as low confidence.
    pub min_reliable_samples: usize,
}

impl TrainConfig {
    pub const DEFAULT_DATASET: &'static str = "data/dataset.csv";
    pub const DEFAULT_SEED: u64 = 42;
    pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;
    pub const DEFAULT_MIN_RELIABLE_SAMPLES: usize = 5;

    pub fn validate(&self) -> Result<(), String> {
        if !(self.train_ratio > 0.0 && self.train_ratio <= 1.0) {
            return Err(format!(
                "Train ratio must be in (0, 1], got {}",
                self.train_ratio
            ));
        }
        if !self.delimiter.is_ascii() {
            return Err("Delimiter must be a single ASCII character".to_string());
        }
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(Self::DEFAULT_DATASET),
            delimiter: b',',
            seed: Self::DEFAULT_SEED,
            train_ratio: Self::DEFAULT_TRAIN_RATIO,
            min_reliable_samples: Self::DEFAULT_MIN_RELIABLE_SAMPLES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_vector_leads_with_intercept() {
        let r = Record {
            area: 1200.0,
            rooms: 3,
            bathrooms: 2,
            location_code: 4,
            price: 9_000_000.0,
        };
        assert_eq!(r.feature_vector(), [1.0, 1200.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn input_validation_ranges() {
        assert!(PropertyInput::new(1000.0, 2, 2, "Pune").validate().is_ok());
        assert!(PropertyInput::new(100.0, 1, 1, "Pune").validate().is_ok());
        assert!(PropertyInput::new(10_000.0, 10, 10, "Pune").validate().is_ok());

        assert!(PropertyInput::new(99.5, 2, 2, "Pune").validate().is_err());
        assert!(PropertyInput::new(10_001.0, 2, 2, "Pune").validate().is_err());
        assert!(PropertyInput::new(f64::NAN, 2, 2, "Pune").validate().is_err());
        assert!(PropertyInput::new(1000.0, 0, 2, "Pune").validate().is_err());
        assert!(PropertyInput::new(1000.0, 2, 11, "Pune").validate().is_err());
        assert!(PropertyInput::new(1000.0, 2, 2, "   ").validate().is_err());
    }

    #[test]
    fn input_location_is_trimmed() {
        let input = PropertyInput::new(1000.0, 2, 2, "  Pune ");
        assert_eq!(input.location, "Pune");
    }

    #[test]
    fn config_rejects_bad_ratio() {
        let mut config = TrainConfig::default();
        assert!(config.validate().is_ok());
        config.train_ratio = 0.0;
        assert!(config.validate().is_err());
        config.train_ratio = 1.5;
        assert!(config.validate().is_err());
        config.train_ratio = 1.0;
        assert!(config.validate().is_ok());
    }
}
