//! Prediction façade.
//!
//! `PricePredictor` owns the published training result. It starts empty, is
//! filled exactly once by the startup pipeline, and is then read concurrently
//! without locks. Every read goes through the same immutable snapshot, so
//! predictions are pure functions of their inputs.

use std::sync::OnceLock;

use serde::Serialize;

pub use crate::domain::LocationMatch;
use crate::domain::{PropertyInput, feature_vector};
use crate::error::PredictError;
use crate::fit::TrainedModel;

/// Location choices offered when no model has been trained.
pub const DEFAULT_LOCATIONS: [&str; 7] = ["Mumbai", "Delhi", "Bangalore", "Hyderabad", "Chennai", "Pune", "Kolkata"];

/// A priced property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Whole currency units, never negative.
    pub price: u64,
    /// Unclamped model output.
    pub raw: f64,
    pub location_code: usize,
    pub location: LocationMatch,
}

impl Prediction {
    pub fn price_i64(&self) -> i64 {
        i64::try_from(self.price).unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Default)]
pub struct PricePredictor {
    published: OnceLock<TrainedModel>,
}

impl PricePredictor {
    /// An empty predictor: every prediction fails with `ModelNotFitted`
    /// until [`PricePredictor::publish`] succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(trained: TrainedModel) -> Self {
        let predictor = Self::new();
        predictor.publish(trained);
        predictor
    }

    /// Publish the trained model. Only the first call has an effect; returns
    /// whether this call published.
    pub fn publish(&self, trained: TrainedModel) -> bool {
        if self.published.set(trained).is_err() {
            log::warn!("A model is already published; ignoring the new one.");
            return false;
        }
        true
    }

    pub fn is_ready(&self) -> bool {
        self.published.get().is_some()
    }

    /// The published snapshot.
    pub fn snapshot(&self) -> Result<&TrainedModel, PredictError> {
        self.published.get().ok_or(PredictError::ModelNotFitted)
    }

    /// Price a property. The input is trusted: range validation is the
    /// caller's job (see `PropertyInput::validate`).
    pub fn predict_price(&self, input: &PropertyInput) -> Result<Prediction, PredictError> {
        self.predict(input.area, input.rooms, input.bathrooms, &input.location)
    }

    pub fn predict(&self, area: f64, rooms: u32, bathrooms: u32, location: &str) -> Result<Prediction, PredictError> {
        let trained = self.snapshot()?;

        let (location_code, location) = trained.locations.resolve(location);

        let features = feature_vector(area, rooms, bathrooms, location_code);
        let raw = trained.model.predict(&features)?;

        Ok(Prediction {
            price: to_price(raw),
            raw,
            location_code,
            location,
        })
    }

    /// Known location names in code order, or [`DEFAULT_LOCATIONS`] before
    /// a model is published.
    pub fn locations(&self) -> Vec<String> {
        match self.published.get() {
            Some(trained) if !trained.locations.is_empty() => trained.locations.names().to_vec(),
            _ => DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Clamp to non-negative and round to the nearest whole unit.
fn to_price(raw: f64) -> u64 {
    if !raw.is_finite() {
        return 0;
    }
    raw.max(0.0).round() as u64
}
