//! Shared startup pipeline used by every command that needs a model.
//!
//! load dataset -> train -> publish
//!
//! A failure anywhere is logged and leaves the predictor unpublished; callers
//! then see `ModelNotFitted` instead of a crash.

use crate::data::load_dataset;
use crate::domain::TrainConfig;
use crate::error::PredictError;
use crate::fit::{TrainedModel, TrainingSummary, train};
use crate::predict::PricePredictor;
use crate::report::format_metric;

/// Load the dataset and fit a model, without publishing it.
pub fn load_and_train(config: &TrainConfig) -> Result<TrainedModel, PredictError> {
    log::info!("Loading dataset from '{}'", config.dataset_path.display());
    let dataset = load_dataset(&config.dataset_path, config.delimiter)?;
    log::info!(
        "Loaded {} records ({} locations).",
        dataset.records.len(),
        dataset.locations.len()
    );
    train(dataset, config)
}

/// Train and publish into `predictor`.
///
/// The error is logged and returned; the predictor stays unpublished.
pub fn initialize(predictor: &PricePredictor, config: &TrainConfig) -> Result<(), PredictError> {
    match load_and_train(config) {
        Ok(trained) => {
            log_diagnostics(&trained.summary);
            predictor.publish(trained);
            Ok(())
        }
        Err(err) => {
            log::error!("Failed to train model: {err}");
            Err(err)
        }
    }
}

/// Build a predictor for `config`. Never fails: on error the predictor is
/// returned unpublished.
pub fn start(config: &TrainConfig) -> PricePredictor {
    let predictor = PricePredictor::new();
    let _ = initialize(&predictor, config);
    predictor
}

fn log_diagnostics(summary: &TrainingSummary) {
    log::info!(
        "Model trained: {} records, train={} test={}",
        summary.records,
        summary.train_size,
        summary.test_size
    );
    log::info!("Test MAE: {}", format_metric(summary.test.mae));
    log::info!("Test RMSE: {}", format_metric(summary.test.rmse));
}
