//! One-shot training run.
//!
//! Given a loaded dataset:
//! - shuffle with the configured seed and split into train/test
//! - fit the linear model on the training partition
//! - score both partitions (MAE / RMSE)
//! - cross-check the fit against the SVD reference solver
//!
//! and return an immutable [`TrainedModel`] ready to be published.

use chrono::{DateTime, Utc};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::data::Dataset;
use crate::domain::{FEATURE_LEN, LocationTable, Record, TrainConfig};
use crate::error::PredictError;
use crate::fit::evaluate::{EvaluationReport, evaluate};
use crate::fit::split::shuffle_split;
use crate::math::solve_least_squares;
use crate::models::{LinearModel, design_matrix, fit};

/// Diagnostics for one training run. Never feeds back into fitting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSummary {
    pub records: usize,
    pub rows_skipped: usize,
    pub locations: usize,
    pub seed: u64,
    pub train_size: usize,
    pub test_size: usize,
    /// Fewer records than `TrainConfig::min_reliable_samples`.
    pub low_confidence: bool,
    pub weights: Vec<f64>,
    pub train: EvaluationReport,
    pub test: EvaluationReport,
    pub trained_at: DateTime<Utc>,
}

/// Everything the prediction façade needs, frozen after training.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub model: LinearModel,
    pub locations: LocationTable,
    pub summary: TrainingSummary,
}

/// Fit a model on `dataset` according to `config`.
pub fn train(dataset: Dataset, config: &TrainConfig) -> Result<TrainedModel, PredictError> {
    let n = dataset.records.len();
    if n == 0 {
        return Err(PredictError::InvalidTrainingData(
            "dataset contains no usable records".to_string(),
        ));
    }

    let low_confidence = n < config.min_reliable_samples;
    if low_confidence {
        log::warn!("Dataset too small ({n} records). Model may not be reliable.");
    }

    let (train_set, test_set) = shuffle_split(&dataset.records, config.seed, config.train_ratio);

    let (x_train, y_train) = to_design(&train_set);
    let model = fit(&x_train, &y_train)?;
    log::debug!("Fitted weights: {:?}", model.weights());

    if let Some(dev) = reference_deviation(&x_train, &y_train, &model) {
        log::debug!("Max relative deviation from SVD reference on training rows: {dev:.3e}");
    }

    let train_report = score(&model, &train_set)?;
    let test_report = score(&model, &test_set)?;

    let summary = TrainingSummary {
        records: n,
        rows_skipped: dataset.rows_skipped,
        locations: dataset.locations.len(),
        seed: config.seed,
        train_size: train_set.len(),
        test_size: test_set.len(),
        low_confidence,
        weights: model.weights().to_vec(),
        train: train_report,
        test: test_report,
        trained_at: Utc::now(),
    };

    Ok(TrainedModel {
        model,
        locations: dataset.locations,
        summary,
    })
}

fn to_design(records: &[Record]) -> (DMatrix<f64>, DVector<f64>) {
    let rows: Vec<[f64; FEATURE_LEN]> = records.iter().map(Record::feature_vector).collect();
    let targets: Vec<f64> = records.iter().map(|r| r.price).collect();
    design_matrix(&rows, &targets)
}

fn score(model: &LinearModel, records: &[Record]) -> Result<EvaluationReport, PredictError> {
    if records.is_empty() {
        return Ok(EvaluationReport::empty());
    }
    let (x, y) = to_design(records);
    let predicted = model.predict_rows(&x)?;
    Ok(evaluate(y.as_slice(), predicted.as_slice()))
}

/// Largest prediction gap between our fit and the SVD least-squares solution,
/// relative to the prediction magnitude.
fn reference_deviation(x: &DMatrix<f64>, y: &DVector<f64>, model: &LinearModel) -> Option<f64> {
    let beta = solve_least_squares(x, y)?;
    let ours = model.predict_rows(x).ok()?;
    let reference = x * beta;
    ours.iter()
        .zip(reference.iter())
        .map(|(a, b)| (a - b).abs() / b.abs().max(1.0))
        .reduce(f64::max)
}
