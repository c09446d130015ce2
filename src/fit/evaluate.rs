//! Fit quality metrics.

use serde::Serialize;

/// MAE and RMSE over one partition.
///
/// Both metrics are `None` when the partition is empty: there is nothing to
/// average, and reporting `0.0` would read as a perfect fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub samples: usize,
    pub mae: Option<f64>,
    pub rmse: Option<f64>,
}

impl EvaluationReport {
    pub fn empty() -> Self {
        Self {
            samples: 0,
            mae: None,
            rmse: None,
        }
    }
}

/// Compare `actual` targets with `predicted` values (paired by index).
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> EvaluationReport {
    EvaluationReport {
        samples: actual.len().min(predicted.len()),
        mae: mean_absolute_error(actual, predicted),
        rmse: root_mean_squared_error(actual, predicted),
    }
}

/// `mean(|actual - predicted|)`, or `None` for empty input.
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return None;
    }
    let sum: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).abs()).sum();
    Some(sum / n as f64)
}

/// `sqrt(mean((actual - predicted)²))`, or `None` for empty input.
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return None;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let d = a - p;
            d * d
        })
        .sum();
    Some((sum / n as f64).sqrt())
}
