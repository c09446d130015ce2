//! Ordinary least squares via the normal equations.
//!
//! `fit` solves `weights = (XᵀX)⁻¹ Xᵀy`, inverting `XᵀX` with
//! [`crate::math::invert`]. There is no regularization and no fallback for
//! ill-conditioned matrices: a pivot below the singularity threshold rejects
//! the fit.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::error::PredictError;
use crate::math::invert;

/// A fitted linear model. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearModel {
    weights: Vec<f64>,
}

impl LinearModel {
    /// Wrap an already-computed weight vector.
    pub fn from_weights(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Dot product of the weights with `features`. No clamping.
    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        if features.len() != self.weights.len() {
            return Err(PredictError::FeatureDimension {
                expected: self.weights.len(),
                found: features.len(),
            });
        }
        Ok(self.weights.iter().zip(features).map(|(w, x)| w * x).sum())
    }

    /// Predict every row of a design matrix.
    pub fn predict_rows(&self, x: &DMatrix<f64>) -> Result<DVector<f64>, PredictError> {
        if x.ncols() != self.weights.len() {
            return Err(PredictError::FeatureDimension {
                expected: self.weights.len(),
                found: x.ncols(),
            });
        }
        let mut out = DVector::zeros(x.nrows());
        for (i, row) in x.row_iter().enumerate() {
            out[i] = self.weights.iter().zip(row.iter()).map(|(w, v)| w * v).sum();
        }
        Ok(out)
    }
}

/// Fit a linear model on design matrix `x` (one row per sample, intercept
/// column included by the caller) and targets `y`.
///
/// A single observation cannot identify more than an intercept, so a one-row
/// `x` yields the intercept-only model `[y₀ / x₀₀, 0, …, 0]`. Every larger
/// problem goes through the normal equations.
pub fn fit(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<LinearModel, PredictError> {
    let n = x.nrows();
    let p = x.ncols();
    if n == 0 || p == 0 {
        return Err(PredictError::InvalidTrainingData(
            "X and y must be non-empty".to_string(),
        ));
    }
    if n != y.len() {
        return Err(PredictError::InvalidTrainingData(format!(
            "X has {n} rows but y has {} targets",
            y.len()
        )));
    }

    if n == 1 {
        return fit_single_observation(x, y);
    }

    // XᵀX[i][j] = Σ_k X[k][i]·X[k][j],  Xᵀy[i] = Σ_k X[k][i]·y[k]
    let xtx = x.tr_mul(x);
    let xty = x.tr_mul(y);

    let xtx_inv = invert(&xtx)?;
    let weights = xtx_inv * xty;

    Ok(LinearModel {
        weights: weights.iter().copied().collect(),
    })
}

fn fit_single_observation(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<LinearModel, PredictError> {
    let intercept = x[(0, 0)];
    if intercept.abs() < crate::math::SINGULAR_PIVOT_EPS {
        return Err(PredictError::SingularMatrix {
            column: 0,
            pivot: intercept,
        });
    }
    let mut weights = vec![0.0; x.ncols()];
    weights[0] = y[0] / intercept;
    Ok(LinearModel { weights })
}

/// Build `(X, y)` from feature rows and targets.
pub fn design_matrix<const P: usize>(rows: &[[f64; P]], targets: &[f64]) -> (DMatrix<f64>, DVector<f64>) {
    let x = DMatrix::from_fn(rows.len(), P, |i, j| rows[i][j]);
    let y = DVector::from_column_slice(targets);
    (x, y)
}
