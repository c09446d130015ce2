//! Reference least squares solver.
//!
//! The regression engine fits through the normal equations (see
//! `math::gauss_jordan` and `models::linear`). This SVD-based solver is an
//! independent reference: the trainer uses it to cross-check a fresh fit, and
//! the tests use it to check least-squares optimality.
//!
//! Nalgebra's `QR::solve` is intended for square systems and will panic for
//! non-square matrices, so SVD is used for the tall design matrix.

use nalgebra::{DMatrix, DVector};

/// Solve `min ‖Xβ - y‖²` using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Residual sum of squares `‖Xβ - y‖²`.
pub fn residual_sum_of_squares(x: &DMatrix<f64>, y: &DVector<f64>, beta: &DVector<f64>) -> f64 {
    (x * beta - y).norm_squared()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
        assert!(residual_sum_of_squares(&x, &y, &beta) < 1e-18);
    }

    #[test]
    fn rss_of_known_residuals() {
        let x = DMatrix::from_row_slice(2, 1, &[1.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 3.0]);
        let beta = DVector::from_row_slice(&[2.0]);
        assert!((residual_sum_of_squares(&x, &y, &beta) - 2.0).abs() < 1e-12);
    }
}
