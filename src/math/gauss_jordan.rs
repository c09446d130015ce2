//! Matrix inversion by Gauss-Jordan elimination with partial pivoting.
//!
//! The normal-equation matrix `XᵀX` is inverted by hand rather than through a
//! library factorization: the behavior on near-singular input (when exactly a
//! fit is rejected) is observable to users, so the algorithm is fixed:
//!
//! 1. augment `A` with the identity: `[A | I]`
//! 2. for each column, pick the row with the largest `|a[row][col]|` at or
//!    below the diagonal and swap it into place
//! 3. reject if `|pivot| < SINGULAR_PIVOT_EPS`
//! 4. normalize the pivot row, eliminate the column from every other row
//!
//! The right half of the augmented matrix is then `A⁻¹`.

use nalgebra::DMatrix;

use crate::error::PredictError;

/// Pivots with an absolute value below this are treated as zero.
pub const SINGULAR_PIVOT_EPS: f64 = 1e-10;

/// Invert a square matrix.
pub fn invert(a: &DMatrix<f64>) -> Result<DMatrix<f64>, PredictError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(PredictError::InvalidTrainingData(format!(
            "cannot invert a {}x{} matrix",
            a.nrows(),
            a.ncols()
        )));
    }

    let width = 2 * n;
    let mut aug = DMatrix::<f64>::zeros(n, width);
    aug.view_mut((0, 0), (n, n)).copy_from(a);
    for i in 0..n {
        aug[(i, n + i)] = 1.0;
    }

    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if aug[(row, col)].abs() > aug[(pivot, col)].abs() {
                pivot = row;
            }
        }
        aug.swap_rows(col, pivot);

        let div = aug[(col, col)];
        if div.abs() < SINGULAR_PIVOT_EPS {
            return Err(PredictError::SingularMatrix { column: col, pivot: div });
        }
        for j in 0..width {
            aug[(col, j)] /= div;
        }

        for i in 0..n {
            if i == col {
                continue;
            }
            let factor = aug[(i, col)];
            for j in 0..width {
                let v = aug[(col, j)];
                aug[(i, j)] -= factor * v;
            }
        }
    }

    Ok(aug.columns(n, n).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_identity(m: &DMatrix<f64>, tol: f64) {
        for i in 0..m.nrows() {
            for j in 0..m.ncols() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (m[(i, j)] - expected).abs() < tol,
                    "entry ({i},{j}) = {} should be {expected}",
                    m[(i, j)]
                );
            }
        }
    }

    #[test]
    fn inverts_small_matrix() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 7.0, 2.0, 6.0]);
        let inv = invert(&a).unwrap();
        // 1/10 * [6 -7; -2 4]
        assert!((inv[(0, 0)] - 0.6).abs() < 1e-12);
        assert!((inv[(0, 1)] + 0.7).abs() < 1e-12);
        assert!((inv[(1, 0)] + 0.2).abs() < 1e-12);
        assert!((inv[(1, 1)] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn needs_pivoting_for_zero_leading_entry() {
        let a = DMatrix::from_row_slice(3, 3, &[0.0, 2.0, 1.0, 1.0, 0.0, 0.0, 3.0, 1.0, 4.0]);
        let inv = invert(&a).unwrap();
        assert_identity(&(&a * &inv), 1e-12);
    }

    #[test]
    fn product_with_inverse_is_identity() {
        let a = DMatrix::from_row_slice(
            4,
            4,
            &[
                10.0, 2.0, 3.0, 1.0, //
                2.0, 8.0, 1.0, 0.5, //
                3.0, 1.0, 9.0, 2.0, //
                1.0, 0.5, 2.0, 7.0,
            ],
        );
        let inv = invert(&a).unwrap();
        assert_identity(&(&a * &inv), 1e-10);
        assert_identity(&(&inv * &a), 1e-10);
    }

    #[test]
    fn rejects_singular_matrix() {
        // Second row is twice the first.
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let err = invert(&a).unwrap_err();
        assert!(matches!(err, PredictError::SingularMatrix { column: 1, .. }), "{err:?}");
    }

    #[test]
    fn rejects_tiny_pivot_below_threshold() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1e-11]);
        assert!(matches!(invert(&a), Err(PredictError::SingularMatrix { .. })));

        let b = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1e-9]);
        assert!(invert(&b).is_ok());
    }

    #[test]
    fn rejects_non_square_input() {
        let a = DMatrix::<f64>::zeros(2, 3);
        assert!(matches!(invert(&a), Err(PredictError::InvalidTrainingData(_))));
    }
}
