//! Mathematical utilities: Gauss-Jordan inversion and a reference least squares solver.

pub mod gauss_jordan;
pub mod ols;

pub use gauss_jordan::*;
pub use ols::*;
