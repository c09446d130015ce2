//! Error types.
//!
//! Two layers:
//!
//! - [`PredictError`]: the typed failures of the core (loading, fitting, predicting).
//! - [`AppError`]: what the binary reports, carrying a process exit code.
//!
//! Exit codes:
//! - `2`: dataset or input problem
//! - `3`: prediction service not ready (no model published)
//! - `4`: numerical failure while fitting

use thiserror::Error;

/// Message shown to callers when no model has been published.
pub const NOT_READY_MESSAGE: &str = "Prediction service is not ready. Please try again later.";

/// Failures raised by the loader, the regression engine and the prediction façade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// Missing required column, unparsable required field, or broken CSV framing.
    #[error("{}", malformed_message(.line, .message))]
    MalformedDataset { line: Option<usize>, message: String },

    #[error("failed to read dataset '{path}': {message}")]
    DatasetIo { path: String, message: String },

    /// A Gauss-Jordan pivot fell below the singularity threshold.
    #[error("normal-equation matrix is singular (pivot {pivot:e} in column {column}); the feature set is rank-deficient")]
    SingularMatrix { column: usize, pivot: f64 },

    #[error("invalid training data: {0}")]
    InvalidTrainingData(String),

    #[error("model not fitted")]
    ModelNotFitted,

    #[error("feature vector has length {found}, model expects {expected}")]
    FeatureDimension { expected: usize, found: usize },
}

fn malformed_message(line: &Option<usize>, message: &str) -> String {
    match line {
        Some(line) => format!("malformed dataset (line {line}): {message}"),
        None => format!("malformed dataset: {message}"),
    }
}

impl PredictError {
    pub fn malformed(line: Option<usize>, message: impl Into<String>) -> Self {
        Self::MalformedDataset {
            line,
            message: message.into(),
        }
    }

    /// Failures that mean "no usable model": callers should treat them as a
    /// temporarily unavailable service rather than a bad request.
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, Self::ModelNotFitted | Self::FeatureDimension { .. })
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MalformedDataset { .. } | Self::DatasetIo { .. } => 2,
            Self::ModelNotFitted | Self::FeatureDimension { .. } => 3,
            Self::SingularMatrix { .. } | Self::InvalidTrainingData(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        if err.is_service_unavailable() {
            return AppError::new(err.exit_code(), NOT_READY_MESSAGE);
        }
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
