//! Error types for the hf-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to load case file {path}: {message}")]
    CaseLoad { path: PathBuf, message: String },

    #[error("Case validation failed: {0}")]
    Validation(String),

    #[error("Solve error: {0}")]
    Solve(#[from] hf_sim::SolveError),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<hf_project::ValidationError> for AppError {
    fn from(err: hf_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<hf_results::ResultsError> for AppError {
    fn from(err: hf_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
