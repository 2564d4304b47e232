//! Error types for solve operations.

use thiserror::Error;

use crate::observer::BoxError;

/// Errors encountered while setting up or running a solve.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Allocation failed: couldn't reserve {bytes} bytes for {what}")]
    Allocation { what: &'static str, bytes: usize },

    #[error("Invalid parameters: {what}")]
    InvalidParameters { what: String },

    #[error("Stability violation: r = {ratio} exceeds 0.5 for the forward Euler scheme")]
    StabilityViolation { ratio: f64 },

    #[error("Observer failed before solving: {source}")]
    BeforeSolve {
        #[source]
        source: BoxError,
    },

    #[error("Observer failed at time index {time_index}: {source}")]
    Observer {
        time_index: usize,
        #[source]
        source: BoxError,
    },
}

pub type SolveResult<T> = Result<T, SolveError>;

impl SolveError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        SolveError::InvalidParameters { what: what.into() }
    }

    /// Time index at which the observer stopped the solve, if that is what happened.
    pub fn time_index(&self) -> Option<usize> {
        match self {
            SolveError::Observer { time_index, .. } => Some(*time_index),
            _ => None,
        }
    }
}

impl From<hf_core::HfError> for SolveError {
    fn from(e: hf_core::HfError) -> Self {
        SolveError::invalid(e.to_string())
    }
}
