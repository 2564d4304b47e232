//! Shared application service layer for heatflow.
//!
//! Centralises what the CLI needs: loading and validating case files,
//! reading parameter lines from stdin, running a case with its output
//! observers, and streaming progress.

pub mod error;
pub mod input;
pub mod progress;
pub mod run_service;

pub use error::{AppError, AppResult};
pub use input::{case_from_record, read_case};
pub use progress::{ProgressObserver, RunProgressEvent};
pub use run_service::{
    RunOptions, RunRequest, RunResponse, RunTimingSummary, dump_case, load_case, run_case,
    run_case_with_progress,
};
