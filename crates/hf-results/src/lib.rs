//! hf-results: persistence of solver rows and run metadata.
//!
//! - `params_text`: single-line `Parameters{...}` text format
//! - `plot`: per-row `.dat` files plus a gnuplot script
//! - `mesh_dump`: raw rolling-grid dump to any writer
//! - `manifest`: JSON run manifest

pub mod manifest;
pub mod mesh_dump;
pub mod params_text;
pub mod plot;
pub mod types;

pub use manifest::{load_manifest, save_manifest};
pub use mesh_dump::MeshDump;
pub use params_text::{
    format_parameters, format_record, parse_parameters, parse_record, read_parameters,
    write_parameters,
};
pub use plot::{PlotWriter, format_general, gnuplot_script};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Blank input")]
    BlankInput,

    #[error("Couldn't parse parameters: {message}")]
    ParameterFormat { message: String },

    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: std::path::PathBuf },
}
