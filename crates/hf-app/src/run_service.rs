//! Run orchestration: load a case, solve it with its output observers, and
//! write the run manifest.

use std::io::Write;
use std::path::{Path, PathBuf};

use hf_core::Timer;
use hf_project::{CaseFile, validate_case};
use hf_results::{MeshDump, ParameterRecord, PlotWriter, RunManifest, save_manifest};
use hf_sim::{Parameters, SchemeKind, SolveOptions, solve_with_options};

use crate::error::{AppError, AppResult};
use crate::progress::{ProgressObserver, RunProgressEvent};

/// Options controlling how a case is run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Overrides the case's `solver.scheme`.
    pub scheme: Option<SchemeKind>,
    /// Overrides the case's `solver.parallel`.
    pub parallel: Option<bool>,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            scheme: None,
            parallel: None,
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Request to run one case into an output directory.
#[derive(Debug, Clone)]
pub struct RunRequest<'a> {
    pub case: &'a CaseFile,
    pub output_dir: &'a Path,
    pub options: RunOptions,
}

#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    /// Solver loop including per-row file output.
    pub solve_time_s: f64,
    pub save_time_s: f64,
    pub total_time_s: f64,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub manifest: RunManifest,
    /// Row files and the gnuplot script, in write order.
    pub files: Vec<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub timing: RunTimingSummary,
}

/// Load a case file, mapping loader errors to [`AppError::CaseLoad`].
pub fn load_case(path: &Path) -> AppResult<CaseFile> {
    hf_project::load_case(path).map_err(|e| AppError::CaseLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn resolve_options(case: &CaseFile, options: &RunOptions) -> SolveOptions {
    let mut solve = case.solve_options();
    if let Some(scheme) = options.scheme {
        solve.scheme = scheme;
    }
    if let Some(parallel) = options.parallel {
        solve.parallel = parallel;
    }
    solve
}

pub fn run_case(request: &RunRequest<'_>) -> AppResult<RunResponse> {
    run_case_with_progress(request, None)
}

pub fn run_case_with_progress(
    request: &RunRequest<'_>,
    progress: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let total_timer = Timer::start("run_case");
    let case = request.case;
    validate_case(case)?;

    let params = case.to_parameters();
    let solve_options = resolve_options(case, &request.options);

    tracing::info!(
        case = %case.name,
        scheme = %solve_options.scheme,
        output_dir = %request.output_dir.display(),
        "running case"
    );

    let mut writer = PlotWriter::new(request.output_dir)
        .write_every(case.output.write_every)
        .plot_every(case.output.plot_every)
        .with_script(case.output.gnuplot);
    let mut counter = ProgressObserver::new(progress);

    let solve_timer = Timer::start("solve");
    solve_with_options(&params, &solve_options, &mut (&mut writer, &mut counter))?;
    let solve_time_s = solve_timer.stop();

    let save_timer = Timer::start("save_manifest");
    let manifest = RunManifest {
        case_name: case.name.clone(),
        scheme: solve_options.scheme,
        parallel: solve_options.parallel,
        parameters: ParameterRecord::from_parameters(&params),
        stability_ratio: params.stability_ratio(),
        rows_solved: counter.rows(),
        files_written: writer.files().len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        elapsed_s: solve_time_s,
        solver_version: request.options.solver_version.clone(),
    };
    let manifest_path = if case.output.write_manifest() {
        Some(save_manifest(request.output_dir, &manifest)?)
    } else {
        None
    };
    let save_time_s = save_timer.stop();

    let timing = RunTimingSummary {
        solve_time_s,
        save_time_s,
        total_time_s: total_timer.stop(),
    };

    tracing::info!(
        case = %case.name,
        rows = manifest.rows_solved,
        files = manifest.files_written,
        "run complete"
    );

    Ok(RunResponse {
        manifest,
        files: writer.files().to_vec(),
        manifest_path,
        timing,
    })
}

/// Solve `params` and stream the raw rolling grid after every row to `out`.
pub fn dump_case<W: Write>(params: &Parameters, options: &SolveOptions, out: W) -> AppResult<W> {
    params.validate()?;
    let mut dump = MeshDump::new(out);
    solve_with_options(params, options, &mut dump)?;
    Ok(dump.into_inner())
}
