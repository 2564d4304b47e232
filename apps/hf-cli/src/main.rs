use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use hf_app::{
    AppError, AppResult, RunOptions, RunProgressEvent, RunRequest, RunResponse, dump_case,
    load_case, read_case, run_service,
};
use hf_project::{CaseFile, save_json, save_yaml};
use hf_sim::SchemeKind;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hf-cli")]
#[command(about = "HeatFlow CLI - explicit 1D heat diffusion solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct SolverArgs {
    /// Output directory for row files, plot.gp and manifest.json
    #[arg(short, long, default_value = "out")]
    out: PathBuf,
    /// Stepping scheme (forward_euler, rk4); defaults to the case setting
    #[arg(long)]
    scheme: Option<SchemeKind>,
    /// Update each row's interior in parallel
    #[arg(long, conflicts_with = "serial")]
    parallel: bool,
    /// Force a serial run even if the case enables parallel rows
    #[arg(long)]
    serial: bool,
}

impl SolverArgs {
    /// `None` leaves the case's `solver.parallel` in effect.
    fn parallel_override(&self) -> Option<bool> {
        match (self.parallel, self.serial) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a case file
    Validate {
        /// Path to the case YAML or JSON file
        case_path: PathBuf,
    },
    /// Run a case file
    Run {
        /// Path to the case YAML or JSON file
        case_path: PathBuf,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Run the built-in reference case
    Reference {
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Read a `Parameters{...}` line from stdin and run it
    Stdin {
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Print the rolling grid after every row to stdout
    Dump {
        /// Case file; the reference case when omitted
        case_path: Option<PathBuf>,
        #[arg(long)]
        scheme: Option<SchemeKind>,
    },
    /// Write the reference case to a file as a starting point
    Init {
        /// Destination path; `.json` writes JSON, anything else YAML
        path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "parsed command line");

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Run { case_path, solver } => {
            let case = load_case(&case_path)?;
            cmd_run(&case, &solver)
        }
        Commands::Reference { solver } => cmd_run(&CaseFile::reference(), &solver),
        Commands::Stdin { solver } => cmd_stdin(&solver),
        Commands::Dump { case_path, scheme } => cmd_dump(case_path.as_deref(), scheme),
        Commands::Init { path } => cmd_init(&path),
    }
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = load_case(case_path)?;
    let params = case.to_parameters();
    println!("✓ Case '{}' is valid", case.name);
    println!(
        "  dx = {:.6}, dt = {:.6}, r = {:.6}",
        params.space_step(),
        params.time_step(),
        params.stability_ratio()
    );
    Ok(())
}

fn cmd_stdin(solver: &SolverArgs) -> AppResult<()> {
    let stdin = io::stdin();
    let (case, canonical) = read_case(&mut stdin.lock(), "stdin")?;
    println!("{canonical};");
    cmd_run(&case, solver)
}

fn cmd_run(case: &CaseFile, solver: &SolverArgs) -> AppResult<()> {
    println!("Running case: {}", case.name);

    let request = RunRequest {
        case,
        output_dir: &solver.out,
        options: RunOptions {
            scheme: solver.scheme,
            parallel: solver.parallel_override(),
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let response = run_service::run_case_with_progress(
        &request,
        Some(&mut |event| {
            let emit_now = (event.fraction_complete - last_fraction).abs() >= 0.005
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_fraction = event.fraction_complete;
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    print_summary(&response);
    println!("Done.");
    Ok(())
}

fn cmd_dump(case_path: Option<&Path>, scheme: Option<SchemeKind>) -> AppResult<()> {
    let case = match case_path {
        Some(path) => load_case(path)?,
        None => CaseFile::reference(),
    };
    let mut options = case.solve_options();
    if let Some(scheme) = scheme {
        options.scheme = scheme;
    }
    let stdout = io::stdout();
    let mut out = dump_case(&case.to_parameters(), &options, io::BufWriter::new(stdout.lock()))?;
    out.flush()?;
    Ok(())
}

fn cmd_init(path: &Path) -> AppResult<()> {
    let case = CaseFile::reference();
    let result = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => save_json(path, &case),
        _ => save_yaml(path, &case),
    };
    result.map_err(|e| AppError::InvalidInput(e.to_string()))?;
    println!("✓ Wrote reference case to {}", path.display());
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    let width = 28usize;
    let filled = ((event.fraction_complete * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  t={:.4}  row={}/{}  elapsed={:.1}s",
        bar,
        event.fraction_complete * 100.0,
        event.sim_time,
        event.time_index,
        event.time_points.saturating_sub(1),
        event.elapsed_wall_s
    );
    let _ = io::stdout().flush();
}

fn print_summary(response: &RunResponse) {
    let manifest = &response.manifest;
    let timing = &response.timing;
    println!("✓ Solved {} rows with {}", manifest.rows_solved, manifest.scheme);
    println!("  Stability ratio: {:.6}", manifest.stability_ratio);
    println!("  Files written:   {}", manifest.files_written);
    if let Some(path) = &response.manifest_path {
        println!("  Manifest:        {}", path.display());
    }

    let total = timing.total_time_s.max(1.0e-12);
    println!("\nTiming summary:");
    println!(
        "  Solve:   {:.3}s ({:.1}%)",
        timing.solve_time_s,
        100.0 * timing.solve_time_s / total
    );
    println!(
        "  Save:    {:.3}s ({:.1}%)",
        timing.save_time_s,
        100.0 * timing.save_time_s / total
    );
    println!("  Total:   {:.3}s", timing.total_time_s);
}
