use std::fs;

use hf_app::*;
use hf_project::{CaseFile, DomainDef, InitialConditionDef, TimeDef};
use hf_results::load_manifest;
use hf_sim::{SchemeKind, SolveOptions};

fn small_case(name: &str) -> CaseFile {
    let mut case = CaseFile::reference();
    case.name = name.to_string();
    case.domain = DomainDef {
        length: 1.0,
        points: 5,
    };
    case.time = TimeDef {
        duration: 0.5,
        points: 25,
    };
    case
}

#[test]
fn run_case_writes_rows_script_and_manifest() {
    let temp_dir = std::env::temp_dir().join("hf_app_run_case");
    let _ = fs::remove_dir_all(&temp_dir);

    let case = small_case("small");
    let request = RunRequest {
        case: &case,
        output_dir: &temp_dir,
        options: RunOptions::default(),
    };
    let response = run_case(&request).unwrap();

    assert_eq!(response.manifest.rows_solved, 25);
    // plot.gp plus rows 0, 10, 20
    assert_eq!(response.files.len(), 4);
    assert_eq!(response.manifest.files_written, 4);
    assert!(temp_dir.join("plot.gp").exists());
    assert!(temp_dir.join("20.dat").exists());

    let manifest_path = response.manifest_path.unwrap();
    assert!(manifest_path.exists());
    let loaded = load_manifest(&temp_dir).unwrap();
    assert_eq!(loaded.case_name, "small");
    assert_eq!(loaded.scheme, SchemeKind::ForwardEuler);
    assert_eq!(loaded.parameters.space_points, 5);
    assert!(response.timing.total_time_s >= response.timing.solve_time_s);
}

#[test]
fn progress_reaches_completion() {
    let temp_dir = std::env::temp_dir().join("hf_app_progress");
    let _ = fs::remove_dir_all(&temp_dir);

    let mut case = small_case("progress");
    case.output.gnuplot = false;
    case.output.manifest = Some(false);
    let request = RunRequest {
        case: &case,
        output_dir: &temp_dir,
        options: RunOptions {
            scheme: Some(SchemeKind::RK4),
            ..RunOptions::default()
        },
    };

    let mut events = Vec::new();
    let response = run_case_with_progress(&request, Some(&mut |e| events.push(e))).unwrap();

    assert_eq!(events.len(), 25);
    assert_eq!(events[0].time_index, 0);
    let last = events.last().unwrap();
    assert_eq!(last.time_index, 24);
    assert_eq!(last.fraction_complete, 1.0);
    assert!(response.manifest_path.is_none());
    assert_eq!(response.manifest.scheme, SchemeKind::RK4);
    assert!(!temp_dir.join("plot.gp").exists());
}

#[test]
fn unstable_case_is_rejected_before_any_output() {
    let temp_dir = std::env::temp_dir().join("hf_app_unstable");
    let _ = fs::remove_dir_all(&temp_dir);

    let mut case = small_case("unstable");
    case.time.points = 5;
    let request = RunRequest {
        case: &case,
        output_dir: &temp_dir,
        options: RunOptions::default(),
    };

    let err = run_case(&request).unwrap_err();
    assert!(matches!(
        err,
        AppError::Solve(hf_sim::SolveError::StabilityViolation { .. })
    ));
    assert!(!temp_dir.exists());
}

#[test]
fn invalid_case_is_a_validation_error() {
    let temp_dir = std::env::temp_dir().join("hf_app_invalid");
    let mut case = small_case("invalid");
    case.initial_condition = InitialConditionDef::Constant { value: f64::NAN };
    let request = RunRequest {
        case: &case,
        output_dir: &temp_dir,
        options: RunOptions::default(),
    };
    assert!(matches!(run_case(&request), Err(AppError::Validation(_))));
}

#[test]
fn dump_case_streams_every_row() {
    let params = small_case("dump").to_parameters();
    let out = dump_case(&params, &SolveOptions::default(), Vec::new()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("time_point=").count(), 25);
    assert!(text.contains("time_point=24;"));
}
