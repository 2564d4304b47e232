use hf_project::*;
use hf_sim::SchemeKind;
use proptest::prelude::*;

#[test]
fn roundtrip_yaml_reference_case() {
    let case = CaseFile::reference();
    let path = std::env::temp_dir().join("hf_project_roundtrip_reference.yaml");

    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_json_rk4_case() {
    let mut case = CaseFile::reference();
    case.name = "rk4 gaussian".to_string();
    case.solver = SolverDef {
        scheme: SchemeKind::RK4,
        parallel: true,
    };
    case.initial_condition = InitialConditionDef::Gaussian {
        amplitude: 2.0,
        center: 7.5,
        width: 1.0,
        offset: 0.0,
    };
    let path = std::env::temp_dir().join("hf_project_roundtrip_rk4.json");

    save_json(&path, &case).unwrap();
    let loaded = load_case(&path).unwrap();

    assert_eq!(case, loaded);
    assert!(loaded.solve_options().parallel);
}

#[test]
fn minimal_yaml_uses_defaults() {
    let yaml = r#"
version: 1
name: bar
physics:
  diffusivity: 0.5
  boundary_low: 0.0
  boundary_high: 100.0
domain:
  length: 1.0
  points: 21
time:
  duration: 0.2
  points: 500
initial_condition:
  type: constant
  value: 20.0
"#;
    let path = std::env::temp_dir().join("hf_project_minimal.yaml");
    std::fs::write(&path, yaml).unwrap();

    let case = load_case(&path).unwrap();
    assert_eq!(case.solver.scheme, SchemeKind::ForwardEuler);
    assert!(!case.solver.parallel);
    assert_eq!(case.output.write_every, 10);
    assert!(case.output.gnuplot);
    assert!(case.output.write_manifest());

    let params = case.to_parameters();
    assert_eq!(params.boundary_value_high, 100.0);
    assert_eq!(params.initial_condition.eval(0.3), 20.0);
}

#[test]
fn scheme_names_in_yaml() {
    let solver: SolverDef = serde_yaml::from_str("scheme: rk4\n").unwrap();
    assert_eq!(solver.scheme, SchemeKind::RK4);
    let solver: SolverDef = serde_yaml::from_str("scheme: euler\n").unwrap();
    assert_eq!(solver.scheme, SchemeKind::ForwardEuler);
    assert!(serde_yaml::from_str::<SolverDef>("scheme: implicit\n").is_err());
}

#[test]
fn invalid_case_fails_to_load() {
    let mut case = CaseFile::reference();
    case.domain.points = 1;
    let text = serde_yaml::to_string(&case).unwrap();
    let path = std::env::temp_dir().join("hf_project_invalid.yaml");
    std::fs::write(&path, text).unwrap();

    assert!(matches!(load_yaml(&path), Err(ProjectError::Validation(_))));
}

proptest! {
    #[test]
    fn valid_case_yields_valid_parameters(
        diffusivity in 1e-3_f64..10.0,
        length in 1e-2_f64..100.0,
        space_points in 2_usize..500,
        duration in 1e-3_f64..100.0,
        time_points in 2_usize..5000,
        value in -1e3_f64..1e3,
    ) {
        let mut case = CaseFile::reference();
        case.physics.diffusivity = diffusivity;
        case.domain = DomainDef { length, points: space_points };
        case.time = TimeDef { duration, points: time_points };
        case.initial_condition = InitialConditionDef::Constant { value };

        prop_assert!(validate_case(&case).is_ok());
        prop_assert!(case.to_parameters().validate().is_ok());
    }
}
