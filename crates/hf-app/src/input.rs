//! Parameter line input, as piped into the CLI.

use std::io::BufRead;

use hf_project::{CaseFile, DomainDef, PhysicsDef, TimeDef};
use hf_results::{ParameterRecord, ResultsError, format_record, parse_record};

use crate::error::AppResult;

/// Turn a parsed parameter line into a case using the reference profile.
pub fn case_from_record(name: &str, record: &ParameterRecord) -> CaseFile {
    let mut case = CaseFile::reference();
    case.name = name.to_string();
    case.physics = PhysicsDef {
        diffusivity: record.diffusivity,
        boundary_low: record.boundary_condition_0,
        boundary_high: record.boundary_condition_1,
    };
    case.domain = DomainDef {
        length: record.space_max,
        points: record.space_points,
    };
    case.time = TimeDef {
        duration: record.time_max,
        points: record.time_points,
    };
    case
}

/// Read one `Parameters{...}` line from `input`.
///
/// Returns the case together with the parsed values re-serialised in the
/// canonical text form, so an echo shows what was actually read.
pub fn read_case<R: BufRead>(input: &mut R, name: &str) -> AppResult<(CaseFile, String)> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ResultsError::UnexpectedEof.into());
    }
    let record = parse_record(&line)?;
    Ok((case_from_record(name, &record), format_record(&record)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_results::format_parameters;
    use hf_sim::InitialCondition;

    #[test]
    fn reads_reference_line() {
        let reference = CaseFile::reference().to_parameters();
        let text = format!("{}\n", format_parameters(&reference));
        let (case, echo) = read_case(&mut text.as_bytes(), "stdin").unwrap();

        assert_eq!(echo, format_parameters(&reference));
        assert_eq!(case.name, "stdin");
        let params = case.to_parameters();
        assert_eq!(params.space_points, 100);
        assert_eq!(params.time_points, 1001);
        assert_eq!(params.boundary_value_high, -1.0);
        assert_eq!(
            params.initial_condition.eval(1.0),
            InitialCondition::shifted_sine().eval(1.0)
        );
    }

    #[test]
    fn echo_is_canonical_rather_than_raw() {
        let line = "Parameters{time_points=11;space_points=5;diffusivity=0.5;\
                    boundary_condition_0=1;boundary_condition_1=-1;space_max=2;time_max=0.25;};\n";
        let (case, echo) = read_case(&mut line.as_bytes(), "stdin").unwrap();

        let params = case.to_parameters();
        assert_eq!(echo, format_parameters(&params));
        assert!(echo.starts_with("Parameters{boundary_condition_0=1.000000000000000000000;"));
        assert!(echo.contains("space_points=5;"));
        assert!(echo.ends_with("time_points=11;}"));
        assert_eq!(params.diffusivity, 0.5);
        assert_eq!(params.time_length, 0.25);
    }

    #[test]
    fn empty_input_is_eof() {
        let err = read_case(&mut "".as_bytes(), "stdin").unwrap_err();
        assert!(err.to_string().contains("end of input"));
    }
}
