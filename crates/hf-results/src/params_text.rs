//! Single-line text form of the solver parameters:
//!
//! ```text
//! Parameters{boundary_condition_0=1.0…;boundary_condition_1=…;diffusivity=…;space_max=…;space_points=100;time_max=…;time_points=1001;}
//! ```
//!
//! Reals are written with 21 fractional digits so they read back unchanged.

use std::io::{BufRead, Write};

use hf_sim::{InitialCondition, Parameters};

use crate::types::ParameterRecord;
use crate::{ResultsError, ResultsResult};

const PREFIX: &str = "Parameters{";
const REAL_DIGITS: usize = 21;

pub fn format_parameters(params: &Parameters) -> String {
    format_record(&ParameterRecord::from_parameters(params))
}

pub fn format_record(record: &ParameterRecord) -> String {
    format!(
        "Parameters{{boundary_condition_0={:.p$};boundary_condition_1={:.p$};diffusivity={:.p$};space_max={:.p$};space_points={};time_max={:.p$};time_points={};}}",
        record.boundary_condition_0,
        record.boundary_condition_1,
        record.diffusivity,
        record.space_max,
        record.space_points,
        record.time_max,
        record.time_points,
        p = REAL_DIGITS,
    )
}

pub fn write_parameters<W: Write>(params: &Parameters, out: &mut W) -> ResultsResult<()> {
    out.write_all(format_parameters(params).as_bytes())?;
    Ok(())
}

/// Parse one line; a single trailing `;` after the closing brace is accepted.
pub fn parse_record(line: &str) -> ResultsResult<ParameterRecord> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ResultsError::BlankInput);
    }

    let body = line
        .strip_prefix(PREFIX)
        .ok_or_else(|| format_error(format!("expected '{PREFIX}' prefix")))?;
    let body = body.strip_suffix(';').unwrap_or(body);
    let body = body
        .strip_suffix('}')
        .ok_or_else(|| format_error("missing closing '}'"))?;

    let mut boundary_condition_0 = None;
    let mut boundary_condition_1 = None;
    let mut diffusivity = None;
    let mut space_max = None;
    let mut space_points = None;
    let mut time_max = None;
    let mut time_points = None;

    for field in body.split(';').map(str::trim).filter(|f| !f.is_empty()) {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| format_error(format!("field '{field}' has no '='")))?;
        let value = value.trim();
        match key.trim() {
            "boundary_condition_0" => set_once(&mut boundary_condition_0, key, parse_real(key, value)?)?,
            "boundary_condition_1" => set_once(&mut boundary_condition_1, key, parse_real(key, value)?)?,
            "diffusivity" => set_once(&mut diffusivity, key, parse_real(key, value)?)?,
            "space_max" => set_once(&mut space_max, key, parse_real(key, value)?)?,
            "space_points" => set_once(&mut space_points, key, parse_count(key, value)?)?,
            "time_max" => set_once(&mut time_max, key, parse_real(key, value)?)?,
            "time_points" => set_once(&mut time_points, key, parse_count(key, value)?)?,
            other => return Err(format_error(format!("unknown field '{other}'"))),
        }
    }

    Ok(ParameterRecord {
        boundary_condition_0: required(boundary_condition_0, "boundary_condition_0")?,
        boundary_condition_1: required(boundary_condition_1, "boundary_condition_1")?,
        diffusivity: required(diffusivity, "diffusivity")?,
        space_max: required(space_max, "space_max")?,
        space_points: required(space_points, "space_points")?,
        time_max: required(time_max, "time_max")?,
        time_points: required(time_points, "time_points")?,
    })
}

pub fn parse_parameters(line: &str, initial_condition: InitialCondition) -> ResultsResult<Parameters> {
    Ok(parse_record(line)?.into_parameters(initial_condition))
}

/// Read the first line of `input` and parse it.
pub fn read_parameters<R: BufRead>(
    input: &mut R,
    initial_condition: InitialCondition,
) -> ResultsResult<Parameters> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ResultsError::UnexpectedEof);
    }
    parse_parameters(&line, initial_condition)
}

fn format_error(message: impl Into<String>) -> ResultsError {
    ResultsError::ParameterFormat {
        message: message.into(),
    }
}

fn set_once<T>(slot: &mut Option<T>, key: &str, value: T) -> ResultsResult<()> {
    if slot.is_some() {
        return Err(format_error(format!("duplicate field '{key}'")));
    }
    *slot = Some(value);
    Ok(())
}

fn required<T>(slot: Option<T>, key: &str) -> ResultsResult<T> {
    slot.ok_or_else(|| format_error(format!("missing field '{key}'")))
}

fn parse_real(key: &str, value: &str) -> ResultsResult<f64> {
    value
        .parse()
        .map_err(|e| format_error(format!("{key}='{value}': {e}")))
}

fn parse_count(key: &str, value: &str) -> ResultsResult<usize> {
    value
        .parse()
        .map_err(|e| format_error(format!("{key}='{value}': {e}")))
}
