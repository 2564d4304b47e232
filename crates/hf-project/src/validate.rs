//! Case file validation logic.

use hf_core::Real;

use crate::schema::{CaseFile, InitialConditionDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn finite(field: &str, v: Real) -> Result<(), ValidationError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite"))
    }
}

fn positive(field: &str, v: Real) -> Result<(), ValidationError> {
    finite(field, v)?;
    if v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be positive"))
    }
}

fn at_least(field: &str, v: usize, min: usize) -> Result<(), ValidationError> {
    if v >= min {
        Ok(())
    } else {
        Err(invalid(field, v, &format!("must be at least {min}")))
    }
}

pub fn validate_case(case: &CaseFile) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }
    if case.name.trim().is_empty() {
        return Err(invalid("name", "\"\"", "must not be empty"));
    }

    positive("physics.diffusivity", case.physics.diffusivity)?;
    finite("physics.boundary_low", case.physics.boundary_low)?;
    finite("physics.boundary_high", case.physics.boundary_high)?;

    positive("domain.length", case.domain.length)?;
    at_least("domain.points", case.domain.points, 2)?;
    positive("time.duration", case.time.duration)?;
    at_least("time.points", case.time.points, 2)?;

    match case.initial_condition {
        InitialConditionDef::Constant { value } => finite("initial_condition.value", value)?,
        InitialConditionDef::Sine {
            amplitude,
            wavenumber,
            phase,
            offset,
        } => {
            finite("initial_condition.amplitude", amplitude)?;
            finite("initial_condition.wavenumber", wavenumber)?;
            finite("initial_condition.phase", phase)?;
            finite("initial_condition.offset", offset)?;
        }
        InitialConditionDef::Gaussian {
            amplitude,
            center,
            width,
            offset,
        } => {
            finite("initial_condition.amplitude", amplitude)?;
            finite("initial_condition.center", center)?;
            positive("initial_condition.width", width)?;
            finite("initial_condition.offset", offset)?;
        }
        InitialConditionDef::Linear { start, end } => {
            finite("initial_condition.start", start)?;
            finite("initial_condition.end", end)?;
        }
    }

    at_least("output.write_every", case.output.write_every, 1)?;
    at_least("output.plot_every", case.output.plot_every, 1)?;

    Ok(())
}
