//! Result data types.

use serde::{Deserialize, Serialize};

use hf_core::Real;
use hf_sim::{InitialCondition, Parameters, SchemeKind};

/// The serialisable part of [`Parameters`]; the initial condition is code, not data.
///
/// Field names follow the `Parameters{...}` text format (β₀ as
/// `boundary_condition_0`, L as `space_max`, T as `time_max`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub boundary_condition_0: Real,
    pub boundary_condition_1: Real,
    pub diffusivity: Real,
    pub space_max: Real,
    pub space_points: usize,
    pub time_max: Real,
    pub time_points: usize,
}

impl ParameterRecord {
    pub fn from_parameters(params: &Parameters) -> Self {
        Self {
            boundary_condition_0: params.boundary_value_low,
            boundary_condition_1: params.boundary_value_high,
            diffusivity: params.diffusivity,
            space_max: params.space_length,
            space_points: params.space_points,
            time_max: params.time_length,
            time_points: params.time_points,
        }
    }

    pub fn into_parameters(self, initial_condition: InitialCondition) -> Parameters {
        Parameters {
            diffusivity: self.diffusivity,
            boundary_value_low: self.boundary_condition_0,
            boundary_value_high: self.boundary_condition_1,
            initial_condition,
            space_length: self.space_max,
            space_points: self.space_points,
            time_length: self.time_max,
            time_points: self.time_points,
        }
    }
}

/// Metadata written next to the row files of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub case_name: String,
    pub scheme: SchemeKind,
    pub parallel: bool,
    pub parameters: ParameterRecord,
    pub stability_ratio: Real,
    pub rows_solved: usize,
    pub files_written: usize,
    pub timestamp: String,
    pub elapsed_s: f64,
    pub solver_version: String,
}
