//! Case file schema definitions.

use serde::{Deserialize, Serialize};

use hf_core::{Real, lerp};
use hf_sim::{InitialCondition, Parameters, SchemeKind, SolveOptions};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseFile {
    pub version: u32,
    pub name: String,
    pub physics: PhysicsDef,
    pub domain: DomainDef,
    pub time: TimeDef,
    pub initial_condition: InitialConditionDef,
    #[serde(default)]
    pub solver: SolverDef,
    #[serde(default)]
    pub output: OutputDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhysicsDef {
    pub diffusivity: Real,
    pub boundary_low: Real,
    pub boundary_high: Real,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainDef {
    pub length: Real,
    pub points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    pub duration: Real,
    pub points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InitialConditionDef {
    Constant {
        value: Real,
    },
    /// offset + amplitude · sin(wavenumber · x + phase)
    Sine {
        #[serde(default = "default_one")]
        amplitude: Real,
        #[serde(default = "default_one")]
        wavenumber: Real,
        #[serde(default)]
        phase: Real,
        #[serde(default)]
        offset: Real,
    },
    /// offset + amplitude · exp(-½ ((x - center) / width)²)
    Gaussian {
        amplitude: Real,
        center: Real,
        width: Real,
        #[serde(default)]
        offset: Real,
    },
    /// Straight line from `start` at x = 0 to `end` at x = L.
    Linear {
        start: Real,
        end: Real,
    },
}

fn default_one() -> Real {
    1.0
}

fn default_stride() -> usize {
    10
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SolverDef {
    #[serde(default)]
    pub scheme: SchemeKind,
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputDef {
    /// Write every N-th row as a `.dat` file.
    #[serde(default = "default_stride")]
    pub write_every: usize,
    /// Stride of the gnuplot `plot for` loop.
    #[serde(default = "default_stride")]
    pub plot_every: usize,
    #[serde(default = "default_true")]
    pub gnuplot: bool,
    #[serde(default)]
    pub manifest: Option<bool>,
}

impl Default for OutputDef {
    fn default() -> Self {
        Self {
            write_every: default_stride(),
            plot_every: default_stride(),
            gnuplot: true,
            manifest: None,
        }
    }
}

impl OutputDef {
    pub fn write_manifest(&self) -> bool {
        self.manifest.unwrap_or(true)
    }
}

impl InitialConditionDef {
    /// Build the profile; `space_length` is only used by `Linear`.
    pub fn to_initial_condition(&self, space_length: Real) -> InitialCondition {
        match *self {
            InitialConditionDef::Constant { value } => InitialCondition::constant(value),
            InitialConditionDef::Sine {
                amplitude,
                wavenumber,
                phase,
                offset,
            } => InitialCondition::new(move |x| offset + amplitude * (wavenumber * x + phase).sin()),
            InitialConditionDef::Gaussian {
                amplitude,
                center,
                width,
                offset,
            } => InitialCondition::new(move |x| {
                let z = (x - center) / width;
                offset + amplitude * (-0.5 * z * z).exp()
            }),
            InitialConditionDef::Linear { start, end } => {
                InitialCondition::new(move |x| lerp(x, 0.0, space_length, start, end))
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InitialConditionDef::Constant { .. } => "constant",
            InitialConditionDef::Sine { .. } => "sine",
            InitialConditionDef::Gaussian { .. } => "gaussian",
            InitialConditionDef::Linear { .. } => "linear",
        }
    }
}

impl CaseFile {
    /// Cosine profile between β₀ = 1 and β₁ = -1 on [0, 5π] for 5 time units.
    pub fn reference() -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: "reference".to_string(),
            physics: PhysicsDef {
                diffusivity: 1.0,
                boundary_low: 1.0,
                boundary_high: -1.0,
            },
            domain: DomainDef {
                length: 5.0 * std::f64::consts::PI,
                points: 100,
            },
            time: TimeDef {
                duration: 5.0,
                points: 1000 + 1,
            },
            initial_condition: InitialConditionDef::Sine {
                amplitude: 1.0,
                wavenumber: 1.0,
                phase: 0.5 * std::f64::consts::PI,
                offset: 0.0,
            },
            solver: SolverDef::default(),
            output: OutputDef::default(),
        }
    }

    pub fn to_parameters(&self) -> Parameters {
        Parameters {
            diffusivity: self.physics.diffusivity,
            boundary_value_low: self.physics.boundary_low,
            boundary_value_high: self.physics.boundary_high,
            initial_condition: self.initial_condition.to_initial_condition(self.domain.length),
            space_length: self.domain.length,
            space_points: self.domain.points,
            time_length: self.time.duration,
            time_points: self.time.points,
        }
    }

    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            scheme: self.solver.scheme,
            parallel: self.solver.parallel,
        }
    }
}
