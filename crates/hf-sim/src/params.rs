//! Problem definition for one solve.
//!
//! ∂u/∂t = α ∂²u/∂x²,  u(x, 0) = f(x),  u(0, t) = β₀,  u(L, t) = β₁,
//! with t ∈ [0, T] and x ∈ [0, L].

use std::fmt;
use std::sync::Arc;

use hf_core::{Real, ensure_finite, ensure_positive, index_coordinate};

use crate::error::{SolveError, SolveResult};
use crate::scheme::Discretization;

/// Initial temperature profile f(x), shareable across threads.
#[derive(Clone)]
pub struct InitialCondition(Arc<dyn Fn(Real) -> Real + Send + Sync>);

impl InitialCondition {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Real) -> Real + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn constant(value: Real) -> Self {
        Self::new(move |_| value)
    }

    /// `sin(x + π/2)`, the profile of the built-in reference case.
    pub fn shifted_sine() -> Self {
        Self::new(|x| (x + 0.5 * std::f64::consts::PI).sin())
    }

    #[inline]
    pub fn eval(&self, x: Real) -> Real {
        (self.0)(x)
    }
}

impl fmt::Debug for InitialCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InitialCondition(..)")
    }
}

/// Immutable input of a solve.
#[derive(Clone, Debug)]
pub struct Parameters {
    /// α
    pub diffusivity: Real,
    /// β₀, enforced at x = 0
    pub boundary_value_low: Real,
    /// β₁, enforced at x = L
    pub boundary_value_high: Real,
    /// f(x)
    pub initial_condition: InitialCondition,
    /// L
    pub space_length: Real,
    /// Spatial samples including both boundaries.
    pub space_points: usize,
    /// T
    pub time_length: Real,
    /// Time samples including t = 0.
    pub time_points: usize,
}

impl Default for Parameters {
    /// Reference case: a cosine profile relaxing between β₀ = 1 and β₁ = -1
    /// over x ∈ [0, 5π] and t ∈ [0, 5].
    fn default() -> Self {
        Self {
            diffusivity: 1.0,
            boundary_value_low: 1.0,
            boundary_value_high: -1.0,
            initial_condition: InitialCondition::shifted_sine(),
            space_length: 5.0 * std::f64::consts::PI,
            space_points: 100,
            time_length: 5.0,
            time_points: 1000 + 1,
        }
    }
}

impl Parameters {
    /// Check point counts and physical extents.
    pub fn validate(&self) -> SolveResult<()> {
        if self.time_points <= 1 {
            return Err(SolveError::invalid(format!(
                "time_points must be greater than 1 (got {})",
                self.time_points
            )));
        }
        if self.space_points <= 1 {
            return Err(SolveError::invalid(format!(
                "space_points must be greater than 1 (got {})",
                self.space_points
            )));
        }
        ensure_positive(self.diffusivity, "diffusivity")?;
        ensure_positive(self.space_length, "space_length")?;
        ensure_positive(self.time_length, "time_length")?;
        Ok(())
    }

    /// Check that both boundary values are finite.
    ///
    /// Not part of `validate`: non-finite values are allowed to propagate
    /// through a solve and are left to the caller to inspect.
    pub fn ensure_finite_boundaries(&self) -> SolveResult<()> {
        ensure_finite(self.boundary_value_low, "boundary_value_low")?;
        ensure_finite(self.boundary_value_high, "boundary_value_high")?;
        Ok(())
    }

    /// L / space_points.
    ///
    /// Divides by the point count rather than the interval count, unlike
    /// `space_coordinate`. Kept as is because it shapes every numeric result.
    pub fn space_step(&self) -> Real {
        self.space_length / self.space_points as Real
    }

    /// T / time_points, same convention as `space_step`.
    pub fn time_step(&self) -> Real {
        self.time_length / self.time_points as Real
    }

    /// r = α · dt / dx²
    pub fn stability_ratio(&self) -> Real {
        self.discretization().stability_ratio()
    }

    pub fn discretization(&self) -> Discretization {
        Discretization::new(self.space_step(), self.time_step(), self.diffusivity)
    }

    /// x for spatial sample `space_index`, spanning [0, L] end to end.
    pub fn space_coordinate(&self, space_index: usize) -> Real {
        index_coordinate(space_index, self.space_points, self.space_length)
    }

    /// t for time sample `time_index`, spanning [0, T] end to end.
    pub fn time_coordinate(&self, time_index: usize) -> Real {
        index_coordinate(time_index, self.time_points, self.time_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference_case() {
        let p = Parameters::default();
        assert_eq!(p.space_points, 100);
        assert_eq!(p.time_points, 1001);
        assert!(p.validate().is_ok());
        assert!(p.stability_ratio() <= 0.5);
    }

    #[test]
    fn validate_rejects_single_points() {
        let p = Parameters {
            time_points: 1,
            ..Parameters::default()
        };
        assert!(matches!(
            p.validate(),
            Err(SolveError::InvalidParameters { .. })
        ));

        let p = Parameters {
            space_points: 1,
            ..Parameters::default()
        };
        assert!(matches!(
            p.validate(),
            Err(SolveError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn validate_rejects_non_positive_extents() {
        for p in [
            Parameters {
                diffusivity: 0.0,
                ..Parameters::default()
            },
            Parameters {
                space_length: -1.0,
                ..Parameters::default()
            },
            Parameters {
                time_length: Real::NAN,
                ..Parameters::default()
            },
        ] {
            let err = p.validate().unwrap_err();
            assert!(matches!(err, SolveError::InvalidParameters { .. }), "{err}");
        }
    }

    #[test]
    fn boundary_finiteness_is_checked_separately() {
        let p = Parameters {
            boundary_value_high: Real::INFINITY,
            ..Parameters::default()
        };
        assert!(p.validate().is_ok());
        assert!(p.ensure_finite_boundaries().is_err());
    }

    #[test]
    fn coordinates_span_domain() {
        let p = Parameters {
            space_length: 2.0,
            space_points: 5,
            time_length: 4.0,
            time_points: 9,
            ..Parameters::default()
        };
        assert_eq!(p.space_coordinate(0), 0.0);
        assert_eq!(p.space_coordinate(2), 1.0);
        assert_eq!(p.space_coordinate(4), 2.0);
        assert_eq!(p.time_coordinate(8), 4.0);
        assert_eq!(p.time_coordinate(2), 1.0);
    }

    #[test]
    fn initial_condition_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parameters>();

        let ic = InitialCondition::constant(3.0);
        let cloned = ic.clone();
        assert_eq!(cloned.eval(-7.0), 3.0);
        assert_eq!(format!("{ic:?}"), "InitialCondition(..)");
    }
}
