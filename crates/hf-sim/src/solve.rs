//! Time-marching loop.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use hf_core::Real;

use crate::error::{SolveError, SolveResult};
use crate::grid::Grid;
use crate::observer::{Observer, RowView};
use crate::params::Parameters;
use crate::scheme::{Discretization, ForwardEuler, RK4, Scheme, SchemeKind};

/// Rows kept in memory: previous and current.
pub const TIME_WINDOW: usize = 2;

/// Options for a solve.
#[derive(Clone, Debug, Default)]
pub struct SolveOptions {
    /// Stepping scheme (default: forward Euler)
    pub scheme: SchemeKind,
    /// Compute the interior of each row on the rayon pool.
    pub parallel: bool,
}

impl SolveOptions {
    pub fn new(scheme: SchemeKind) -> Self {
        Self {
            scheme,
            parallel: false,
        }
    }
}

/// Solve serially with the given scheme, reporting every row to `observer`.
pub fn solve<O>(params: &Parameters, scheme: SchemeKind, observer: &mut O) -> SolveResult<()>
where
    O: Observer + ?Sized,
{
    solve_with_options(params, &SolveOptions::new(scheme), observer)
}

pub fn solve_with_options<O>(
    params: &Parameters,
    opts: &SolveOptions,
    observer: &mut O,
) -> SolveResult<()>
where
    O: Observer + ?Sized,
{
    match opts.scheme {
        SchemeKind::ForwardEuler => solve_with_scheme(params, &ForwardEuler, opts.parallel, observer),
        SchemeKind::RK4 => solve_with_scheme(params, &RK4, opts.parallel, observer),
    }
}

/// Generic loop, monomorphised per scheme.
///
/// Order of operations: validate, scheme check, `before_solve`, allocate,
/// seed row 0, then one row per time index. Every failure is terminal and
/// rows already handed to the observer stay delivered.
pub fn solve_with_scheme<S, O>(
    params: &Parameters,
    scheme: &S,
    parallel: bool,
    observer: &mut O,
) -> SolveResult<()>
where
    S: Scheme,
    O: Observer + ?Sized,
{
    params.validate()?;
    let disc = params.discretization();
    scheme.check(&disc)?;

    debug!(
        scheme = %scheme.kind(),
        space_points = params.space_points,
        time_points = params.time_points,
        space_step = disc.space_step(),
        time_step = disc.time_step(),
        ratio = disc.stability_ratio(),
        parallel,
        "starting solve"
    );

    observer
        .before_solve(params)
        .map_err(|source| SolveError::BeforeSolve { source })?;

    let mut grid = Grid::new(TIME_WINDOW, params.space_points)?;
    seed_initial_row(&mut grid, params);
    notify(observer, params, &grid, 0)?;

    for time_index in 1..params.time_points {
        advance_row(&mut grid, time_index, params, scheme, &disc, parallel);
        notify(observer, params, &grid, time_index)?;
    }

    info!(
        scheme = %scheme.kind(),
        rows = params.time_points,
        "solve complete"
    );
    Ok(())
}

fn seed_initial_row(grid: &mut Grid, params: &Parameters) {
    let last = params.space_points - 1;
    grid.set(0, 0, params.boundary_value_low);
    grid.set(0, last, params.boundary_value_high);
    for space_index in 1..last {
        let space = params.space_coordinate(space_index);
        grid.set(0, space_index, params.initial_condition.eval(space));
    }
}

fn advance_row<S: Scheme>(
    grid: &mut Grid,
    time_index: usize,
    params: &Parameters,
    scheme: &S,
    disc: &Discretization,
    parallel: bool,
) {
    let (previous, current) = grid.rows_mut(time_index);
    let last = current.len() - 1;
    current[0] = params.boundary_value_low;
    current[last] = params.boundary_value_high;

    // Interior point i reads previous[i-1..=i+1]; window k starts at i-1.
    let interior = &mut current[1..last];
    let step = |value: &mut Real, window: &[Real]| {
        *value = scheme.advance(disc, window[0], window[1], window[2]);
    };
    if parallel {
        interior
            .par_iter_mut()
            .zip(previous.par_windows(3))
            .for_each(|(value, window)| step(value, window));
    } else {
        interior
            .iter_mut()
            .zip(previous.windows(3))
            .for_each(|(value, window)| step(value, window));
    }
}

fn notify<O>(observer: &mut O, params: &Parameters, grid: &Grid, time_index: usize) -> SolveResult<()>
where
    O: Observer + ?Sized,
{
    observer
        .on_row(params, RowView::new(grid, time_index), time_index)
        .map_err(|source| {
            warn!(time_index, error = %source, "observer stopped the solve");
            SolveError::Observer { time_index, source }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RowRecorder;

    #[test]
    fn options_default_to_serial_euler() {
        let opts = SolveOptions::default();
        assert_eq!(opts.scheme, SchemeKind::ForwardEuler);
        assert!(!opts.parallel);
    }

    #[test]
    fn two_space_points_have_no_interior() {
        let params = Parameters {
            space_points: 2,
            time_points: 4,
            boundary_value_low: 3.0,
            boundary_value_high: 4.0,
            // r = 1 · (1/4) / (1/2)² = 1, only harmless because nothing is interior
            space_length: 1.0,
            time_length: 1.0,
            ..Parameters::default()
        };
        let mut recorder = RowRecorder::new();
        solve(&params, SchemeKind::RK4, &mut recorder).unwrap();
        assert_eq!(recorder.len(), 4);
        for row in recorder.rows() {
            assert_eq!(row.as_slice(), &[3.0, 4.0]);
        }
    }

    #[test]
    fn invalid_parameters_never_reach_observer() {
        let params = Parameters {
            time_points: 0,
            ..Parameters::default()
        };
        let mut recorder = RowRecorder::new();
        let err = solve(&params, SchemeKind::ForwardEuler, &mut recorder).unwrap_err();
        assert!(matches!(err, SolveError::InvalidParameters { .. }));
        assert!(recorder.is_empty());
    }
}
