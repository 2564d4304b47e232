//! Row observers: the only way results leave the solver.
//!
//! An observer is called once per time index, in increasing order, right
//! after that row is complete. The row view borrows the grid, so it can't
//! outlive the call; the slot it points at is reused `time_window` steps later.

use hf_core::Real;

use crate::grid::Grid;
use crate::params::Parameters;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of one observer call. Any `Err` stops the solve.
pub type ObserverResult = Result<(), BoxError>;

/// Read-only view of one completed row.
#[derive(Clone, Copy, Debug)]
pub struct RowView<'a> {
    values: &'a [Real],
    grid: &'a Grid,
}

impl<'a> RowView<'a> {
    pub fn new(grid: &'a Grid, time_index: usize) -> Self {
        Self {
            values: grid.row(time_index),
            grid,
        }
    }

    pub fn values(&self) -> &'a [Real] {
        self.values
    }

    /// The whole rolling storage, including the previous row.
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> Option<Real> {
        self.values.first().copied()
    }

    pub fn last(&self) -> Option<Real> {
        self.values.last().copied()
    }
}

/// Receiver of solver output.
pub trait Observer {
    /// Called once before the grid is allocated.
    fn before_solve(&mut self, _params: &Parameters) -> ObserverResult {
        Ok(())
    }

    /// Called once per completed row, `time_index` = 0, 1, 2, ...
    fn on_row(&mut self, params: &Parameters, row: RowView<'_>, time_index: usize)
    -> ObserverResult;
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn before_solve(&mut self, params: &Parameters) -> ObserverResult {
        (**self).before_solve(params)
    }

    fn on_row(&mut self, params: &Parameters, row: RowView<'_>, time_index: usize) -> ObserverResult {
        (**self).on_row(params, row, time_index)
    }
}

/// Discards every row.
impl Observer for () {
    fn on_row(&mut self, _: &Parameters, _: RowView<'_>, _: usize) -> ObserverResult {
        Ok(())
    }
}

/// Runs both observers in order; the first failure wins.
impl<A: Observer, B: Observer> Observer for (A, B) {
    fn before_solve(&mut self, params: &Parameters) -> ObserverResult {
        self.0.before_solve(params)?;
        self.1.before_solve(params)
    }

    fn on_row(&mut self, params: &Parameters, row: RowView<'_>, time_index: usize) -> ObserverResult {
        self.0.on_row(params, row, time_index)?;
        self.1.on_row(params, row, time_index)
    }
}

/// Adapter turning a closure into an observer, see [`observer_fn`].
pub struct FnObserver<F>(F);

pub fn observer_fn<F>(f: F) -> FnObserver<F>
where
    F: FnMut(&Parameters, RowView<'_>, usize) -> ObserverResult,
{
    FnObserver(f)
}

impl<F> Observer for FnObserver<F>
where
    F: FnMut(&Parameters, RowView<'_>, usize) -> ObserverResult,
{
    fn on_row(&mut self, params: &Parameters, row: RowView<'_>, time_index: usize) -> ObserverResult {
        (self.0)(params, row, time_index)
    }
}

/// Copies rows out of the rolling grid.
#[derive(Clone, Debug)]
pub struct RowRecorder {
    every: usize,
    time_indices: Vec<usize>,
    rows: Vec<Vec<Real>>,
}

impl Default for RowRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl RowRecorder {
    /// Record every row.
    pub fn new() -> Self {
        Self::every(1)
    }

    /// Record rows whose time index is a multiple of `n` (0 is treated as 1).
    pub fn every(n: usize) -> Self {
        Self {
            every: n.max(1),
            time_indices: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn time_indices(&self) -> &[usize] {
        &self.time_indices
    }

    pub fn rows(&self) -> &[Vec<Real>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last_row(&self) -> Option<&[Real]> {
        self.rows.last().map(Vec::as_slice)
    }

    pub fn into_rows(self) -> Vec<Vec<Real>> {
        self.rows
    }
}

impl Observer for RowRecorder {
    fn on_row(&mut self, _params: &Parameters, row: RowView<'_>, time_index: usize) -> ObserverResult {
        if time_index % self.every == 0 {
            self.time_indices.push(time_index);
            self.rows.push(row.values().to_vec());
        }
        Ok(())
    }
}
