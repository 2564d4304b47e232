//! Rolling time-space storage.
//!
//! Only `time_window` rows are kept; logical time index `t` lives in slot
//! `t % time_window`, so row `t` overwrites row `t - time_window`.

use hf_core::Real;

use crate::error::{SolveError, SolveResult};

/// Flat `time_window * space_points` arena of samples.
#[derive(Clone, Debug)]
pub struct Grid {
    points: Vec<Real>,
    space_points: usize,
    time_window: usize,
}

impl Grid {
    /// Allocate a zeroed grid.
    ///
    /// Fails with `InvalidParameters` for `time_window < 2` or
    /// `space_points == 0`, and with `Allocation` when the backing storage
    /// can't be reserved.
    pub fn new(time_window: usize, space_points: usize) -> SolveResult<Self> {
        if time_window < 2 {
            return Err(SolveError::invalid("time_window must be at least 2"));
        }
        if space_points == 0 {
            return Err(SolveError::invalid("space_points must be positive"));
        }

        let len = time_window
            .checked_mul(space_points)
            .ok_or(SolveError::Allocation {
                what: "grid points",
                bytes: usize::MAX,
            })?;
        let bytes = len.saturating_mul(std::mem::size_of::<Real>());

        let mut points = Vec::new();
        points
            .try_reserve_exact(len)
            .map_err(|_| SolveError::Allocation {
                what: "grid points",
                bytes,
            })?;
        points.resize(len, 0.0);

        Ok(Self {
            points,
            space_points,
            time_window,
        })
    }

    pub fn space_points(&self) -> usize {
        self.space_points
    }

    pub fn time_window(&self) -> usize {
        self.time_window
    }

    /// Raw storage in slot order (not time order).
    pub fn points(&self) -> &[Real] {
        &self.points
    }

    #[inline]
    fn slot(&self, time_index: usize) -> usize {
        time_index % self.time_window
    }

    #[inline]
    pub fn point_index(&self, time_index: usize, space_index: usize) -> usize {
        debug_assert!(
            space_index < self.space_points,
            "space index {space_index} out of range (space_points={})",
            self.space_points
        );
        self.slot(time_index) * self.space_points + space_index
    }

    #[inline]
    pub fn get(&self, time_index: usize, space_index: usize) -> Real {
        self.points[self.point_index(time_index, space_index)]
    }

    #[inline]
    pub fn set(&mut self, time_index: usize, space_index: usize, value: Real) {
        let index = self.point_index(time_index, space_index);
        self.points[index] = value;
    }

    /// All samples of the row stored for `time_index`.
    pub fn row(&self, time_index: usize) -> &[Real] {
        let start = self.slot(time_index) * self.space_points;
        &self.points[start..start + self.space_points]
    }

    /// Split borrow of row `time_index - 1` (read) and row `time_index` (write).
    ///
    /// The two slots are always distinct because `time_window >= 2`.
    pub fn rows_mut(&mut self, time_index: usize) -> (&[Real], &mut [Real]) {
        let n = self.space_points;
        let current = self.slot(time_index);
        let previous = (time_index + self.time_window - 1) % self.time_window;

        if previous < current {
            let (head, tail) = self.points.split_at_mut(current * n);
            (&head[previous * n..previous * n + n], &mut tail[..n])
        } else {
            let (head, tail) = self.points.split_at_mut(previous * n);
            (&tail[..n], &mut head[current * n..current * n + n])
        }
    }
}
