//! Progress events streamed while a case is solving.

use std::time::Instant;

use hf_sim::{Observer, ObserverResult, Parameters, RowView};

#[derive(Debug, Clone, PartialEq)]
pub struct RunProgressEvent {
    pub time_index: usize,
    pub time_points: usize,
    /// Physical time of the completed row.
    pub sim_time: f64,
    pub fraction_complete: f64,
    pub elapsed_wall_s: f64,
}

/// Observer counting completed rows and forwarding them to an optional callback.
pub struct ProgressObserver<'a> {
    started: Instant,
    rows: usize,
    callback: Option<&'a mut dyn FnMut(RunProgressEvent)>,
}

impl<'a> ProgressObserver<'a> {
    pub fn new(callback: Option<&'a mut dyn FnMut(RunProgressEvent)>) -> Self {
        Self {
            started: Instant::now(),
            rows: 0,
            callback,
        }
    }

    /// Rows seen so far.
    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl Observer for ProgressObserver<'_> {
    fn on_row(&mut self, params: &Parameters, _row: RowView<'_>, time_index: usize) -> ObserverResult {
        self.rows += 1;
        if let Some(cb) = self.callback.as_deref_mut() {
            let last = params.time_points.saturating_sub(1).max(1);
            cb(RunProgressEvent {
                time_index,
                time_points: params.time_points,
                sim_time: params.time_coordinate(time_index),
                fraction_complete: time_index as f64 / last as f64,
                elapsed_wall_s: self.started.elapsed().as_secs_f64(),
            });
        }
        Ok(())
    }
}
