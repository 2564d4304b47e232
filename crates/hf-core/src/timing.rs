//! Lightweight wall-clock timing for solve phases.
//!
//! Timers always measure; reporting goes through `tracing` so the subscriber
//! decides whether anything is printed. Set `HF_TIMING` to raise the report
//! level from `debug` to `info`.

use std::time::Instant;

/// Check if verbose timing reports are requested.
pub fn is_verbose() -> bool {
    std::env::var("HF_TIMING").is_ok()
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Elapsed seconds without stopping.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer, log the result, and return elapsed seconds.
    pub fn stop(self) -> f64 {
        let elapsed = self.elapsed_s();
        if is_verbose() {
            tracing::info!(phase = self.label, elapsed_s = elapsed, "timing");
        } else {
            tracing::debug!(phase = self.label, elapsed_s = elapsed, "timing");
        }
        elapsed
    }
}
