//! hf-core: shared foundation for heatflow.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers + lerp)
//! - error (shared error types)
//! - timing (wall-clock timers for solve phases)

pub mod error;
pub mod numeric;
pub mod timing;

pub use error::{HfError, HfResult};
pub use numeric::*;
pub use timing::Timer;
