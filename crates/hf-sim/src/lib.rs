//! Explicit finite-difference solver for one-dimensional transient heat diffusion.
//!
//! Provides:
//! - Rolling two-row grid storage with modular time indexing
//! - Forward Euler and classical RK4 stepping schemes
//! - Solver loop driving an observer once per completed time row
//! - In-memory row recorder for tests and post-processing

pub mod error;
pub mod grid;
pub mod observer;
pub mod params;
pub mod scheme;
pub mod solve;

pub use error::{SolveError, SolveResult};
pub use grid::Grid;
pub use observer::{
    BoxError, FnObserver, Observer, ObserverResult, RowRecorder, RowView, observer_fn,
};
pub use params::{InitialCondition, Parameters};
pub use scheme::{Discretization, ForwardEuler, RK4, Scheme, SchemeKind};
pub use solve::{SolveOptions, TIME_WINDOW, solve, solve_with_options, solve_with_scheme};
