//! optimization — coordinator, reference strategy, and unified error surface.
//!
//! Purpose
//! -------
//! Group everything that happens on the optimizer side of a multi-resolution
//! registration: the lifecycle coordinator, the collaborator traits it talks
//! to, an argmin-backed reference strategy, and a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `coordinator`: lifecycle hooks, synchronized sample refresh, sinus scale
//!   schedules and result fingerprinting.
//! - `argmin_strategy`: an L-BFGS `OptimizerStrategy` that minimizes the sum
//!   of the registration's metric values in scaled space.
//! - `errors`: `OptError` / `OptResult<T>`, including conversions from
//!   configuration errors and argmin errors.
//! - `types`: shared `ndarray`-based aliases (`Theta`, `Grad`, `Scales`, ...).
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters, gradients and scales are `Array1<f64>` of one common length
//!   per strategy; dimension mismatches are reported as `OptError`, not
//!   panics.
//! - Everything here is single-threaded and synchronous.
//!
//! Conventions
//! -----------
//! - Public entry points that can fail return `OptResult<T>`; callers never
//!   see raw argmin errors.
//! - Diagnostics use the `log` facade; installing a logger is the host's
//!   job.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each submodule.
//! - `tests/integration_registration_pipeline.rs` drives the coordinator and
//!   the argmin strategy through the reference driver.

pub mod argmin_strategy;
pub mod coordinator;
pub mod errors;
pub mod types;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use registration_coordinator::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::argmin_strategy::{
        ArgminStrategy, LineSearcher, SinusScales, StrategyOptions, Tolerances,
    };
    pub use super::coordinator::{
        fingerprint::fingerprint, refresh_samples, sinus_scales, Capability, LevelOutcome,
        LevelSchedule, LifecycleState, LogSink, MemorySink, Metric, MetricSet,
        OptimizerCoordinator, OptimizerStrategy, RegistrationContext, ReportSink,
    };
    pub use super::errors::{OptError, OptResult};
    pub use super::types::{Checksum, Cost, Grad, ResolutionLevel, Scales, Theta};
}
