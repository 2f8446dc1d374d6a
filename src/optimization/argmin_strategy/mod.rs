//! argmin_strategy — reference optimizer strategy built on argmin's L-BFGS.
//!
//! Purpose
//! -------
//! Give the coordinator a concrete, pluggable
//! [`OptimizerStrategy`](crate::optimization::coordinator::traits::OptimizerStrategy)
//! implementation so a registration can run end to end inside this crate.
//! Hosts with their own optimizer implement the trait themselves and never
//! touch this module.
//!
//! Key behaviors
//! -------------
//! - [`ArgminStrategy`] minimizes the sum of the registration's metric values
//!   per resolution level with L-BFGS (More–Thuente or Hager–Zhang line
//!   search).
//! - [`adapter::ScaledCostAdapter`] exposes the metric set to argmin in
//!   scaled space, with finite-difference fallback ([`finite_diff`]) for
//!   metrics without analytic gradients.
//! - [`observer::SampleRefreshObserver`] refreshes stochastic metrics after
//!   every iteration on levels that ask for it.
//! - [`builders`] and [`run`] wire argmin's solver and executor.
//!
//! Invariants & assumptions
//! ------------------------
//! - Options are validated on construction ([`Tolerances::new`],
//!   [`StrategyOptions::new`]); the solver layer treats them as consistent.
//! - Argmin errors never leak: they are mapped into
//!   [`OptError`](crate::optimization::errors::OptError), recovering our own
//!   errors that crossed the argmin boundary.
//!
//! Conventions
//! -----------
//! - The cost is minimized as is; no sign flips.
//! - Positions reported to the coordinator are always unscaled.
//! - With the `obs_slog` feature and `verbose = true`, a terminal slog
//!   observer prints solver progress.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover validation, gradient scaling and
//!   fallback, observer behavior, solver construction, and full level runs.
//! - The integration tests drive this strategy through the multi-resolution
//!   driver.

pub mod adapter;
pub mod builders;
pub mod finite_diff;
pub mod observer;
pub mod options;
pub mod run;
pub mod strategy;
pub mod types;
pub mod validation;

pub use self::options::{LineSearcher, SinusScales, StrategyOptions, Tolerances};
pub use self::strategy::{ArgminStrategy, ARGMIN_STRATEGY_NAME};
pub use self::types::DEFAULT_LBFGS_MEM;
