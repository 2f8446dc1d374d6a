//! registration_coordinator — per-resolution optimization coordinator for
//! multi-resolution image registration.
//!
//! Purpose
//! -------
//! Serve as the crate root: re-export the configuration reader, the
//! optimizer-side coordinator and its collaborators, and a reference
//! multi-resolution driver.
//!
//! Key behaviors
//! -------------
//! - `configuration`: `ParameterMap`, a typed reader for
//!   `key → [value per resolution level]` options, scoped by component label.
//! - `optimization`: lifecycle hooks, synchronized sample refresh, sinus
//!   scale schedules, result fingerprints, the `OptimizerStrategy` / `Metric`
//!   traits and an argmin-backed reference strategy.
//! - `registration`: `MultiResolutionRegistration`, which calls the hooks in
//!   order and returns the final position and its checksum.
//!
//! Invariants & assumptions
//! ------------------------
//! - Single-threaded, synchronous and callback-driven; no component spawns
//!   work or performs I/O.
//! - The checksum format is pinned as `FINGERPRINT_FORMAT_VERSION = 1`.
//!
//! Conventions
//! -----------
//! - Errors are rich enums (`ConfigError`, `OptError`) propagated with `?`;
//!   the library does not panic on user input.
//! - Logging goes through the `log` facade. The library never installs a
//!   logger; hosts and tests choose one (the test suite uses `env_logger`).
//!
//! Downstream usage
//! ----------------
//! - Hosts with their own controller call `OptimizerCoordinator` hooks
//!   directly with a `RegistrationContext`.
//! - Hosts without one use `MultiResolutionRegistration::run`.
//! - `prelude::*` imports the common surface in one line.

pub mod configuration;
pub mod optimization;
pub mod registration;

pub mod prelude {
    pub use crate::configuration::{ConfigError, ConfigResult, ParameterMap};
    pub use crate::optimization::prelude::*;
    pub use crate::registration::{MultiResolutionRegistration, RegistrationOutcome};
}
